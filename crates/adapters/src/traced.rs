// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::control_plane::{ControlPlane, ControlPlaneError};
use async_trait::async_trait;
use fc_core::{
    CommandId, InstanceId, InvocationDetail, InvocationFilter, ListCommandsOutput,
    ListInvocationsOutput, SendCommandOutput, SendCommandRequest,
};
use std::time::Instant;
use tracing::Instrument;

/// Wrapper that adds tracing to any ControlPlane
#[derive(Clone)]
pub struct TracedControlPlane<C> {
    inner: C,
}

impl<C> TracedControlPlane<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<C: ControlPlane> ControlPlane for TracedControlPlane<C> {
    async fn send_command(
        &self,
        request: &SendCommandRequest,
    ) -> Result<SendCommandOutput, ControlPlaneError> {
        async {
            tracing::info!(targets = request.targets.len(), "submitting");
            let start = Instant::now();
            let result = self.inner.send_command(request).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(output) => tracing::info!(
                    command_id = output.command_id().map(|id| id.as_str()),
                    elapsed_ms,
                    "command submitted"
                ),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "submit failed"),
            }
            result
        }
        .instrument(tracing::info_span!(
            "control_plane.send_command",
            document = %request.document_name
        ))
        .await
    }

    async fn list_commands(
        &self,
        command_id: &CommandId,
    ) -> Result<ListCommandsOutput, ControlPlaneError> {
        let start = Instant::now();
        let result = self.inner.list_commands(command_id).await;
        let elapsed_ms = start.elapsed().as_millis() as u64;
        tracing::info_span!("control_plane.list_commands", %command_id).in_scope(|| match &result {
            Ok(output) => tracing::debug!(
                status = ?output.first().and_then(|r| r.status),
                elapsed_ms,
                "listed"
            ),
            Err(e) => tracing::error!(elapsed_ms, error = %e, "list_commands failed"),
        });
        result
    }

    async fn list_invocations(
        &self,
        command_id: &CommandId,
        filter: InvocationFilter,
    ) -> Result<ListInvocationsOutput, ControlPlaneError> {
        let start = Instant::now();
        let result = self.inner.list_invocations(command_id, filter).await;
        let elapsed_ms = start.elapsed().as_millis() as u64;
        tracing::info_span!("control_plane.list_invocations", %command_id, ?filter).in_scope(
            || match &result {
                Ok(output) => tracing::info!(
                    count = output.invocations().len(),
                    elapsed_ms,
                    "listed"
                ),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "list_invocations failed"),
            },
        );
        result
    }

    async fn get_invocation(
        &self,
        command_id: &CommandId,
        instance_id: &InstanceId,
    ) -> Result<InvocationDetail, ControlPlaneError> {
        let start = Instant::now();
        let result = self.inner.get_invocation(command_id, instance_id).await;
        let elapsed_ms = start.elapsed().as_millis() as u64;
        tracing::info_span!("control_plane.get_invocation", %command_id, %instance_id).in_scope(
            || match &result {
                Ok(detail) => tracing::debug!(
                    status = ?detail.status,
                    stdout_len = detail.stdout().map_or(0, str::len),
                    stderr_len = detail.stderr().map_or(0, str::len),
                    elapsed_ms,
                    "fetched"
                ),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "get_invocation failed"),
            },
        );
        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
