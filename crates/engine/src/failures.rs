// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-target failure diagnostics for a command.

use fc_adapters::{ControlPlane, ControlPlaneError};
use fc_core::{CommandId, InstanceId, InvocationDetail, InvocationFilter};
use thiserror::Error;

/// What to do when fetching one target's detail fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CollectionPolicy {
    /// Abandon the collection on the first failed fetch.
    #[default]
    FailFast,
    /// Keep going and report failed fetches alongside the details.
    Partial,
}

/// Fetching one target's invocation detail failed.
#[derive(Debug, Error)]
#[error("failed to fetch output of {instance_id}: {source}")]
pub struct DetailFetchError {
    pub instance_id: InstanceId,
    pub source: ControlPlaneError,
}

/// Errors from collecting failure diagnostics
#[derive(Debug, Error)]
pub enum CollectError {
    #[error("failed to list failed invocations of command {command_id}: {source}")]
    List {
        command_id: CommandId,
        source: ControlPlaneError,
    },
    #[error(transparent)]
    DetailFetch(#[from] DetailFetchError),
}

/// Details of every failed target, in listing order.
#[derive(Debug, Default)]
pub struct FailedInvocations {
    pub details: Vec<InvocationDetail>,
    /// Fetches that failed; only populated under [`CollectionPolicy::Partial`].
    pub errors: Vec<DetailFetchError>,
}

impl FailedInvocations {
    pub fn is_empty(&self) -> bool {
        self.details.is_empty() && self.errors.is_empty()
    }
}

/// List the failed invocations of `command_id` and fetch each one's detail.
///
/// Fetches run one at a time in the order the listing returned them.
/// Listed invocations without an instance id are skipped.
pub async fn collect_failed_invocations<C: ControlPlane>(
    client: &C,
    command_id: &CommandId,
    policy: CollectionPolicy,
) -> Result<FailedInvocations, CollectError> {
    let listing = client
        .list_invocations(command_id, InvocationFilter::failed())
        .await
        .map_err(|source| CollectError::List {
            command_id: command_id.clone(),
            source,
        })?;

    let mut collected = FailedInvocations::default();
    for instance_id in listing
        .invocations()
        .iter()
        .filter_map(|i| i.instance_id.as_ref())
    {
        match client.get_invocation(command_id, instance_id).await {
            Ok(detail) => collected.details.push(detail),
            Err(source) => {
                let err = DetailFetchError {
                    instance_id: instance_id.clone(),
                    source,
                };
                match policy {
                    CollectionPolicy::FailFast => return Err(err.into()),
                    CollectionPolicy::Partial => collected.errors.push(err),
                }
            }
        }
    }

    tracing::info!(
        %command_id,
        listed = listing.invocations().len(),
        fetched = collected.details.len(),
        fetch_errors = collected.errors.len(),
        "collected failed invocations"
    );
    Ok(collected)
}

#[cfg(test)]
#[path = "failures_tests.rs"]
mod tests;
