// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Systems-management control plane adapters

mod aws_cli;

pub use aws_cli::AwsCliControlPlane;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{ControlPlaneCall, FakeControlPlane};

use async_trait::async_trait;
use fc_core::{
    CommandId, InstanceId, InvocationDetail, InvocationFilter, ListCommandsOutput,
    ListInvocationsOutput, SendCommandOutput, SendCommandRequest,
};
use thiserror::Error;

/// Errors from control plane calls
#[derive(Debug, Error)]
pub enum ControlPlaneError {
    #[error("{operation} could not be called: {message}")]
    Unavailable {
        operation: &'static str,
        message: String,
    },
    #[error("{operation} failed: {message}")]
    CallFailed {
        operation: &'static str,
        message: String,
    },
    #[error("{operation} returned an unreadable response: {message}")]
    Decode {
        operation: &'static str,
        message: String,
    },
}

impl ControlPlaneError {
    pub fn operation(&self) -> &'static str {
        match self {
            ControlPlaneError::Unavailable { operation, .. }
            | ControlPlaneError::CallFailed { operation, .. }
            | ControlPlaneError::Decode { operation, .. } => operation,
        }
    }
}

/// Adapter for the control plane that owns commands and their invocations.
///
/// Every call is a single request/response; implementations never retry.
#[async_trait]
pub trait ControlPlane: Clone + Send + Sync + 'static {
    /// Submit a command to the selected targets
    async fn send_command(
        &self,
        request: &SendCommandRequest,
    ) -> Result<SendCommandOutput, ControlPlaneError>;

    /// Fleet-wide status of one command
    async fn list_commands(
        &self,
        command_id: &CommandId,
    ) -> Result<ListCommandsOutput, ControlPlaneError>;

    /// Per-target invocations of one command, filtered server-side
    async fn list_invocations(
        &self,
        command_id: &CommandId,
        filter: InvocationFilter,
    ) -> Result<ListInvocationsOutput, ControlPlaneError>;

    /// Full result of one command on one target
    async fn get_invocation(
        &self,
        command_id: &CommandId,
        instance_id: &InstanceId,
    ) -> Result<InvocationDetail, ControlPlaneError>;
}
