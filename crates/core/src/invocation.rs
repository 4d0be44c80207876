// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-target invocation shapes.
//!
//! Invocations only appear once the control plane has dispatched a command
//! to its targets, so they are read after the fact and never polled.

use crate::command::CommandId;
use crate::status::CommandStatus;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

crate::define_id! {
    /// Identifier of one managed target.
    pub struct InstanceId;
}

/// Server-side filter for an invocation listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationFilter {
    All,
    Status(CommandStatus),
}

impl InvocationFilter {
    pub fn failed() -> Self {
        Self::Status(CommandStatus::Failed)
    }
}

/// One row of an invocation listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InvocationSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command_id: Option<CommandId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<InstanceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CommandStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_details: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl InvocationSummary {
    pub fn for_instance(command_id: &CommandId, instance_id: impl Into<InstanceId>) -> Self {
        Self {
            command_id: Some(command_id.clone()),
            instance_id: Some(instance_id.into()),
            ..Self::default()
        }
    }
}

/// Raw result of an invocation listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListInvocationsOutput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command_invocations: Option<Vec<InvocationSummary>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

impl ListInvocationsOutput {
    pub fn of(invocations: Vec<InvocationSummary>) -> Self {
        Self {
            command_invocations: Some(invocations),
            next_token: None,
        }
    }

    pub fn invocations(&self) -> &[InvocationSummary] {
        self.command_invocations.as_deref().unwrap_or_default()
    }
}

/// Full result of one command on one target, including its output streams.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InvocationDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command_id: Option<CommandId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<InstanceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CommandStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_code: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard_output_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard_error_content: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl InvocationDetail {
    /// Standard output, if the target produced any.
    pub fn stdout(&self) -> Option<&str> {
        self.standard_output_content
            .as_deref()
            .filter(|s| !s.is_empty())
    }

    /// Standard error, if the target produced any.
    pub fn stderr(&self) -> Option<&str> {
        self.standard_error_content
            .as_deref()
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
#[path = "invocation_tests.rs"]
mod tests;
