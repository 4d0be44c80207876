// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command submission and command-level query shapes.
//!
//! Field names follow the control plane's JSON (PascalCase). Fields this
//! crate does not interpret are kept verbatim in `extra` so a record can be
//! echoed back as diagnostic context without loss.

use crate::status::CommandStatus;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

crate::define_id! {
    /// Identifier assigned to a command by the control plane at submission.
    pub struct CommandId;
}

/// Named document parameters, each with one or more values.
pub type Parameters = IndexMap<String, Vec<String>>;

/// Selector for the managed targets a command is dispatched to.
///
/// `key` is either `InstanceIds` or a tag selector such as `tag:Role`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Target {
    pub key: String,
    pub values: Vec<String>,
}

impl Target {
    pub fn new(
        key: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            key: key.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// Everything needed to submit one command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SendCommandRequest {
    pub document_name: String,
    pub targets: Vec<Target>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Parameters>,
}

impl SendCommandRequest {
    pub fn new(document_name: impl Into<String>, targets: Vec<Target>) -> Self {
        Self {
            document_name: document_name.into(),
            targets,
            parameters: None,
        }
    }

    pub fn with_parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = Some(parameters);
        self
    }
}

/// Response to a submit call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SendCommandOutput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<SubmittedCommand>,
}

impl SendCommandOutput {
    /// The assigned command id, if the response carried a usable one.
    pub fn command_id(&self) -> Option<&CommandId> {
        self.command
            .as_ref()
            .and_then(|c| c.command_id.as_ref())
            .filter(|id| !id.as_str().is_empty())
    }
}

/// The command as echoed back by the submit call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SubmittedCommand {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command_id: Option<CommandId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CommandStatus>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One command as reported by a command-level list query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CommandRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command_id: Option<CommandId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CommandStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_timed_out_count: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CommandRecord {
    pub fn with_status(status: CommandStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

/// Raw result of a command-level list query.
///
/// `commands` is absent when the control plane has nothing to report yet,
/// which is distinct from an empty list only on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListCommandsOutput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commands: Option<Vec<CommandRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ListCommandsOutput {
    pub fn of(records: Vec<CommandRecord>) -> Self {
        Self {
            commands: Some(records),
            ..Self::default()
        }
    }

    /// The first reported record, if any.
    pub fn first(&self) -> Option<&CommandRecord> {
        self.commands.as_deref().and_then(|c| c.first())
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
