// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake control plane for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ControlPlane, ControlPlaneError};
use async_trait::async_trait;
use fc_core::{
    CommandId, InstanceId, InvocationDetail, InvocationFilter, InvocationSummary,
    ListCommandsOutput, ListInvocationsOutput, SendCommandOutput, SendCommandRequest,
    SubmittedCommand,
};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

/// Recorded control plane call
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPlaneCall {
    SendCommand {
        request: SendCommandRequest,
    },
    ListCommands {
        command_id: CommandId,
    },
    ListInvocations {
        command_id: CommandId,
        filter: InvocationFilter,
    },
    GetInvocation {
        command_id: CommandId,
        instance_id: InstanceId,
    },
}

type Scripted<T> = Result<T, String>;

struct FakeControlPlaneState {
    calls: Vec<ControlPlaneCall>,
    send: Scripted<SendCommandOutput>,
    list_commands: VecDeque<Scripted<ListCommandsOutput>>,
    list_invocations: Scripted<ListInvocationsOutput>,
    details: HashMap<InstanceId, Scripted<InvocationDetail>>,
}

/// Fake control plane for testing
///
/// `list_commands` responses are served in the order they were pushed; the
/// last one repeats once the queue is down to it. With nothing pushed the
/// command is reported as not visible yet.
#[derive(Clone)]
pub struct FakeControlPlane {
    inner: Arc<Mutex<FakeControlPlaneState>>,
}

impl Default for FakeControlPlane {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeControlPlaneState {
                calls: Vec::new(),
                send: Ok(SendCommandOutput::default()),
                list_commands: VecDeque::new(),
                list_invocations: Ok(ListInvocationsOutput::default()),
                details: HashMap::new(),
            })),
        }
    }
}

fn scripted<T: Clone>(
    operation: &'static str,
    value: &Scripted<T>,
) -> Result<T, ControlPlaneError> {
    value
        .clone()
        .map_err(|message| ControlPlaneError::CallFailed { operation, message })
}

impl FakeControlPlane {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fake whose submit call assigns `command_id`.
    pub fn with_command_id(command_id: &str) -> Self {
        let fake = Self::new();
        fake.set_send_output(SendCommandOutput {
            command: Some(SubmittedCommand {
                command_id: Some(CommandId::new(command_id)),
                ..SubmittedCommand::default()
            }),
        });
        fake
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<ControlPlaneCall> {
        self.inner.lock().calls.clone()
    }

    /// Number of `list_commands` calls made so far
    pub fn list_commands_count(&self) -> usize {
        self.count(|c| matches!(c, ControlPlaneCall::ListCommands { .. }))
    }

    /// Number of `list_invocations` calls made so far
    pub fn list_invocations_count(&self) -> usize {
        self.count(|c| matches!(c, ControlPlaneCall::ListInvocations { .. }))
    }

    /// Instances fetched with `get_invocation`, in call order
    pub fn fetched_instances(&self) -> Vec<InstanceId> {
        self.inner
            .lock()
            .calls
            .iter()
            .filter_map(|c| match c {
                ControlPlaneCall::GetInvocation { instance_id, .. } => Some(instance_id.clone()),
                _ => None,
            })
            .collect()
    }

    fn count(&self, pred: impl Fn(&ControlPlaneCall) -> bool) -> usize {
        self.inner.lock().calls.iter().filter(|c| pred(c)).count()
    }

    pub fn set_send_output(&self, output: SendCommandOutput) {
        self.inner.lock().send = Ok(output);
    }

    pub fn fail_send(&self, message: &str) {
        self.inner.lock().send = Err(message.to_string());
    }

    /// Queue the next `list_commands` response
    pub fn push_list_commands(&self, output: ListCommandsOutput) {
        self.inner.lock().list_commands.push_back(Ok(output));
    }

    /// Queue a failing `list_commands` response
    pub fn push_list_commands_error(&self, message: &str) {
        self.inner
            .lock()
            .list_commands
            .push_back(Err(message.to_string()));
    }

    pub fn set_invocations(&self, output: ListInvocationsOutput) {
        self.inner.lock().list_invocations = Ok(output);
    }

    pub fn fail_list_invocations(&self, message: &str) {
        self.inner.lock().list_invocations = Err(message.to_string());
    }

    pub fn set_detail(&self, detail: InvocationDetail) {
        if let Some(instance_id) = detail.instance_id.clone() {
            self.inner.lock().details.insert(instance_id, Ok(detail));
        }
    }

    pub fn fail_detail(&self, instance_id: &str, message: &str) {
        self.inner
            .lock()
            .details
            .insert(InstanceId::new(instance_id), Err(message.to_string()));
    }

    /// Report `details` as the failed invocations of `command_id`, in order.
    pub fn set_failed_invocations(&self, command_id: &CommandId, details: Vec<InvocationDetail>) {
        let summaries = details
            .iter()
            .filter_map(|d| d.instance_id.clone())
            .map(|id| InvocationSummary::for_instance(command_id, id))
            .collect();
        self.set_invocations(ListInvocationsOutput::of(summaries));
        for detail in details {
            self.set_detail(detail);
        }
    }
}

#[async_trait]
impl ControlPlane for FakeControlPlane {
    async fn send_command(
        &self,
        request: &SendCommandRequest,
    ) -> Result<SendCommandOutput, ControlPlaneError> {
        let mut inner = self.inner.lock();
        inner.calls.push(ControlPlaneCall::SendCommand {
            request: request.clone(),
        });
        scripted("send-command", &inner.send)
    }

    async fn list_commands(
        &self,
        command_id: &CommandId,
    ) -> Result<ListCommandsOutput, ControlPlaneError> {
        let mut inner = self.inner.lock();
        inner.calls.push(ControlPlaneCall::ListCommands {
            command_id: command_id.clone(),
        });
        let next = if inner.list_commands.len() > 1 {
            inner.list_commands.pop_front()
        } else {
            inner.list_commands.front().cloned()
        };
        match next {
            Some(response) => scripted("list-commands", &response),
            None => Ok(ListCommandsOutput::default()),
        }
    }

    async fn list_invocations(
        &self,
        command_id: &CommandId,
        filter: InvocationFilter,
    ) -> Result<ListInvocationsOutput, ControlPlaneError> {
        let mut inner = self.inner.lock();
        inner.calls.push(ControlPlaneCall::ListInvocations {
            command_id: command_id.clone(),
            filter,
        });
        scripted("list-command-invocations", &inner.list_invocations)
    }

    async fn get_invocation(
        &self,
        command_id: &CommandId,
        instance_id: &InstanceId,
    ) -> Result<InvocationDetail, ControlPlaneError> {
        let mut inner = self.inner.lock();
        inner.calls.push(ControlPlaneCall::GetInvocation {
            command_id: command_id.clone(),
            instance_id: instance_id.clone(),
        });
        match inner.details.get(instance_id) {
            Some(detail) => scripted("get-command-invocation", detail),
            None => Err(ControlPlaneError::CallFailed {
                operation: "get-command-invocation",
                message: format!("InvocationDoesNotExist: {}", instance_id),
            }),
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
