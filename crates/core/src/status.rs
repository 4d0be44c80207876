// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execution status vocabulary and the wait policy over it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Execution status reported by the control plane.
///
/// Commands and per-target invocations share this vocabulary. `Delayed` is
/// only ever reported for invocations (the target asked to be retried later).
/// Any other value fails deserialization of the whole response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandStatus {
    Pending,
    InProgress,
    Delayed,
    Success,
    Cancelling,
    Cancelled,
    Failed,
    TimedOut,
}

impl CommandStatus {
    /// Wire name of the status, as used in list filters.
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandStatus::Pending => "Pending",
            CommandStatus::InProgress => "InProgress",
            CommandStatus::Delayed => "Delayed",
            CommandStatus::Success => "Success",
            CommandStatus::Cancelling => "Cancelling",
            CommandStatus::Cancelled => "Cancelled",
            CommandStatus::Failed => "Failed",
            CommandStatus::TimedOut => "TimedOut",
        }
    }

    /// True once the control plane will not change this status again.
    pub fn is_terminal(&self) -> bool {
        classify(*self) != WaiterState::Retry
    }
}

impl fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decision taken after one poll of the control plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaiterState {
    /// Still executing; poll again.
    Retry,
    /// Finished and satisfied.
    Success,
    /// Finished and not satisfied.
    Failure,
}

impl fmt::Display for WaiterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WaiterState::Retry => "retry",
            WaiterState::Success => "success",
            WaiterState::Failure => "failure",
        };
        f.write_str(s)
    }
}

/// Map a single status to the waiter decision.
pub fn classify(status: CommandStatus) -> WaiterState {
    match status {
        CommandStatus::Pending | CommandStatus::InProgress | CommandStatus::Delayed => {
            WaiterState::Retry
        }
        CommandStatus::Success => WaiterState::Success,
        CommandStatus::Cancelling
        | CommandStatus::Cancelled
        | CommandStatus::Failed
        | CommandStatus::TimedOut => WaiterState::Failure,
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
