// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wait outcome derivation and wait budget configuration.

use crate::command::ListCommandsOutput;
use crate::status::{classify, WaiterState};
use std::time::Duration;
use thiserror::Error;

/// Shortest delay between polls unless overridden.
pub const DEFAULT_MIN_DELAY: Duration = Duration::from_secs(5);

/// Longest delay between polls unless overridden.
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(120);

/// Result of one poll: the decision plus the raw query result behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct WaitOutcome {
    pub state: WaiterState,
    pub reason: ListCommandsOutput,
}

impl WaitOutcome {
    /// One-line description of the reason, for error messages.
    pub fn summary(&self) -> String {
        let Some(record) = self.reason.first() else {
            return "no command record".to_string();
        };

        let mut parts = Vec::new();
        match record.status {
            Some(status) => parts.push(format!("status={status}")),
            None => parts.push("status=unknown".to_string()),
        }
        if let Some(details) = &record.status_details {
            parts.push(format!("details={details}"));
        }
        if let Some(n) = record.target_count {
            parts.push(format!("targets={n}"));
        }
        if let Some(n) = record.completed_count {
            parts.push(format!("completed={n}"));
        }
        if let Some(n) = record.error_count {
            parts.push(format!("errors={n}"));
        }
        if let Some(n) = record.delivery_timed_out_count.filter(|n| *n > 0) {
            parts.push(format!("undelivered={n}"));
        }
        parts.join(" ")
    }
}

/// Derive the wait decision from a command-level list query.
///
/// Only the first record is considered. A missing record or a record with
/// no status yet means the command is not visible to the query so far, so
/// the decision is `Retry`. The query result is kept unchanged as the reason.
pub fn evaluate(result: &ListCommandsOutput) -> WaitOutcome {
    let state = match result.first() {
        Some(record) => record.status.map_or(WaiterState::Retry, classify),
        None => WaiterState::Retry,
    };
    WaitOutcome {
        state,
        reason: result.clone(),
    }
}

/// Errors from an unusable wait budget
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be greater than 0")]
    NotPositive(&'static str),
    #[error("max delay ({max:?}) must not be less than min delay ({min:?})")]
    MaxDelayBelowMinDelay { min: Duration, max: Duration },
    #[error("max wait time ({max_wait_time:?}) must be greater than min delay ({min:?})")]
    MaxWaitTimeTooShort {
        min: Duration,
        max_wait_time: Duration,
    },
}

/// Timing budget for one wait.
///
/// A plain value: each wait owns its own copy, so waits with different
/// budgets never share timing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitConfig {
    pub min_delay: Duration,
    pub max_delay: Duration,
    pub max_wait_time: Duration,
}

impl WaitConfig {
    /// Budget with the control plane's default delay bounds.
    pub fn new(max_wait_time: Duration) -> Self {
        Self {
            min_delay: DEFAULT_MIN_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
            max_wait_time,
        }
    }

    pub fn with_min_delay(mut self, min_delay: Duration) -> Self {
        self.min_delay = min_delay;
        self
    }

    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_wait_time.is_zero() {
            return Err(ConfigError::NotPositive("max wait time"));
        }
        if self.min_delay.is_zero() {
            return Err(ConfigError::NotPositive("min delay"));
        }
        if self.max_delay.is_zero() {
            return Err(ConfigError::NotPositive("max delay"));
        }
        if self.max_delay < self.min_delay {
            return Err(ConfigError::MaxDelayBelowMinDelay {
                min: self.min_delay,
                max: self.max_delay,
            });
        }
        if self.max_wait_time <= self.min_delay {
            return Err(ConfigError::MaxWaitTimeTooShort {
                min: self.min_delay,
                max_wait_time: self.max_wait_time,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "waiter_tests.rs"]
mod tests;
