// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command-level completion waiting.
//!
//! Polls the fleet-wide status of a command (not a single target's
//! invocation) until it reaches a terminal state or the wait budget runs out.

use crate::backoff::Backoff;
use fc_adapters::{ControlPlane, ControlPlaneError};
use fc_core::{evaluate, CommandId, ConfigError, WaitConfig, WaitOutcome, WaiterState};
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;

/// Errors from waiting on a command
#[derive(Debug, Error)]
pub enum WaitError {
    #[error("invalid wait configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(
        "timed out after {}s waiting for command {command_id} ({})",
        .elapsed.as_secs(),
        .outcome.summary()
    )]
    Timeout {
        command_id: CommandId,
        elapsed: Duration,
        /// Last observed poll result.
        outcome: WaitOutcome,
    },
    #[error("command {command_id} failed ({})", .outcome.summary())]
    Failure {
        command_id: CommandId,
        /// The poll result that reported the terminal failure.
        outcome: WaitOutcome,
    },
    #[error("polling command {command_id} failed: {source}")]
    Query {
        command_id: CommandId,
        source: ControlPlaneError,
    },
}

impl WaitError {
    /// The poll result attached to a timeout or failure.
    pub fn outcome(&self) -> Option<&WaitOutcome> {
        match self {
            WaitError::Timeout { outcome, .. } | WaitError::Failure { outcome, .. } => {
                Some(outcome)
            }
            WaitError::Config(_) | WaitError::Query { .. } => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, WaitError::Timeout { .. })
    }
}

/// Wait until `command_id` finishes on every target it was dispatched to.
///
/// The first poll happens immediately. `Success` returns the outcome,
/// `Failure` stops polling at once. While the command is still running the
/// next delay comes from [`Backoff`]; if sleeping it would cross
/// `max_wait_time` the wait gives up with [`WaitError::Timeout`] instead.
/// Control plane errors are not retried.
pub async fn wait_until_command_executed<C: ControlPlane>(
    client: &C,
    config: &WaitConfig,
    command_id: &CommandId,
) -> Result<WaitOutcome, WaitError> {
    config.validate()?;

    let start = Instant::now();
    // A budget past the clock's range means no deadline
    let deadline = start.checked_add(config.max_wait_time);
    let mut backoff = Backoff::new(config);
    let mut outcome = poll(client, command_id).await?;

    loop {
        match outcome.state {
            WaiterState::Success => {
                tracing::info!(
                    %command_id,
                    polls = backoff.attempt() + 1,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "command succeeded"
                );
                return Ok(outcome);
            }
            WaiterState::Failure => {
                tracing::warn!(%command_id, reason = %outcome.summary(), "command failed");
                return Err(WaitError::Failure {
                    command_id: command_id.clone(),
                    outcome,
                });
            }
            WaiterState::Retry => {}
        }

        let delay = backoff.next_delay();
        let out_of_budget = match (deadline, Instant::now().checked_add(delay)) {
            (Some(deadline), Some(next_poll)) => next_poll > deadline,
            (Some(_), None) => true,
            (None, _) => false,
        };
        if out_of_budget {
            let elapsed = start.elapsed();
            tracing::warn!(
                %command_id,
                elapsed_ms = elapsed.as_millis() as u64,
                reason = %outcome.summary(),
                "gave up waiting"
            );
            return Err(WaitError::Timeout {
                command_id: command_id.clone(),
                elapsed,
                outcome,
            });
        }

        tracing::debug!(
            %command_id,
            attempt = backoff.attempt(),
            delay_ms = delay.as_millis() as u64,
            "command still running"
        );
        tokio::time::sleep(delay).await;
        outcome = poll(client, command_id).await?;
    }
}

async fn poll<C: ControlPlane>(
    client: &C,
    command_id: &CommandId,
) -> Result<WaitOutcome, WaitError> {
    let result = client
        .list_commands(command_id)
        .await
        .map_err(|source| WaitError::Query {
            command_id: command_id.clone(),
            source,
        })?;
    Ok(evaluate(&result))
}

#[cfg(test)]
#[path = "waiter_tests.rs"]
mod tests;
