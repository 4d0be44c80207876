// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Submit, wait, and report failures

use crate::failures::{collect_failed_invocations, CollectionPolicy, FailedInvocations};
use crate::waiter::{wait_until_command_executed, WaitError};
use fc_adapters::{ControlPlane, ControlPlaneError, PipelineAdapter, PipelineError};
use fc_core::{CommandId, SendCommandRequest, WaitConfig, WaitOutcome};
use thiserror::Error;

/// Pipeline output the command id is published under
pub const COMMAND_ID_OUTPUT: &str = "command-id";

/// Submission did not produce a command id.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("failed to send command: {0}")]
    Call(#[from] ControlPlaneError),
    #[error("No command ID returned")]
    NoCommandId,
}

/// Errors that end a run
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Submission(#[from] SubmissionError),
    #[error(transparent)]
    Wait(#[from] WaitError),
    #[error("pipeline error: {0}")]
    Pipeline(#[from] PipelineError),
}

/// How to wait for the submitted command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    pub config: WaitConfig,
    /// Emit per-target output when the wait fails
    pub log_failed_invocations: bool,
    pub policy: CollectionPolicy,
}

impl WaitOptions {
    pub fn new(config: WaitConfig) -> Self {
        Self {
            config,
            log_failed_invocations: false,
            policy: CollectionPolicy::default(),
        }
    }

    pub fn log_failed_invocations(mut self, enabled: bool) -> Self {
        self.log_failed_invocations = enabled;
        self
    }

    pub fn with_policy(mut self, policy: CollectionPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// One run: the command to send and, optionally, how to wait for it.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub command: SendCommandRequest,
    pub wait: Option<WaitOptions>,
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub command_id: CommandId,
    /// Final observation, present when the run waited
    pub outcome: Option<WaitOutcome>,
}

/// Drives one command from submission to completion
pub struct Runner<C, P> {
    client: C,
    pipeline: P,
}

impl<C: ControlPlane, P: PipelineAdapter> Runner<C, P> {
    pub fn new(client: C, pipeline: P) -> Self {
        Self { client, pipeline }
    }

    pub async fn run(&self, request: &RunRequest) -> Result<RunOutcome, RunError> {
        // Reject bad wait settings before anything reaches the fleet
        if let Some(wait) = &request.wait {
            wait.config.validate().map_err(WaitError::from)?;
        }

        let command_id = self.submit(&request.command).await?;

        let Some(wait) = &request.wait else {
            return Ok(RunOutcome {
                command_id,
                outcome: None,
            });
        };

        self.pipeline
            .info(&format!("Waiting for command {} to complete", command_id))
            .await?;

        match wait_until_command_executed(&self.client, &wait.config, &command_id).await {
            Ok(outcome) => {
                tracing::info!(%command_id, "command executed");
                Ok(RunOutcome {
                    command_id,
                    outcome: Some(outcome),
                })
            }
            Err(err) => {
                tracing::warn!(%command_id, error = %err, "wait failed");
                if wait.log_failed_invocations {
                    if let Err(report_err) = self.report_failures(&command_id, wait.policy).await {
                        tracing::warn!(
                            %command_id,
                            error = %report_err,
                            "failed to report failed invocations"
                        );
                    }
                }
                Err(err.into())
            }
        }
    }

    async fn submit(&self, request: &SendCommandRequest) -> Result<CommandId, RunError> {
        let output = self
            .client
            .send_command(request)
            .await
            .map_err(SubmissionError::from)?;
        let command_id = output
            .command_id()
            .cloned()
            .ok_or(SubmissionError::NoCommandId)?;

        self.pipeline
            .info(&format!("Sent command {}", command_id))
            .await?;
        self.pipeline
            .set_output(COMMAND_ID_OUTPUT, command_id.as_str())
            .await?;
        Ok(command_id)
    }

    /// Emit one group per failed target.
    ///
    /// Collection failures become pipeline warnings. Any error returned here
    /// is only logged by the caller; the wait error is what `run` returns.
    async fn report_failures(
        &self,
        command_id: &CommandId,
        policy: CollectionPolicy,
    ) -> Result<(), PipelineError> {
        let FailedInvocations { details, errors } =
            match collect_failed_invocations(&self.client, command_id, policy).await {
                Ok(collected) => collected,
                Err(err) => {
                    tracing::warn!(%command_id, error = %err, "failure collection failed");
                    return self.pipeline.warning(&err.to_string()).await;
                }
            };

        for detail in &details {
            let Some(instance_id) = &detail.instance_id else {
                continue;
            };
            self.pipeline
                .start_group(&format!("Output of {}", instance_id))
                .await?;
            for content in [detail.stdout(), detail.stderr()].into_iter().flatten() {
                self.pipeline.info(content).await?;
            }
            self.pipeline.end_group().await?;
        }

        for err in &errors {
            self.pipeline.warning(&err.to_string()).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
