// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Control plane adapter backed by the `aws ssm` command line client

use super::{ControlPlane, ControlPlaneError};
use crate::subprocess::run_with_timeout;
use async_trait::async_trait;
use fc_core::{
    CommandId, InstanceId, InvocationDetail, InvocationFilter, ListCommandsOutput,
    ListInvocationsOutput, SendCommandOutput, SendCommandRequest,
};
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use std::time::Duration;
use tokio::process::Command;

/// Runs `aws ssm <operation> --output json` for every call.
///
/// Credentials and endpoint resolution are left entirely to the aws client
/// (environment, profile, instance role).
#[derive(Clone, Debug)]
pub struct AwsCliControlPlane {
    binary: PathBuf,
    region: Option<String>,
    profile: Option<String>,
    timeout: Duration,
}

impl Default for AwsCliControlPlane {
    fn default() -> Self {
        Self {
            binary: crate::env::aws_binary(),
            region: None,
            profile: None,
            timeout: crate::env::aws_timeout(),
        }
    }
}

impl AwsCliControlPlane {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    pub fn with_region(mut self, region: Option<String>) -> Self {
        self.region = region;
        self
    }

    pub fn with_profile(mut self, profile: Option<String>) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full argument list for one `aws ssm` operation.
    pub(crate) fn args(&self, operation: &str, extra: Vec<String>) -> Vec<String> {
        let mut args = vec!["ssm".to_string(), operation.to_string()];
        args.extend(extra);
        args.extend(["--output".to_string(), "json".to_string()]);
        args.push("--no-cli-pager".to_string());
        if let Some(region) = &self.region {
            args.extend(["--region".to_string(), region.clone()]);
        }
        if let Some(profile) = &self.profile {
            args.extend(["--profile".to_string(), profile.clone()]);
        }
        args
    }

    async fn call<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        extra: Vec<String>,
    ) -> Result<T, ControlPlaneError> {
        let mut cmd = Command::new(&self.binary);
        cmd.args(self.args(operation, extra));

        let description = format!("aws ssm {}", operation);
        let output = run_with_timeout(cmd, self.timeout, &description)
            .await
            .map_err(|message| ControlPlaneError::Unavailable { operation, message })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ControlPlaneError::CallFailed {
                operation,
                message: stderr.trim().to_string(),
            });
        }

        decode(operation, &output.stdout)
    }
}

fn decode<T: DeserializeOwned>(
    operation: &'static str,
    stdout: &[u8],
) -> Result<T, ControlPlaneError> {
    serde_json::from_slice(stdout).map_err(|e| ControlPlaneError::Decode {
        operation,
        message: e.to_string(),
    })
}

fn to_json<T: serde::Serialize>(
    operation: &'static str,
    value: &T,
) -> Result<String, ControlPlaneError> {
    serde_json::to_string(value).map_err(|e| ControlPlaneError::Unavailable {
        operation,
        message: format!("could not encode request: {}", e),
    })
}

/// Arguments for `send-command`, encoding targets and parameters as JSON.
pub(crate) fn send_command_args(
    request: &SendCommandRequest,
) -> Result<Vec<String>, ControlPlaneError> {
    let mut args = vec![
        "--document-name".to_string(),
        request.document_name.clone(),
        "--targets".to_string(),
        to_json("send-command", &request.targets)?,
    ];
    if let Some(parameters) = &request.parameters {
        args.extend([
            "--parameters".to_string(),
            to_json("send-command", parameters)?,
        ]);
    }
    Ok(args)
}

/// Arguments for `list-command-invocations`.
pub(crate) fn list_invocations_args(
    command_id: &CommandId,
    filter: InvocationFilter,
) -> Vec<String> {
    let mut args = vec!["--command-id".to_string(), command_id.to_string()];
    if let InvocationFilter::Status(status) = filter {
        args.extend([
            "--filters".to_string(),
            format!("key=Status,value={}", status),
        ]);
    }
    args
}

#[async_trait]
impl ControlPlane for AwsCliControlPlane {
    async fn send_command(
        &self,
        request: &SendCommandRequest,
    ) -> Result<SendCommandOutput, ControlPlaneError> {
        let args = send_command_args(request)?;
        self.call("send-command", args).await
    }

    async fn list_commands(
        &self,
        command_id: &CommandId,
    ) -> Result<ListCommandsOutput, ControlPlaneError> {
        self.call(
            "list-commands",
            vec!["--command-id".to_string(), command_id.to_string()],
        )
        .await
    }

    async fn list_invocations(
        &self,
        command_id: &CommandId,
        filter: InvocationFilter,
    ) -> Result<ListInvocationsOutput, ControlPlaneError> {
        self.call(
            "list-command-invocations",
            list_invocations_args(command_id, filter),
        )
        .await
    }

    async fn get_invocation(
        &self,
        command_id: &CommandId,
        instance_id: &InstanceId,
    ) -> Result<InvocationDetail, ControlPlaneError> {
        self.call(
            "get-command-invocation",
            vec![
                "--command-id".to_string(),
                command_id.to_string(),
                "--instance-id".to_string(),
                instance_id.to_string(),
            ],
        )
        .await
    }
}

#[cfg(test)]
#[path = "aws_cli_tests.rs"]
mod tests;
