// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the adapters crate.

use std::path::PathBuf;
use std::time::Duration;

fn parse_duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

/// Executable used to reach the control plane (default: `aws` on PATH).
pub fn aws_binary() -> PathBuf {
    std::env::var("FLEETCMD_AWS_BINARY")
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("aws"))
}

/// Per-call control plane timeout (default: 30000ms).
pub fn aws_timeout() -> Duration {
    parse_duration_ms("FLEETCMD_AWS_TIMEOUT_MS").unwrap_or(crate::subprocess::AWS_CLI_TIMEOUT)
}

/// File the pipeline reads step outputs from, if the runner provides one.
pub fn github_output_path() -> Option<PathBuf> {
    std::env::var("GITHUB_OUTPUT")
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}
