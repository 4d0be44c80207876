// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! GitHub Actions workflow command adapter

use super::{PipelineAdapter, PipelineError, Sink};
use async_trait::async_trait;
use std::io::Write;
use std::path::PathBuf;

/// Reports through workflow commands on stdout.
///
/// Step outputs are appended to the `GITHUB_OUTPUT` file when the runner
/// provides one, otherwise they are printed as `::set-output` commands.
#[derive(Clone)]
pub struct GithubActionsAdapter {
    sink: Sink,
    output_file: Option<PathBuf>,
}

impl Default for GithubActionsAdapter {
    fn default() -> Self {
        Self {
            sink: Sink::stdout(),
            output_file: crate::env::github_output_path(),
        }
    }
}

impl GithubActionsAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adapter writing to `out` instead of stdout.
    pub fn with_writer(out: Box<dyn Write + Send>, output_file: Option<PathBuf>) -> Self {
        Self {
            sink: Sink::new(out),
            output_file,
        }
    }
}

/// Escape data for a workflow command (`%`, CR and LF are significant).
pub(crate) fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Format a `name=value` output entry, using the heredoc form for multi-line values.
pub(crate) fn output_entry(name: &str, value: &str) -> String {
    if value.contains('\n') {
        let mut delimiter = "ghadelimiter_fleetcmd".to_string();
        while value.contains(&delimiter) {
            delimiter.push('_');
        }
        format!("{name}<<{delimiter}\n{value}\n{delimiter}\n")
    } else {
        format!("{name}={value}\n")
    }
}

#[async_trait]
impl PipelineAdapter for GithubActionsAdapter {
    async fn set_output(&self, name: &str, value: &str) -> Result<(), PipelineError> {
        match &self.output_file {
            Some(path) => {
                let mut file = std::fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(PipelineError::write("step output"))?;
                file.write_all(output_entry(name, value).as_bytes())
                    .map_err(PipelineError::write("step output"))
            }
            None => self.sink.line(
                "step output",
                &format!("::set-output name={}::{}", name, escape_data(value)),
            ),
        }
    }

    async fn info(&self, line: &str) -> Result<(), PipelineError> {
        self.sink.line("log line", line)
    }

    async fn warning(&self, line: &str) -> Result<(), PipelineError> {
        self.sink
            .line("warning", &format!("::warning::{}", escape_data(line)))
    }

    async fn start_group(&self, title: &str) -> Result<(), PipelineError> {
        self.sink
            .line("group", &format!("::group::{}", escape_data(title)))
    }

    async fn end_group(&self) -> Result<(), PipelineError> {
        self.sink.line("group", "::endgroup::")
    }
}

#[cfg(test)]
#[path = "github_tests.rs"]
mod tests;
