// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Plain-text pipeline adapter for terminals and generic CI runners.

use super::{PipelineAdapter, PipelineError, Sink};
use async_trait::async_trait;
use std::io::Write;

/// Prints outputs as `name=value` lines and groups as `== title ==` headers.
#[derive(Clone)]
pub struct PlainPipelineAdapter {
    sink: Sink,
}

impl Default for PlainPipelineAdapter {
    fn default() -> Self {
        Self {
            sink: Sink::stdout(),
        }
    }
}

impl PlainPipelineAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_writer(out: Box<dyn Write + Send>) -> Self {
        Self {
            sink: Sink::new(out),
        }
    }
}

#[async_trait]
impl PipelineAdapter for PlainPipelineAdapter {
    async fn set_output(&self, name: &str, value: &str) -> Result<(), PipelineError> {
        self.sink.line("step output", &format!("{}={}", name, value))
    }

    async fn info(&self, line: &str) -> Result<(), PipelineError> {
        self.sink.line("log line", line)
    }

    async fn warning(&self, line: &str) -> Result<(), PipelineError> {
        self.sink.line("warning", &format!("warning: {}", line))
    }

    async fn start_group(&self, title: &str) -> Result<(), PipelineError> {
        self.sink.line("group", &format!("== {} ==", title))
    }

    async fn end_group(&self) -> Result<(), PipelineError> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "plain_tests.rs"]
mod tests;
