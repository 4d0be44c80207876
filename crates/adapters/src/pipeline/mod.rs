// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline step adapters: step outputs and grouped log lines
//!
//! The consuming pipeline reads these, so they stay separate from tracing.

mod github;
mod plain;

pub use github::GithubActionsAdapter;
pub use plain::PlainPipelineAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakePipelineAdapter, PipelineCall};

use async_trait::async_trait;
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;
use thiserror::Error;

/// Errors from pipeline operations
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to write {what}: {source}")]
    Write {
        what: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    fn write(what: &'static str) -> impl FnOnce(std::io::Error) -> Self {
        move |source| PipelineError::Write { what, source }
    }
}

/// Adapter for reporting to the pipeline that runs this step
#[async_trait]
pub trait PipelineAdapter: Clone + Send + Sync + 'static {
    /// Publish a named step output
    async fn set_output(&self, name: &str, value: &str) -> Result<(), PipelineError>;

    /// Emit one informational line
    async fn info(&self, line: &str) -> Result<(), PipelineError>;

    /// Emit one warning line
    async fn warning(&self, line: &str) -> Result<(), PipelineError>;

    /// Open a named, collapsible group of lines
    async fn start_group(&self, title: &str) -> Result<(), PipelineError>;

    /// Close the most recently opened group
    async fn end_group(&self) -> Result<(), PipelineError>;
}

/// Shared line sink used by the writing adapters.
#[derive(Clone)]
pub(crate) struct Sink {
    out: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Sink {
    pub(crate) fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }

    pub(crate) fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Arc::new(Mutex::new(out)),
        }
    }

    pub(crate) fn line(&self, what: &'static str, line: &str) -> Result<(), PipelineError> {
        let mut out = self.out.lock();
        writeln!(out, "{}", line).map_err(PipelineError::write(what))?;
        out.flush().map_err(PipelineError::write(what))
    }
}
