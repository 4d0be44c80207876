// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake pipeline adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{PipelineAdapter, PipelineError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Recorded pipeline call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineCall {
    SetOutput { name: String, value: String },
    Info { line: String },
    Warning { line: String },
    StartGroup { title: String },
    EndGroup,
}

/// Fake pipeline adapter for testing
#[derive(Clone, Default)]
pub struct FakePipelineAdapter {
    calls: Arc<Mutex<Vec<PipelineCall>>>,
    broken_groups: Arc<AtomicBool>,
}

impl FakePipelineAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later `start_group` fail with a write error
    pub fn break_groups(&self) {
        self.broken_groups.store(true, Ordering::SeqCst);
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<PipelineCall> {
        self.calls.lock().clone()
    }

    /// Value of the most recent `set_output` for `name`
    pub fn output(&self, name: &str) -> Option<String> {
        self.calls.lock().iter().rev().find_map(|c| match c {
            PipelineCall::SetOutput { name: n, value } if n == name => Some(value.clone()),
            _ => None,
        })
    }

    /// Titles of all opened groups, in order
    pub fn groups(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|c| match c {
                PipelineCall::StartGroup { title } => Some(title.clone()),
                _ => None,
            })
            .collect()
    }

    /// Lines logged with `info`, in order
    pub fn info_lines(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|c| match c {
                PipelineCall::Info { line } => Some(line.clone()),
                _ => None,
            })
            .collect()
    }

    /// Lines logged with `warning`, in order
    pub fn warnings(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|c| match c {
                PipelineCall::Warning { line } => Some(line.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: PipelineCall) -> Result<(), PipelineError> {
        self.calls.lock().push(call);
        Ok(())
    }
}

#[async_trait]
impl PipelineAdapter for FakePipelineAdapter {
    async fn set_output(&self, name: &str, value: &str) -> Result<(), PipelineError> {
        self.record(PipelineCall::SetOutput {
            name: name.to_string(),
            value: value.to_string(),
        })
    }

    async fn info(&self, line: &str) -> Result<(), PipelineError> {
        self.record(PipelineCall::Info {
            line: line.to_string(),
        })
    }

    async fn warning(&self, line: &str) -> Result<(), PipelineError> {
        self.record(PipelineCall::Warning {
            line: line.to_string(),
        })
    }

    async fn start_group(&self, title: &str) -> Result<(), PipelineError> {
        if self.broken_groups.load(Ordering::SeqCst) {
            return Err(PipelineError::Write {
                what: "group start",
                source: std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed"),
            });
        }
        self.record(PipelineCall::StartGroup {
            title: title.to_string(),
        })
    }

    async fn end_group(&self) -> Result<(), PipelineError> {
        self.record(PipelineCall::EndGroup)
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
