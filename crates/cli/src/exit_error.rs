// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors that carry an explicit process exit code

use std::fmt;

/// Command failed (also the default for unclassified errors)
pub const EXIT_FAILURE: i32 = 1;
/// Waiting ran out of time
pub const EXIT_TIMEOUT: i32 = 2;
/// Inputs could not be used (EX_USAGE)
pub const EXIT_USAGE: i32 = 64;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ExitError {}
