// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON-valued step inputs

use fc_core::{Parameters, Target};
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Input required and not supplied: {0}")]
    Missing(&'static str),
    #[error("Input {name} is not a valid JSON: {source}")]
    InvalidJson {
        name: &'static str,
        source: serde_json::Error,
    },
}

/// Parse a JSON input. An empty or absent value is `None`.
pub fn json_input<T: DeserializeOwned>(
    name: &'static str,
    raw: Option<&str>,
) -> Result<Option<T>, InputError> {
    let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
        return Ok(None);
    };
    serde_json::from_str(raw)
        .map(Some)
        .map_err(|source| InputError::InvalidJson { name, source })
}

pub fn targets(raw: Option<&str>) -> Result<Vec<Target>, InputError> {
    json_input("targets", raw)?.ok_or(InputError::Missing("targets"))
}

pub fn parameters(raw: Option<&str>) -> Result<Option<Parameters>, InputError> {
    json_input("parameters", raw)
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod tests;
