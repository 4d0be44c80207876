// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external I/O

pub mod control_plane;
mod env;
pub mod pipeline;
pub mod subprocess;
pub mod traced;

pub use control_plane::{AwsCliControlPlane, ControlPlane, ControlPlaneError};
pub use pipeline::{GithubActionsAdapter, PipelineAdapter, PipelineError, PlainPipelineAdapter};
pub use traced::TracedControlPlane;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use control_plane::{ControlPlaneCall, FakeControlPlane};
#[cfg(any(test, feature = "test-support"))]
pub use pipeline::{FakePipelineAdapter, PipelineCall};
