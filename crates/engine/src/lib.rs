// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Command dispatch and completion waiting for fleetcmd
//!
//! A command id does not resolve to its targets at submission time, so
//! completion is polled at the command level ([`waiter`]). Per-target detail
//! is only gathered afterwards, when the wait failed ([`failures`]).

pub mod backoff;
pub mod failures;
pub mod runner;
pub mod waiter;

pub use backoff::Backoff;
pub use failures::{
    collect_failed_invocations, CollectError, CollectionPolicy, DetailFetchError,
    FailedInvocations,
};
pub use runner::{
    RunError, RunOutcome, RunRequest, Runner, SubmissionError, WaitOptions, COMMAND_ID_OUTPUT,
};
pub use waiter::{wait_until_command_executed, WaitError};
