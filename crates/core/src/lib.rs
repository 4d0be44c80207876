// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! fc-core: Data model and wait-state policy for fleetcmd

pub mod command;
pub mod id;
pub mod invocation;
pub mod status;
pub mod waiter;

pub use command::{
    CommandId, CommandRecord, ListCommandsOutput, Parameters, SendCommandOutput,
    SendCommandRequest, SubmittedCommand, Target,
};
pub use invocation::{
    InstanceId, InvocationDetail, InvocationFilter, InvocationSummary, ListInvocationsOutput,
};
pub use status::{classify, CommandStatus, WaiterState};
pub use waiter::{evaluate, ConfigError, WaitConfig, WaitOutcome};
