// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! fleetcmd - run a document on a fleet of managed instances

mod env;
mod exit_error;
mod input;

use anyhow::Result;
use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser, ValueEnum};
use exit_error::{ExitError, EXIT_FAILURE, EXIT_TIMEOUT, EXIT_USAGE};
use fc_adapters::{
    AwsCliControlPlane, GithubActionsAdapter, PipelineAdapter, PlainPipelineAdapter,
    TracedControlPlane,
};
use fc_core::{SendCommandRequest, WaitConfig};
use fc_engine::{CollectionPolicy, RunError, RunRequest, Runner, WaitError, WaitOptions};
use input::InputError;
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "fleetcmd",
    version,
    about = "Send a command document to managed instances and wait for it"
)]
struct Cli {
    /// Name of the command document to run
    #[arg(long, env = "INPUT_DOCUMENT-NAME")]
    document_name: String,

    /// Targets as JSON, e.g. [{"Key":"tag:Role","Values":["web"]}]
    #[arg(long, env = "INPUT_TARGETS")]
    targets: Option<String>,

    /// Document parameters as JSON, e.g. {"commands":["uptime"]}
    #[arg(long, env = "INPUT_PARAMETERS")]
    parameters: Option<String>,

    /// Wait for the command to finish on every target
    #[arg(
        long,
        env = "INPUT_WAIT-UNTIL-COMMAND-EXECUTED",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    wait_until_command_executed: bool,

    /// Print the output of failed targets when waiting fails
    #[arg(
        long,
        env = "INPUT_LOG-FAILED-COMMAND-INVOCATIONS",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    log_failed_command_invocations: bool,

    /// Longest total wait, in seconds
    #[arg(long, env = "INPUT_MAX-WAIT-TIME", default_value_t = 600)]
    max_wait_time: u64,

    /// Shortest delay between status checks, in seconds
    #[arg(long, default_value_t = 5)]
    min_delay: u64,

    /// Longest delay between status checks, in seconds
    #[arg(long, default_value_t = 120)]
    max_delay: u64,

    /// What to do when one failed target's output cannot be fetched
    #[arg(long, value_enum, default_value_t)]
    collection_policy: Policy,

    /// Region passed to the aws executable
    #[arg(long)]
    region: Option<String>,

    /// Profile passed to the aws executable
    #[arg(long)]
    profile: Option<String>,

    /// Output format (default: github inside GitHub Actions, else plain)
    #[arg(long, value_enum)]
    format: Option<Format>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
enum Policy {
    #[default]
    FailFast,
    Partial,
}

impl From<Policy> for CollectionPolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::FailFast => CollectionPolicy::FailFast,
            Policy::Partial => CollectionPolicy::Partial,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
enum Format {
    Github,
    Plain,
}

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version exit 0; usage errors are invalid input
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            eprint!("{}", e.render());
            std::process::exit(EXIT_USAGE);
        }
    };

    let guard = setup_logging();

    if let Err(e) = run(cli).await {
        let code = exit_code(&e);
        // Flush buffered log lines; process::exit skips destructors
        drop(guard);
        let msg = format_error(&e);
        if !msg.is_empty() {
            eprintln!("Error: {}", msg);
        }
        std::process::exit(code);
    }
}

/// Install the stderr log subscriber. The guard must outlive the run.
fn setup_logging() -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*};

    let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stderr());

    tracing_subscriber::registry()
        .with(env::log_filter())
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    guard
}

fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(e) = err.downcast_ref::<ExitError>() {
        return e.code;
    }
    match err.downcast_ref::<RunError>() {
        Some(RunError::Wait(WaitError::Timeout { .. })) => EXIT_TIMEOUT,
        Some(RunError::Wait(WaitError::Config(_))) => EXIT_USAGE,
        _ => EXIT_FAILURE,
    }
}

/// Format an anyhow error, deduplicating the chain.
///
/// If the top-level Display already contains the source error text, we skip
/// the "Caused by" chain to avoid noisy duplicate output. Otherwise we render
/// the full chain so context isn't lost.
fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();

    let chain_redundant = err
        .chain()
        .skip(1)
        .all(|cause| top.contains(&cause.to_string()));

    if chain_redundant {
        return top;
    }

    let mut buf = top;
    for (i, cause) in err.chain().skip(1).enumerate() {
        buf.push_str(&format!("\n\nCaused by:\n    {}: {}", i, cause));
    }
    buf
}

fn build_request(cli: &Cli) -> Result<RunRequest, InputError> {
    let targets = input::targets(cli.targets.as_deref())?;
    let mut command = SendCommandRequest::new(cli.document_name.clone(), targets);
    if let Some(parameters) = input::parameters(cli.parameters.as_deref())? {
        command = command.with_parameters(parameters);
    }

    let wait = cli.wait_until_command_executed.then(|| {
        let config = WaitConfig::new(Duration::from_secs(cli.max_wait_time))
            .with_min_delay(Duration::from_secs(cli.min_delay))
            .with_max_delay(Duration::from_secs(cli.max_delay));
        WaitOptions::new(config)
            .log_failed_invocations(cli.log_failed_command_invocations)
            .with_policy(cli.collection_policy.into())
    });

    Ok(RunRequest { command, wait })
}

async fn run(cli: Cli) -> Result<()> {
    let request = build_request(&cli).map_err(|e| ExitError::new(EXIT_USAGE, e.to_string()))?;

    let client = TracedControlPlane::new(
        AwsCliControlPlane::new()
            .with_region(cli.region.clone())
            .with_profile(cli.profile.clone()),
    );

    let format = cli.format.unwrap_or(if env::github_actions() {
        Format::Github
    } else {
        Format::Plain
    });
    match format {
        Format::Github => execute(client, GithubActionsAdapter::new(), &request).await,
        Format::Plain => execute(client, PlainPipelineAdapter::new(), &request).await,
    }
}

async fn execute<P: PipelineAdapter>(
    client: TracedControlPlane<AwsCliControlPlane>,
    pipeline: P,
    request: &RunRequest,
) -> Result<()> {
    let outcome = Runner::new(client, pipeline).run(request).await?;
    tracing::debug!(command_id = %outcome.command_id, "run finished");
    Ok(())
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
