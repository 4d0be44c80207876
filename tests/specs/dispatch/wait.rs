//! Waiting for a command to finish on every target

use crate::prelude::*;

#[test]
fn waits_until_success() {
    let aws = FakeAws::sending();
    aws.command_status(1, "InProgress");
    aws.command_status_from_then_on("Success");

    cli()
        .shell_script()
        .waiting("30")
        .args(&["--log-failed-command-invocations"])
        .aws(&aws)
        .passes()
        .stdout_eq("Sent command 3\ncommand-id=3\nWaiting for command 3 to complete\n");

    assert_eq!(
        aws.operations(),
        vec!["send-command", "list-commands", "list-commands"]
    );
}

#[test]
fn polls_the_submitted_command() {
    let aws = FakeAws::sending();
    aws.command_status(1, "Success");

    cli().shell_script().waiting("30").aws(&aws).passes();

    assert!(
        aws.calls()[1].starts_with("ssm list-commands --command-id 3 "),
        "{:?}",
        aws.calls()
    );
}

#[test]
fn command_not_yet_visible_is_retried() {
    let aws = FakeAws::sending();
    aws.respond("list-commands.1", r#"{"Commands":[]}"#);
    aws.command_status_from_then_on("Success");

    cli().shell_script().waiting("30").aws(&aws).passes();

    assert_eq!(aws.operations().len(), 3);
}

#[test]
fn failed_command_exits_1_with_reason() {
    let aws = FakeAws::sending();
    aws.command_status(1, "InProgress");
    aws.command_status_from_then_on("Failed");

    cli()
        .shell_script()
        .waiting("30")
        .aws(&aws)
        .exits(1)
        .stderr_has(
            "Error: command 3 failed (status=Failed details=Failed targets=2 completed=2 errors=2)",
        );

    assert_eq!(
        aws.operations(),
        vec!["send-command", "list-commands", "list-commands"]
    );
}

#[test]
fn cancelled_command_fails() {
    let aws = FakeAws::sending();
    aws.command_status(1, "Cancelled");

    cli()
        .shell_script()
        .waiting("30")
        .aws(&aws)
        .exits(1)
        .stderr_has("status=Cancelled");
}

#[test]
fn exhausted_budget_exits_2() {
    let aws = FakeAws::sending();
    aws.command_status_from_then_on("InProgress");

    cli()
        .shell_script()
        .waiting("2")
        .aws(&aws)
        .exits(2)
        .stderr_has("Error: timed out after ")
        .stderr_has("waiting for command 3 (status=InProgress");
}

#[test]
fn polling_error_is_not_retried() {
    let aws = FakeAws::sending();
    aws.fail(
        "list-commands",
        "An error occurred (AccessDeniedException) when calling the ListCommands operation",
    );

    cli()
        .shell_script()
        .waiting("30")
        .aws(&aws)
        .exits(1)
        .stderr_has("AccessDeniedException");

    assert_eq!(aws.operations(), vec!["send-command", "list-commands"]);
}
