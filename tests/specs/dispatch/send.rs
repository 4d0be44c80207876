//! Sending a command without waiting

use crate::prelude::*;

#[test]
fn prints_and_publishes_command_id() {
    let aws = FakeAws::sending();

    cli()
        .shell_script()
        .aws(&aws)
        .passes()
        .stdout_eq("Sent command 3\ncommand-id=3\n");
}

#[test]
fn sends_document_targets_and_parameters() {
    let aws = FakeAws::sending();

    cli()
        .shell_script()
        .args(&["--parameters", r#"{"commands":["uptime"]}"#])
        .aws(&aws)
        .passes();

    similar_asserts::assert_eq!(
        aws.calls(),
        vec![format!(
            "ssm send-command --document-name AWS-RunShellScript --targets {} \
             --parameters {{\"commands\":[\"uptime\"]}} --output json --no-cli-pager",
            TARGETS
        )]
    );
}

#[test]
fn region_and_profile_are_passed_through() {
    let aws = FakeAws::sending();

    cli()
        .shell_script()
        .args(&["--region", "eu-west-1", "--profile", "deploy"])
        .aws(&aws)
        .passes();

    assert!(
        aws.calls()[0].ends_with("--region eu-west-1 --profile deploy"),
        "{:?}",
        aws.calls()
    );
}

#[test]
fn without_wait_nothing_is_polled() {
    let aws = FakeAws::sending();
    aws.command_status(1, "Failed");

    cli().shell_script().aws(&aws).passes();

    assert_eq!(aws.operations(), vec!["send-command"]);
}

#[test]
fn missing_command_id_fails() {
    let aws = FakeAws::new();
    aws.respond("send-command", r#"{"Command":{"DocumentName":"AWS-RunShellScript"}}"#);

    cli()
        .shell_script()
        .aws(&aws)
        .exits(1)
        .stderr_has("Error: No command ID returned");
}

#[test]
fn rejected_submission_fails_without_retry() {
    let aws = FakeAws::new();
    aws.fail(
        "send-command",
        "An error occurred (InvalidDocument) when calling the SendCommand operation",
    );

    cli()
        .shell_script()
        .aws(&aws)
        .exits(1)
        .stderr_has("InvalidDocument");

    assert_eq!(aws.operations(), vec!["send-command"]);
}
