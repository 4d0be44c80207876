//! Input errors: reported before anything is sent

use crate::prelude::*;

#[test]
fn invalid_parameters_json_is_rejected() {
    let aws = FakeAws::sending();

    cli()
        .shell_script()
        .args(&["--parameters", "{commands: [uptime]}"])
        .aws(&aws)
        .exits(64)
        .stderr_has("Error: Input parameters is not a valid JSON: ");

    assert!(aws.calls().is_empty());
}

#[test]
fn invalid_targets_json_is_rejected() {
    let aws = FakeAws::sending();

    cli()
        .args(&["--document-name", "AWS-RunShellScript", "--targets", "i-123"])
        .aws(&aws)
        .exits(64)
        .stderr_has("Error: Input targets is not a valid JSON: ");

    assert!(aws.calls().is_empty());
}

#[test]
fn missing_targets_are_rejected() {
    let aws = FakeAws::sending();

    cli()
        .args(&["--document-name", "AWS-RunShellScript"])
        .aws(&aws)
        .exits(64)
        .stderr_has("Error: Input required and not supplied: targets");

    assert!(aws.calls().is_empty());
}

#[test]
fn zero_wait_budget_is_rejected() {
    let aws = FakeAws::sending();

    cli()
        .shell_script()
        .args(&["--wait-until-command-executed", "--max-wait-time", "0"])
        .aws(&aws)
        .exits(64)
        .stderr_has("Error: invalid wait configuration: max wait time must be greater than 0");

    assert!(aws.calls().is_empty());
}

#[test]
fn max_delay_below_min_delay_is_rejected() {
    let aws = FakeAws::sending();

    cli()
        .shell_script()
        .args(&[
            "--wait-until-command-executed",
            "--min-delay",
            "10",
            "--max-delay",
            "5",
        ])
        .aws(&aws)
        .exits(64)
        .stderr_has("Error: invalid wait configuration: ");

    assert!(aws.calls().is_empty());
}

#[test]
fn unknown_flag_is_a_usage_error() {
    cli()
        .args(&["--document"])
        .exits(64)
        .stderr_has("unexpected argument '--document'");
}
