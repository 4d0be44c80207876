//! Step inputs read from the environment

use crate::prelude::*;

#[test]
fn inputs_fall_back_to_step_environment() {
    let aws = FakeAws::sending();
    aws.command_status(1, "Success");

    cli()
        .env("INPUT_DOCUMENT-NAME", "AWS-RunShellScript")
        .env("INPUT_TARGETS", TARGETS)
        .env("INPUT_PARAMETERS", r#"{"commands":["uptime"]}"#)
        .env("INPUT_WAIT-UNTIL-COMMAND-EXECUTED", "true")
        .env("INPUT_MAX-WAIT-TIME", "30")
        .aws(&aws)
        .passes()
        .stdout_has("Waiting for command 3 to complete");

    assert_eq!(aws.operations(), vec!["send-command", "list-commands"]);
    assert!(aws.calls()[0].contains(r#"--parameters {"commands":["uptime"]}"#));
}

#[test]
fn empty_parameters_input_sends_none() {
    let aws = FakeAws::sending();

    cli()
        .shell_script()
        .env("INPUT_PARAMETERS", "")
        .aws(&aws)
        .passes();

    assert!(!aws.calls()[0].contains("--parameters"));
}

#[test]
fn flags_false_in_step_environment_do_not_wait() {
    let aws = FakeAws::sending();

    cli()
        .shell_script()
        .env("INPUT_WAIT-UNTIL-COMMAND-EXECUTED", "false")
        .aws(&aws)
        .passes();

    assert_eq!(aws.operations(), vec!["send-command"]);
}
