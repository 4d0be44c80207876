//! Help and version output

use crate::prelude::*;

#[test]
fn help_lists_step_inputs() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("--document-name")
        .stdout_has("--targets")
        .stdout_has("--wait-until-command-executed")
        .stdout_has("--log-failed-command-invocations")
        .stdout_has("--max-wait-time");
}

#[test]
fn version_prints_name() {
    cli().args(&["--version"]).passes().stdout_has("fleetcmd");
}
