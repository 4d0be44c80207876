//! Test helpers for behavioral specifications.
//!
//! Provides a fluent CLI builder and [`FakeAws`], a scripted `aws` executable
//! that serves canned JSON per operation and logs every invocation.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Step inputs and runner variables that must not leak in from the parent.
const SCRUBBED_ENV: &[&str] = &[
    "INPUT_DOCUMENT-NAME",
    "INPUT_TARGETS",
    "INPUT_PARAMETERS",
    "INPUT_WAIT-UNTIL-COMMAND-EXECUTED",
    "INPUT_LOG-FAILED-COMMAND-INVOCATIONS",
    "INPUT_MAX-WAIT-TIME",
    "GITHUB_ACTIONS",
    "GITHUB_OUTPUT",
    "FLEETCMD_LOG",
    "RUST_LOG",
];

pub const TARGETS: &str = r#"[{"Key":"InstanceIds","Values":["i-123","i-456"]}]"#;

/// Returns the path to a binary, checking llvm-cov target directory first.
/// Falls back to resolving relative to the test binary itself.
fn binary_path(name: &str) -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));

    let llvm_cov_path = manifest_dir.join("target/llvm-cov-target/debug").join(name);
    if llvm_cov_path.exists() {
        return llvm_cov_path;
    }

    let standard = manifest_dir.join("target/debug").join(name);
    if standard.exists() {
        return standard;
    }

    // The test binary lives at target/debug/deps/specs-<hash>
    if let Ok(exe) = std::env::current_exe() {
        if let Some(debug_dir) = exe.parent().and_then(|d| d.parent()) {
            let fallback = debug_dir.join(name);
            if fallback.exists() {
                return fallback;
            }
        }
    }

    standard
}

/// Create a CLI builder for fleetcmd
pub fn cli() -> CliBuilder {
    CliBuilder::new()
}

/// High-level CLI builder for fluent test assertions
pub struct CliBuilder {
    args: Vec<String>,
    envs: Vec<(String, String)>,
}

impl CliBuilder {
    fn new() -> Self {
        Self {
            args: Vec::new(),
            envs: Vec::new(),
        }
    }

    /// Add CLI arguments
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Standard document and targets
    pub fn shell_script(self) -> Self {
        self.args(&[
            "--document-name",
            "AWS-RunShellScript",
            "--targets",
            TARGETS,
        ])
    }

    /// Wait with one-second polling
    pub fn waiting(self, max_wait_secs: &str) -> Self {
        self.args(&[
            "--wait-until-command-executed",
            "--max-wait-time",
            max_wait_secs,
            "--min-delay",
            "1",
            "--max-delay",
            "1",
        ])
    }

    /// Route control plane calls to `aws`
    pub fn aws(self, aws: &FakeAws) -> Self {
        self.env("FLEETCMD_AWS_BINARY", aws.binary())
    }

    /// Set environment variable
    pub fn env(mut self, key: &str, value: impl AsRef<Path>) -> Self {
        self.envs.push((
            key.to_string(),
            value.as_ref().to_string_lossy().to_string(),
        ));
        self
    }

    /// Build the command without running it
    pub fn command(self) -> Command {
        let mut cmd = Command::new(binary_path("fleetcmd"));
        cmd.args(&self.args);
        for key in SCRUBBED_ENV {
            cmd.env_remove(key);
        }
        for (key, value) in self.envs {
            cmd.env(key, value);
        }
        cmd
    }

    /// Run and expect success (exit code 0)
    pub fn passes(self) -> RunAssert {
        let output = self.command().output().expect("command should run");
        assert!(
            output.status.success(),
            "expected command to pass, got exit code {:?}\nstdout: {}\nstderr: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }

    /// Run and expect the given non-zero exit code
    pub fn exits(self, code: i32) -> RunAssert {
        let output = self.command().output().expect("command should run");
        assert_eq!(
            output.status.code(),
            Some(code),
            "unexpected exit code\nstdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }
}

/// Result of a CLI run for chaining assertions
pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Assert stdout equals expected exactly (with diff on failure).
    pub fn stdout_eq(self, expected: &str) -> Self {
        let stdout = self.stdout();
        similar_asserts::assert_eq!(stdout, expected);
        self
    }

    /// Assert stdout contains substring.
    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            stdout.contains(expected),
            "stdout does not contain '{}'\nstdout: {}",
            expected,
            stdout
        );
        self
    }

    /// Assert stderr contains substring.
    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            stderr.contains(expected),
            "stderr does not contain '{}'\nstderr: {}",
            expected,
            stderr
        );
        self
    }
}

// =============================================================================
// Fake aws
// =============================================================================

const FAKE_AWS: &str = r#"#!/bin/sh
dir="$(dirname "$0")"
echo "$@" >> "$dir/calls.log"
op="$2"
instance=""
prev=""
for arg in "$@"; do
  if [ "$prev" = "--instance-id" ]; then instance="$arg"; fi
  prev="$arg"
done
if [ -f "$dir/$op.stderr" ]; then
  cat "$dir/$op.stderr" >&2
  exit 255
fi
case "$op" in
  list-commands)
    n=$(cat "$dir/list-commands.count" 2>/dev/null || echo 0)
    n=$((n + 1))
    echo "$n" > "$dir/list-commands.count"
    f="$dir/list-commands.$n.json"
    [ -f "$f" ] || f="$dir/list-commands.json"
    ;;
  get-command-invocation)
    f="$dir/get-command-invocation.$instance.json"
    ;;
  *)
    f="$dir/$op.json"
    ;;
esac
if [ ! -f "$f" ]; then
  echo "An error occurred (InvalidInstanceId) when calling $op" >&2
  exit 254
fi
cat "$f"
"#;

/// Scripted `aws` executable in a temporary directory.
///
/// Each operation answers with `<op>.json`. `list-commands` first tries
/// `list-commands.<n>.json` for the n-th call, then `list-commands.json`.
/// `get-command-invocation` answers per instance.
pub struct FakeAws {
    dir: tempfile::TempDir,
}

impl FakeAws {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let binary = dir.path().join("aws");
        std::fs::write(&binary, FAKE_AWS).unwrap();
        std::fs::set_permissions(&binary, std::fs::Permissions::from_mode(0o755)).unwrap();
        Self { dir }
    }

    /// Fake whose `send-command` returns command id `3`
    pub fn sending() -> Self {
        let aws = Self::new();
        aws.respond(
            "send-command",
            r#"{"Command":{"CommandId":"3","DocumentName":"AWS-RunShellScript","Status":"Pending"}}"#,
        );
        aws
    }

    pub fn binary(&self) -> PathBuf {
        self.dir.path().join("aws")
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn respond(&self, op: &str, json: &str) {
        std::fs::write(self.dir.path().join(format!("{op}.json")), json).unwrap();
    }

    /// Answer the n-th `list-commands` call (1-based) with `status`.
    pub fn command_status(&self, n: usize, status: &str) {
        std::fs::write(
            self.dir.path().join(format!("list-commands.{n}.json")),
            command_listing(status),
        )
        .unwrap();
    }

    /// Answer every later `list-commands` call with `status`.
    pub fn command_status_from_then_on(&self, status: &str) {
        self.respond("list-commands", &command_listing(status));
    }

    pub fn invocation(&self, instance: &str, stdout: &str, stderr: &str) {
        let detail = serde_json::json!({
            "CommandId": "3",
            "InstanceId": instance,
            "Status": "Failed",
            "StatusDetails": "Failed",
            "ResponseCode": 1,
            "StandardOutputContent": stdout,
            "StandardErrorContent": stderr,
        });
        std::fs::write(
            self.dir
                .path()
                .join(format!("get-command-invocation.{instance}.json")),
            detail.to_string(),
        )
        .unwrap();
    }

    /// List `instances` as the failed invocations of command `3`.
    pub fn failed_instances(&self, instances: &[&str]) {
        let invocations: Vec<_> = instances
            .iter()
            .map(|id| {
                serde_json::json!({"CommandId": "3", "InstanceId": id, "Status": "Failed"})
            })
            .collect();
        self.respond(
            "list-command-invocations",
            &serde_json::json!({ "CommandInvocations": invocations }).to_string(),
        );
    }

    /// Make `op` exit non-zero with `stderr`.
    pub fn fail(&self, op: &str, stderr: &str) {
        std::fs::write(self.dir.path().join(format!("{op}.stderr")), stderr).unwrap();
    }

    /// Argument lines of every invocation, in order
    pub fn calls(&self) -> Vec<String> {
        std::fs::read_to_string(self.dir.path().join("calls.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Operation names of every invocation, in order
    pub fn operations(&self) -> Vec<String> {
        self.calls()
            .iter()
            .filter_map(|line| line.split_whitespace().nth(1).map(str::to_string))
            .collect()
    }
}

fn command_listing(status: &str) -> String {
    let errors = if status == "Failed" { 2 } else { 0 };
    serde_json::json!({
        "Commands": [{
            "CommandId": "3",
            "DocumentName": "AWS-RunShellScript",
            "Status": status,
            "StatusDetails": status,
            "TargetCount": 2,
            "CompletedCount": 2,
            "ErrorCount": errors,
        }]
    })
    .to_string()
}
