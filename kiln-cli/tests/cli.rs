//! Integration tests for the kiln CLI.
//!
//! These tests verify that the CLI binary behaves correctly, including
//! argument parsing, help text, and version output.

use assert_cmd::Command;
use predicates::prelude::*;

/// Test that the binary runs without arguments and displays help/error.
#[test]
fn test_cli_no_arguments() {
    let mut cmd = Command::cargo_bin("kiln").expect("Failed to find kiln binary");

    // With clap subcommands required, no arguments should fail and show usage
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

/// Test that the --version flag displays version information.
#[test]
fn test_cli_version_flag() {
    let mut cmd = Command::cargo_bin("kiln").expect("Failed to find kiln binary");

    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("kiln"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

/// Test that the --help flag lists every subcommand.
#[test]
fn test_cli_help_flag() {
    let mut cmd = Command::cargo_bin("kiln").expect("Failed to find kiln binary");

    let output = cmd.arg("--help").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Usage:"));
    for command in ["files", "resolve", "build", "copy", "validate", "show-config", "completions"] {
        assert!(stdout.contains(command), "help is missing {command}");
    }
}

/// Test that unknown subcommands are rejected by clap.
#[test]
fn test_unknown_subcommand() {
    let mut cmd = Command::cargo_bin("kiln").expect("Failed to find kiln binary");

    cmd.arg("serve")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

/// Test that completions are generated for bash.
#[test]
fn test_completions_bash() {
    let mut cmd = Command::cargo_bin("kiln").expect("Failed to find kiln binary");

    cmd.args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_kiln"))
        .stderr(predicate::str::contains("kiln completions bash"));
}
