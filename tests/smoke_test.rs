//! Smoke tests for the Mission Control CLI.
//!
//! These tests verify basic CLI functionality:
//! - `mc --version` outputs version info
//! - `mc --help` outputs help text
//! - `mc` (no args) outputs the dashboard as JSON

mod common;

use common::{TestEnv, parse_json};
use predicates::prelude::*;

#[test]
fn test_version_flag() {
    TestEnv::new()
        .mc()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("mc"))
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_help_flag() {
    TestEnv::new()
        .mc()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("dashboard"));
}

#[test]
fn test_no_args_outputs_dashboard_json() {
    let output = TestEnv::new()
        .mc()
        .assert()
        .success()
        .get_output()
        .clone();
    let json = parse_json(&output.stdout);
    assert_eq!(json["stats"]["running_agents"], 2);
    assert_eq!(json["agents"].as_array().map(|a| a.len()), Some(6));
}

#[test]
fn test_human_readable_flag() {
    TestEnv::new()
        .mc()
        .arg("-H")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Mission Control"));
}

#[test]
fn test_unknown_subcommand_fails() {
    TestEnv::new()
        .mc()
        .arg("launch")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_json_output_is_single_line() {
    let output = TestEnv::new()
        .mc()
        .args(["project", "list"])
        .assert()
        .success()
        .get_output()
        .clone();
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.trim_end().lines().count(), 1);
}
