//! Integration tests for configuration, data sources, and `mc doctor`.
//!
//! These tests verify:
//! - Precedence: cli > env > config.kdl > defaults
//! - Fixture loading via `--data`, `MC_DATA`, and `data-file`
//! - Referential integrity: permissive by default, rejected with `--strict`

mod common;

use common::{CLEAN_FIXTURE, DANGLING_FIXTURE, TestEnv, parse_json};
use predicates::prelude::*;

#[test]
fn test_config_show_defaults() {
    let output = TestEnv::new()
        .mc()
        .args(["config", "show"])
        .assert()
        .success()
        .get_output()
        .clone();
    let json = parse_json(&output.stdout);
    assert_eq!(json["data"], "built-in");
    assert_eq!(json["config"]["output_format"]["value"], "json");
    assert_eq!(json["config"]["output_format"]["source"], "default");
    assert_eq!(json["config"]["unresolved_offset"]["value"], 0);
    assert_eq!(json["config"]["recent_activity_limit"]["value"], 6);
    assert!(json["build"]["version"].is_string());
}

#[test]
fn test_config_file_output_format() {
    let env = TestEnv::new();
    env.write_config("// Config file\noutput-format \"human\"\n");

    env.mc()
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Agents Running"));

    env.mc()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("output-format:          human (config)"));
}

#[test]
fn test_config_file_values_reported_with_source() {
    let env = TestEnv::new();
    env.write_config("unresolved-offset 2\nrecent-activity-limit 3\n");
    let output = env
        .mc()
        .args(["config", "show"])
        .assert()
        .success()
        .get_output()
        .clone();
    let json = parse_json(&output.stdout);
    assert_eq!(json["config"]["unresolved_offset"]["value"], 2);
    assert_eq!(json["config"]["unresolved_offset"]["source"], "config");
    assert_eq!(json["config"]["recent_activity_limit"]["value"], 3);
}

#[test]
fn test_invalid_config_fails() {
    let env = TestEnv::new();
    env.write_config("recent-activity-limit 0\n");
    env.mc()
        .arg("stats")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("recent-activity-limit must be at least 1"));
}

#[test]
fn test_malformed_config_fails() {
    let env = TestEnv::new();
    env.write_config("output-format \"human\n");
    env.mc()
        .arg("stats")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Config error"));
}

#[test]
fn test_data_flag_loads_fixture() {
    let env = TestEnv::new();
    let fixture = env.write_fixture("clean.json", CLEAN_FIXTURE);
    let output = env
        .mc()
        .arg("stats")
        .arg("--data")
        .arg(&fixture)
        .assert()
        .success()
        .get_output()
        .clone();
    let json = parse_json(&output.stdout);
    assert_eq!(json["total_agents"], 1);
    assert_eq!(json["total_issues"], 3);
    assert_eq!(json["tokens_display"], "1.5k");
}

#[test]
fn test_data_env_var_and_precedence() {
    let env = TestEnv::new();
    let from_env = env.write_fixture("env.json", CLEAN_FIXTURE);
    let from_flag = env.write_fixture("flag.json", "{}");

    let output = env
        .mc()
        .env("MC_DATA", &from_env)
        .args(["config", "show"])
        .assert()
        .success()
        .get_output()
        .clone();
    let json = parse_json(&output.stdout);
    assert_eq!(json["config"]["data_file"]["source"], "env:MC_DATA");

    // --data beats MC_DATA
    let output = env
        .mc()
        .env("MC_DATA", &from_env)
        .arg("--data")
        .arg(&from_flag)
        .args(["project", "list"])
        .assert()
        .success()
        .get_output()
        .clone();
    assert_eq!(parse_json(&output.stdout)["count"], 0);
}

#[test]
fn test_data_file_from_config() {
    let env = TestEnv::new();
    let fixture = env.write_fixture("clean.json", CLEAN_FIXTURE);
    env.write_config(&format!("data-file \"{}\"\n", fixture.display()));

    let output = env
        .mc()
        .args(["project", "list"])
        .assert()
        .success()
        .get_output()
        .clone();
    let json = parse_json(&output.stdout);
    assert_eq!(json["projects"][0]["id"], "alpha");
}

#[test]
fn test_missing_data_file() {
    let env = TestEnv::new();
    env.mc()
        .args(["stats", "--data", "does-not-exist.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("IO error"));
}

#[test]
fn test_fixture_with_duplicate_ids_rejected() {
    let env = TestEnv::new();
    let fixture = env.write_fixture(
        "dupes.json",
        r#"{"activity": [
            {"id": "e1", "project_id": "p", "time": "now", "event": "a", "type": "scan"},
            {"id": "e1", "project_id": "p", "time": "now", "event": "b", "type": "scan"}
        ]}"#,
    );
    env.mc()
        .arg("stats")
        .arg("--data")
        .arg(&fixture)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Duplicate ID"));
}

#[test]
fn test_dangling_reference_tolerated_by_default() {
    let env = TestEnv::new();
    let fixture = env.write_fixture("dangling.json", DANGLING_FIXTURE);

    // The orphaned agent still counts and lists without a project name
    let output = env
        .mc()
        .arg("--data")
        .arg(&fixture)
        .args(["agent", "list"])
        .assert()
        .success()
        .get_output()
        .clone();
    let json = parse_json(&output.stdout);
    assert_eq!(json["count"], 2);
    assert!(json["agents"][1]["project"].is_null());

    // Project queries ignore it
    let output = env
        .mc()
        .arg("--data")
        .arg(&fixture)
        .args(["project", "agents", "alpha"])
        .assert()
        .success()
        .get_output()
        .clone();
    assert_eq!(parse_json(&output.stdout)["count"], 1);
}

#[test]
fn test_strict_rejects_dangling_reference() {
    let env = TestEnv::new();
    let fixture = env.write_fixture("dangling.json", DANGLING_FIXTURE);
    env.mc()
        .arg("--strict")
        .arg("--data")
        .arg(&fixture)
        .arg("stats")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "agent a2 references missing project_id 'missing'",
        ));
}

#[test]
fn test_strict_accepts_clean_fixture() {
    let env = TestEnv::new();
    let fixture = env.write_fixture("clean.json", CLEAN_FIXTURE);
    env.mc()
        .arg("--strict")
        .arg("--data")
        .arg(&fixture)
        .arg("stats")
        .assert()
        .success();
}

#[test]
fn test_doctor_clean_builtin_data() {
    let output = TestEnv::new()
        .mc()
        .arg("doctor")
        .assert()
        .success()
        .get_output()
        .clone();
    let json = parse_json(&output.stdout);
    assert_eq!(json["ok"], true);
    assert_eq!(json["projects"], 3);
    assert_eq!(json["events"], 6);
}

#[test]
fn test_doctor_reports_dangling() {
    let env = TestEnv::new();
    let fixture = env.write_fixture("dangling.json", DANGLING_FIXTURE);
    let output = env
        .mc()
        .arg("--data")
        .arg(&fixture)
        .arg("doctor")
        .assert()
        .code(2)
        .get_output()
        .clone();
    let json = parse_json(&output.stdout);
    assert_eq!(json["ok"], false);
    assert_eq!(json["dangling"][0]["id"], "a2");
    assert_eq!(json["dangling"][0]["field"], "project_id");
}
