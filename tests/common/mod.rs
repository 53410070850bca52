//! Common test utilities for Mission Control integration tests.
//!
//! Provides `TestEnv` for isolated test environments that never read the
//! user's `~/.config/mission-control/` directory.

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
pub use tempfile::TempDir;

/// A test environment with an isolated config directory.
///
/// The `mc()` method returns a `Command` that sets `MC_CONFIG_DIR`
/// per-invocation and clears `MC_DATA`, making tests parallel-safe.
pub struct TestEnv {
    pub config_dir: TempDir,
    pub work_dir: TempDir,
}

impl TestEnv {
    /// Create a new test environment with isolated directories.
    pub fn new() -> Self {
        Self {
            config_dir: TempDir::new().unwrap(),
            work_dir: TempDir::new().unwrap(),
        }
    }

    /// Get a Command for the mc binary with isolated configuration.
    pub fn mc(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_mc"));
        cmd.current_dir(self.work_dir.path());
        cmd.env("MC_CONFIG_DIR", self.config_dir.path());
        cmd.env_remove("MC_DATA");
        cmd.env_remove("MC_LOG");
        cmd
    }

    /// Write config.kdl into the isolated config directory.
    pub fn write_config(&self, content: &str) {
        fs::write(self.config_dir.path().join("config.kdl"), content)
            .expect("Failed to write config file");
    }

    /// Write a JSON fixture into the work directory and return its path.
    pub fn write_fixture(&self, name: &str, json: &str) -> PathBuf {
        let path = self.work_dir.path().join(name);
        fs::write(&path, json).expect("Failed to write fixture");
        path
    }

    pub fn work_path(&self) -> &Path {
        self.work_dir.path()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a command's stdout as JSON.
pub fn parse_json(output: &[u8]) -> serde_json::Value {
    serde_json::from_slice(output).expect("stdout is not valid JSON")
}

/// A small fixture: one project with two agents, one event, and one
/// agent pointing at a project that does not exist.
pub const DANGLING_FIXTURE: &str = r#"{
  "projects": [
    {"id": "alpha", "name": "Lab - Alpha", "domain": "alpha.dev", "repo": "lab/alpha",
     "agents": 2, "issues": 3, "status": "critical", "last_activity": "1m ago"}
  ],
  "agents": [
    {"id": "a1", "label": "alpha-runner", "project_id": "alpha", "task": "Run suite",
     "status": "running", "runtime": "2m", "started_at": "10:00", "tokens": 1500},
    {"id": "a2", "label": "ghost-runner", "project_id": "missing", "task": "Haunt",
     "status": "failed", "runtime": "1m", "started_at": "09:00", "tokens": 999}
  ],
  "activity": [
    {"id": "e1", "project_id": "alpha", "time": "1m ago", "event": "Suite started",
     "type": "start", "agent_id": "a1"}
  ]
}"#;

/// Same as [`DANGLING_FIXTURE`] without the dangling agent.
pub const CLEAN_FIXTURE: &str = r#"{
  "projects": [
    {"id": "alpha", "name": "Lab - Alpha", "domain": "alpha.dev", "repo": "lab/alpha",
     "agents": 1, "issues": 3, "status": "critical", "last_activity": "1m ago"}
  ],
  "agents": [
    {"id": "a1", "label": "alpha-runner", "project_id": "alpha", "task": "Run suite",
     "status": "running", "runtime": "2m", "started_at": "10:00", "tokens": 1500}
  ],
  "activity": []
}"#;
