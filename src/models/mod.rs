//! Data models for Mission Control entities.
//!
//! This module defines the core data structures:
//! - `Project` - A monitored codebase/environment that agents operate against
//! - `Agent` - A simulated automated task-runner with a communication log
//! - `ActivityEvent` - A timestamped log entry associated with a project

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Health of a monitored project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Healthy,
    Warning,
    Critical,
}

impl ProjectStatus {
    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Healthy => "healthy",
            ProjectStatus::Warning => "warning",
            ProjectStatus::Critical => "critical",
        }
    }

    /// Health score shown on the project detail card (percent).
    pub fn health_score(&self) -> u8 {
        match self {
            ProjectStatus::Healthy => 98,
            ProjectStatus::Warning => 75,
            ProjectStatus::Critical => 45,
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "healthy" => Ok(ProjectStatus::Healthy),
            "warning" => Ok(ProjectStatus::Warning),
            "critical" => Ok(ProjectStatus::Critical),
            _ => Err(Error::InvalidInput(format!(
                "Invalid project status '{}'. Valid values: healthy, warning, critical",
                s
            ))),
        }
    }
}

/// Lifecycle status of an agent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    Running,
    Complete,
    Failed,
    #[default]
    Idle,
}

impl AgentStatus {
    /// Every status, in display order.
    pub const ALL: [AgentStatus; 4] = [
        AgentStatus::Running,
        AgentStatus::Complete,
        AgentStatus::Failed,
        AgentStatus::Idle,
    ];

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentStatus::Running => "running",
            AgentStatus::Complete => "complete",
            AgentStatus::Failed => "failed",
            AgentStatus::Idle => "idle",
        }
    }

    /// Capitalized label used in badges and tables.
    pub fn label(&self) -> &'static str {
        match self {
            AgentStatus::Running => "Running",
            AgentStatus::Complete => "Complete",
            AgentStatus::Failed => "Failed",
            AgentStatus::Idle => "Idle",
        }
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AgentStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "running" => Ok(AgentStatus::Running),
            "complete" => Ok(AgentStatus::Complete),
            "failed" => Ok(AgentStatus::Failed),
            "idle" => Ok(AgentStatus::Idle),
            _ => Err(Error::InvalidInput(format!(
                "Invalid agent status '{}'. Valid values: running, complete, failed, idle",
                s
            ))),
        }
    }
}

/// Kind of activity event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Start,
    Complete,
    Merge,
    Fix,
    Scan,
    Error,
}

impl EventType {
    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Start => "start",
            EventType::Complete => "complete",
            EventType::Merge => "merge",
            EventType::Fix => "fix",
            EventType::Scan => "scan",
            EventType::Error => "error",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EventType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "start" => Ok(EventType::Start),
            "complete" => Ok(EventType::Complete),
            "merge" => Ok(EventType::Merge),
            "fix" => Ok(EventType::Fix),
            "scan" => Ok(EventType::Scan),
            "error" => Ok(EventType::Error),
            _ => Err(Error::InvalidInput(format!(
                "Invalid event type '{}'. Valid values: start, complete, merge, fix, scan, error",
                s
            ))),
        }
    }
}

/// Direction of a message in an agent's communication log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageDirection {
    /// Sent to the agent
    Inbound,
    /// Sent by the agent
    Outbound,
}

/// A monitored codebase or environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier (e.g., "productos-build")
    pub id: String,

    /// Display name
    pub name: String,

    /// Deployment hostname
    pub domain: String,

    /// Source repository as `owner/name`
    pub repo: String,

    /// Number of agents assigned
    #[serde(default)]
    pub agents: u32,

    /// Open issue count
    #[serde(default)]
    pub issues: u32,

    /// Current health
    #[serde(default)]
    pub status: ProjectStatus,

    /// Free-form recency label (e.g., "5m ago")
    pub last_activity: String,
}

impl Project {
    /// Display name without the product prefix ("ProductOS - Build" -> "Build").
    pub fn short_name(&self) -> &str {
        match self.name.split_once(" - ") {
            Some((_, rest)) if !rest.is_empty() => rest,
            _ => &self.name,
        }
    }

    /// Link to the deployed environment.
    pub fn domain_url(&self) -> String {
        format!("https://{}", self.domain)
    }

    /// Link to the source repository.
    pub fn repo_url(&self) -> String {
        format!("https://github.com/{}", self.repo)
    }
}

/// One entry in an agent's communication log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub direction: MessageDirection,
    pub content: String,
    pub time: String,
}

/// A simulated automated task-runner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    /// Unique identifier (e.g., "agent-1")
    pub id: String,

    /// Short machine-style name
    pub label: String,

    /// Owning project identifier
    pub project_id: String,

    /// What the agent is working on
    pub task: String,

    #[serde(default)]
    pub status: AgentStatus,

    /// Elapsed time label
    pub runtime: String,

    /// Start time label
    pub started_at: String,

    /// Tokens consumed so far
    #[serde(default)]
    pub tokens: u64,

    /// Linked pull request reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pr: Option<String>,

    /// Communication log, oldest first
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// A timestamped log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEvent {
    /// Unique identifier (e.g., "evt-1")
    pub id: String,

    /// Owning project identifier
    pub project_id: String,

    /// Time label
    pub time: String,

    /// Human-readable description
    pub event: String,

    #[serde(rename = "type")]
    pub event_type: EventType,

    /// Agent that produced the event, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
}
