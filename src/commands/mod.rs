//! Command implementations for the Mission Control CLI.
//!
//! Each command reads a [`DataStore`](crate::store::DataStore), runs the
//! query layer, and returns a result type implementing [`Output`].
//! Commands are organized by view:
//! - `dashboard` - Summary cards, agent table, recent activity
//! - `project` - Project list and project detail tabs
//! - `agent` - Agent registry and agent detail
//! - `system` - Navigation, integrity check, resolved settings

mod agent;
mod dashboard;
mod project;
mod system;

pub use agent::{AgentList, AgentRow, AgentShow, agent_list, agent_show};
pub use dashboard::{ActivityList, DashboardView, StatsView, activity, dashboard, stats};
pub use project::{
    ProjectList, ProjectShow, project_activity, project_agents, project_list, project_show,
    project_tasks,
};
pub use system::{BuildInfo, ConfigShow, DoctorResult, config_show, doctor, open};

use serde::Serialize;

/// Command results that can be serialized to JSON or formatted for humans.
pub trait Output {
    /// Serialize to JSON string.
    fn to_json(&self) -> String;

    /// Format for human-readable output.
    fn to_human(&self) -> String;
}

/// Compact JSON encoding shared by every result type.
pub(crate) fn json_line<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| format!(r#"{{"error": "{}"}}"#, e))
}

/// Pad or truncate `s` to exactly `width` characters.
pub(crate) fn cell(s: &str, width: usize) -> String {
    let count = s.chars().count();
    if count > width {
        let mut out: String = s.chars().take(width.saturating_sub(3)).collect();
        out.push_str("...");
        out
    } else {
        format!("{:<width$}", s, width = width)
    }
}
