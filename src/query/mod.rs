//! Query and aggregation layer.
//!
//! Pure functions over a [`DataStore`]. Lookups return `Option` or an empty
//! `Vec` instead of failing, so views can render "not found" and empty
//! states directly.

mod filter;
mod stats;

pub use filter::AgentFilter;
pub use stats::{DashboardStats, ResolutionPolicy, ResolutionRate, format_tokens};

use serde::Serialize;

use crate::models::{ActivityEvent, Agent, AgentStatus, EventType, Project};
use crate::store::DataStore;

/// Find a project by identifier.
pub fn get_project<'a>(store: &'a dyn DataStore, id: &str) -> Option<&'a Project> {
    store.all_projects().iter().find(|p| p.id == id)
}

/// All agents owned by a project, in store order.
pub fn get_project_agents<'a>(store: &'a dyn DataStore, project_id: &str) -> Vec<&'a Agent> {
    store
        .all_agents()
        .iter()
        .filter(|a| a.project_id == project_id)
        .collect()
}

/// All activity events for a project, in store order.
pub fn get_project_activity<'a>(
    store: &'a dyn DataStore,
    project_id: &str,
) -> Vec<&'a ActivityEvent> {
    store
        .all_activity_events()
        .iter()
        .filter(|e| e.project_id == project_id)
        .collect()
}

/// Find an agent by identifier.
pub fn get_agent<'a>(store: &'a dyn DataStore, id: &str) -> Option<&'a Agent> {
    store.all_agents().iter().find(|a| a.id == id)
}

/// Resolve the project an agent belongs to.
pub fn project_of<'a>(store: &'a dyn DataStore, agent: &Agent) -> Option<&'a Project> {
    get_project(store, &agent.project_id)
}

/// Agents with work in flight or finished: the project "Tasks" tab.
pub fn project_tasks<'a>(store: &'a dyn DataStore, project_id: &str) -> Vec<&'a Agent> {
    get_project_agents(store, project_id)
        .into_iter()
        .filter(|a| matches!(a.status, AgentStatus::Running | AgentStatus::Complete))
        .collect()
}

/// Activity events across all projects, optionally narrowed by project and type.
pub fn activity_feed<'a>(
    store: &'a dyn DataStore,
    project_id: Option<&str>,
    event_type: Option<EventType>,
) -> Vec<&'a ActivityEvent> {
    store
        .all_activity_events()
        .iter()
        .filter(|e| project_id.is_none_or(|p| e.project_id == p))
        .filter(|e| event_type.is_none_or(|t| e.event_type == t))
        .collect()
}

/// Everything the project detail view shows, joined in one pass.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectDetail<'a> {
    pub project: &'a Project,
    pub agents: Vec<&'a Agent>,
    pub activity: Vec<&'a ActivityEvent>,
    pub running_agents: usize,
    pub health_score: u8,
}

impl<'a> ProjectDetail<'a> {
    /// Join a project with its agents and activity. `None` if the project
    /// does not exist.
    pub fn build(store: &'a dyn DataStore, id: &str) -> Option<Self> {
        let project = get_project(store, id)?;
        let agents = get_project_agents(store, id);
        let activity = get_project_activity(store, id);
        let running_agents = agents
            .iter()
            .filter(|a| a.status == AgentStatus::Running)
            .count();

        tracing::debug!(
            project = id,
            agents = agents.len(),
            events = activity.len(),
            "built project detail"
        );

        Some(Self {
            project,
            agents,
            activity,
            running_agents,
            health_score: project.status.health_score(),
        })
    }

    /// Agents with status running or complete.
    pub fn tasks(&self) -> Vec<&'a Agent> {
        self.agents
            .iter()
            .copied()
            .filter(|a| matches!(a.status, AgentStatus::Running | AgentStatus::Complete))
            .collect()
    }
}
