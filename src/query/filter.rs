//! Agent search and filter state.

use serde::{Deserialize, Serialize};

use crate::models::{Agent, AgentStatus};
use crate::store::DataStore;

/// Combinable agent filter: free-text search, status, and project.
///
/// `None` selectors mean "no filter". Selectors are independent; only
/// [`AgentFilter::clear`] resets more than one at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentFilter {
    /// Case-insensitive substring matched against the agent label
    #[serde(default)]
    pub search: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AgentStatus>,

    /// Project identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

impl AgentFilter {
    /// Create a filter that matches every agent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set search text.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Set status selector.
    pub fn with_status(mut self, status: Option<AgentStatus>) -> Self {
        self.status = status;
        self
    }

    /// Set project selector.
    pub fn with_project(mut self, project: Option<String>) -> Self {
        self.project = project;
        self
    }

    /// Select `status`, or return to "no filter" if it is already selected.
    pub fn toggle_status(&mut self, status: AgentStatus) {
        self.status = if self.status == Some(status) {
            None
        } else {
            Some(status)
        };
    }

    /// Select `project`, or return to "no filter" if it is already selected.
    pub fn toggle_project(&mut self, project: &str) {
        self.project = if self.project.as_deref() == Some(project) {
            None
        } else {
            Some(project.to_string())
        };
    }

    /// Reset all three selectors.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// True if any selector narrows the result.
    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || self.status.is_some() || self.project.is_some()
    }

    /// Check one agent against every active selector.
    pub fn matches(&self, agent: &Agent) -> bool {
        let search_ok = self.search.is_empty()
            || agent
                .label
                .to_lowercase()
                .contains(&self.search.to_lowercase());
        let status_ok = self.status.is_none_or(|s| agent.status == s);
        let project_ok = self
            .project
            .as_deref()
            .is_none_or(|p| agent.project_id == p);

        search_ok && status_ok && project_ok
    }

    /// Filter a slice of agents, keeping original relative order.
    pub fn filter<'a>(&self, agents: &'a [Agent]) -> Vec<&'a Agent> {
        agents.iter().filter(|a| self.matches(a)).collect()
    }

    /// Filter every agent in the store.
    pub fn apply<'a>(&self, store: &'a dyn DataStore) -> Vec<&'a Agent> {
        let result = self.filter(store.all_agents());
        tracing::debug!(
            search = %self.search,
            status = ?self.status,
            project = ?self.project,
            matched = result.len(),
            "applied agent filter"
        );
        result
    }
}
