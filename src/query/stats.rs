//! Dashboard aggregates and number formatting.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::models::{AgentStatus, EventType};
use crate::store::DataStore;

/// How the placeholder "fixed issues" figure is derived.
///
/// There is no ground-truth "fixed" field on any record. The dashboard
/// approximates it as `total_issues - unresolved_offset`, so the
/// resolution rate is a display value, not a measured metric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResolutionPolicy {
    /// Issues assumed to still be open
    pub unresolved_offset: u64,
}

impl ResolutionPolicy {
    pub fn new(unresolved_offset: u64) -> Self {
        Self { unresolved_offset }
    }

    /// Estimated fixed issues for a given open-issue total.
    pub fn fixed_issues(&self, total_issues: u64) -> u64 {
        total_issues.saturating_sub(self.unresolved_offset)
    }

    /// Compute the resolution rate for a given open-issue total.
    pub fn rate(&self, total_issues: u64) -> ResolutionRate {
        if total_issues == 0 {
            return ResolutionRate::NoIssues;
        }
        let fixed = self.fixed_issues(total_issues);
        let percent = (fixed as f64 / total_issues as f64 * 100.0).round() as u8;
        ResolutionRate::Percent(percent)
    }
}

/// Percentage of issues considered fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionRate {
    /// Rounded percentage, 0-100
    Percent(u8),
    /// No issues to resolve
    NoIssues,
}

impl fmt::Display for ResolutionRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionRate::Percent(p) => write!(f, "{}%", p),
            ResolutionRate::NoIssues => write!(f, "No issues"),
        }
    }
}

impl Serialize for ResolutionRate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ResolutionRate::Percent(p) => serializer.serialize_u8(*p),
            ResolutionRate::NoIssues => serializer.serialize_none(),
        }
    }
}

/// Summary card figures, computed from the full unfiltered store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub running_agents: usize,
    pub complete_agents: usize,
    pub failed_agents: usize,
    pub idle_agents: usize,
    pub total_agents: usize,
    pub total_issues: u64,
    pub fixed_issues: u64,
    pub total_tokens: u64,
    pub resolution_rate: ResolutionRate,
    /// Merge events in the activity log
    pub prs_merged: usize,
    /// Agents with a linked pull request
    pub prs_linked: usize,
}

impl DashboardStats {
    pub fn compute(store: &dyn DataStore, policy: ResolutionPolicy) -> Self {
        let agents = store.all_agents();
        let count = |status: AgentStatus| agents.iter().filter(|a| a.status == status).count();

        let total_issues: u64 = store
            .all_projects()
            .iter()
            .map(|p| u64::from(p.issues))
            .sum();
        let total_tokens: u64 = agents.iter().map(|a| a.tokens).sum();

        let stats = Self {
            running_agents: count(AgentStatus::Running),
            complete_agents: count(AgentStatus::Complete),
            failed_agents: count(AgentStatus::Failed),
            idle_agents: count(AgentStatus::Idle),
            total_agents: agents.len(),
            total_issues,
            fixed_issues: policy.fixed_issues(total_issues),
            total_tokens,
            resolution_rate: policy.rate(total_issues),
            prs_merged: store
                .all_activity_events()
                .iter()
                .filter(|e| e.event_type == EventType::Merge)
                .count(),
            prs_linked: agents.iter().filter(|a| a.pr.is_some()).count(),
        };

        tracing::debug!(?stats, "computed dashboard stats");
        stats
    }
}

/// Compact token count: `12500` -> `"12.5k"`, `999` -> `"999"`.
pub fn format_tokens(tokens: u64) -> String {
    if tokens >= 1000 {
        // Tenths of a thousand, halves rounded up
        let tenths = (tokens + 50) / 100;
        format!("{}.{}k", tenths / 10, tenths % 10)
    } else {
        tokens.to_string()
    }
}
