//! Dashboard, statistics, and activity feed commands.

use serde::Serialize;

use super::agent::{AgentRow, rows};
use super::{Output, json_line};
use crate::models::{ActivityEvent, EventType};
use crate::query::{self, DashboardStats, ResolutionPolicy, format_tokens};
use crate::store::DataStore;

/// Result of `mc stats`.
#[derive(Debug, Clone, Serialize)]
pub struct StatsView {
    #[serde(flatten)]
    pub stats: DashboardStats,
    pub tokens_display: String,
    /// Human rendering of the resolution rate ("100%" or "No issues")
    pub resolution_display: String,
}

impl StatsView {
    fn new(stats: DashboardStats) -> Self {
        Self {
            tokens_display: format_tokens(stats.total_tokens),
            resolution_display: stats.resolution_rate.to_string(),
            stats,
        }
    }

    fn cards(&self) -> Vec<String> {
        let s = &self.stats;
        vec![
            format!(
                "Agents Running   {:>6}   of {} agents active",
                s.running_agents, s.total_agents
            ),
            format!("Completed        {:>6}   tasks finished", s.complete_agents),
            format!("Failed           {:>6}", s.failed_agents),
            format!("Issues Found     {:>6}   in current mission", s.total_issues),
            format!(
                "Issues Fixed     {:>6}   {} resolution rate (estimated)",
                s.fixed_issues, self.resolution_display
            ),
            format!("PRs Merged       {:>6}   successfully deployed", s.prs_merged),
            format!("Tokens Used      {:>6}", self.tokens_display),
        ]
    }
}

impl Output for StatsView {
    fn to_json(&self) -> String {
        json_line(self)
    }

    fn to_human(&self) -> String {
        self.cards().join("\n")
    }
}

/// Compute the summary cards.
pub fn stats(store: &dyn DataStore, policy: ResolutionPolicy) -> StatsView {
    StatsView::new(DashboardStats::compute(store, policy))
}

/// Result of `mc dashboard`.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub stats: StatsView,
    pub agents: Vec<AgentRow>,
    pub recent_activity: Vec<ActivityEvent>,
}

impl Output for DashboardView {
    fn to_json(&self) -> String {
        json_line(self)
    }

    fn to_human(&self) -> String {
        let mut lines = vec!["Mission Control".to_string(), String::new()];
        lines.extend(self.stats.cards());

        lines.push(String::new());
        lines.push("Active Agents".to_string());
        if self.agents.is_empty() {
            lines.push("  No agents registered.".to_string());
        } else {
            lines.extend(self.agents.iter().map(AgentRow::human_line));
        }

        lines.push(String::new());
        lines.push("Recent Activity".to_string());
        if self.recent_activity.is_empty() {
            lines.push("  No activity recorded.".to_string());
        } else {
            lines.extend(self.recent_activity.iter().map(event_line));
        }
        lines.join("\n")
    }
}

pub(crate) fn event_line(event: &ActivityEvent) -> String {
    format!(
        "  {:>8}  {:<8}  {}",
        event.time,
        event.event_type.as_str(),
        event.event
    )
}

/// Build the dashboard: stats over everything, every agent, and the most
/// recent `activity_limit` events.
pub fn dashboard(
    store: &dyn DataStore,
    policy: ResolutionPolicy,
    activity_limit: usize,
) -> DashboardView {
    let agents: Vec<_> = store.all_agents().iter().collect();
    DashboardView {
        stats: stats(store, policy),
        agents: rows(store, &agents),
        recent_activity: store
            .all_activity_events()
            .iter()
            .take(activity_limit)
            .cloned()
            .collect(),
    }
}

/// Result of `mc activity` and `mc project activity`.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityList {
    pub count: usize,
    pub events: Vec<ActivityEvent>,
    #[serde(skip)]
    pub(crate) empty_message: &'static str,
}

impl ActivityList {
    pub(crate) fn new(events: Vec<&ActivityEvent>, empty_message: &'static str) -> Self {
        Self {
            count: events.len(),
            events: events.into_iter().cloned().collect(),
            empty_message,
        }
    }
}

impl Output for ActivityList {
    fn to_json(&self) -> String {
        json_line(self)
    }

    fn to_human(&self) -> String {
        if self.events.is_empty() {
            return self.empty_message.to_string();
        }
        let mut lines = vec![format!("{} event(s):", self.count)];
        lines.extend(self.events.iter().map(event_line));
        lines.join("\n")
    }
}

/// Activity feed across projects.
pub fn activity(
    store: &dyn DataStore,
    project_id: Option<&str>,
    event_type: Option<EventType>,
) -> ActivityList {
    let events = query::activity_feed(store, project_id, event_type);
    let empty_message = if project_id.is_some() || event_type.is_some() {
        "No activity matches the current filters."
    } else {
        "No activity recorded."
    };
    ActivityList::new(events, empty_message)
}
