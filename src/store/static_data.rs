//! Compiled-in mock data set.

use std::sync::OnceLock;

use super::DataStore;
use crate::models::{
    ActivityEvent, Agent, AgentStatus, EventType, Message, MessageDirection, Project,
    ProjectStatus,
};

static SHARED: OnceLock<StaticStore> = OnceLock::new();

/// The built-in mock collections: three ProductOS projects, six agents,
/// and six activity events.
#[derive(Debug, Clone)]
pub struct StaticStore {
    projects: Vec<Project>,
    agents: Vec<Agent>,
    activity: Vec<ActivityEvent>,
}

impl Default for StaticStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticStore {
    /// Build a fresh copy of the mock data.
    pub fn new() -> Self {
        Self {
            projects: projects(),
            agents: agents(),
            activity: activity(),
        }
    }

    /// Process-wide instance, built on first use and never mutated.
    pub fn shared() -> &'static StaticStore {
        SHARED.get_or_init(StaticStore::new)
    }
}

impl DataStore for StaticStore {
    fn all_projects(&self) -> &[Project] {
        &self.projects
    }

    fn all_agents(&self) -> &[Agent] {
        &self.agents
    }

    fn all_activity_events(&self) -> &[ActivityEvent] {
        &self.activity
    }

    fn location(&self) -> String {
        "built-in".to_string()
    }
}

#[allow(clippy::too_many_arguments)]
fn project(
    id: &str,
    name: &str,
    domain: &str,
    repo: &str,
    agents: u32,
    issues: u32,
    status: ProjectStatus,
    last_activity: &str,
) -> Project {
    Project {
        id: id.to_string(),
        name: name.to_string(),
        domain: domain.to_string(),
        repo: repo.to_string(),
        agents,
        issues,
        status,
        last_activity: last_activity.to_string(),
    }
}

fn msg(direction: MessageDirection, content: &str, time: &str) -> Message {
    Message {
        direction,
        content: content.to_string(),
        time: time.to_string(),
    }
}

struct AgentSeed<'a> {
    id: &'a str,
    label: &'a str,
    project_id: &'a str,
    task: &'a str,
    status: AgentStatus,
    runtime: &'a str,
    started_at: &'a str,
    tokens: u64,
    pr: Option<&'a str>,
    messages: Vec<Message>,
}

impl From<AgentSeed<'_>> for Agent {
    fn from(seed: AgentSeed<'_>) -> Self {
        Agent {
            id: seed.id.to_string(),
            label: seed.label.to_string(),
            project_id: seed.project_id.to_string(),
            task: seed.task.to_string(),
            status: seed.status,
            runtime: seed.runtime.to_string(),
            started_at: seed.started_at.to_string(),
            tokens: seed.tokens,
            pr: seed.pr.map(str::to_string),
            messages: seed.messages,
        }
    }
}

fn event(
    id: &str,
    project_id: &str,
    time: &str,
    text: &str,
    event_type: EventType,
    agent_id: Option<&str>,
) -> ActivityEvent {
    ActivityEvent {
        id: id.to_string(),
        project_id: project_id.to_string(),
        time: time.to_string(),
        event: text.to_string(),
        event_type,
        agent_id: agent_id.map(str::to_string),
    }
}

fn projects() -> Vec<Project> {
    vec![
        project(
            "productos-build",
            "ProductOS - Build",
            "build.productos.dev",
            "virusha-tech/Product-OS-app",
            2,
            4,
            ProjectStatus::Healthy,
            "5m ago",
        ),
        project(
            "productos-design",
            "ProductOS - Design",
            "design.productos.dev",
            "virusha-tech/productos-design",
            1,
            4,
            ProjectStatus::Warning,
            "12m ago",
        ),
        project(
            "productos-develop",
            "ProductOS - Develop",
            "develop.productos.dev",
            "virusha-tech/productos-develop",
            3,
            10,
            ProjectStatus::Healthy,
            "2m ago",
        ),
    ]
}

fn agents() -> Vec<Agent> {
    use MessageDirection::{Inbound, Outbound};

    let seeds = vec![
        AgentSeed {
            id: "agent-1",
            label: "verify-develop",
            project_id: "productos-develop",
            task: "Testing fixes 1-10",
            status: AgentStatus::Running,
            runtime: "2m",
            started_at: "2m ago",
            tokens: 12_500,
            pr: None,
            messages: vec![
                msg(Inbound, "Verify fixes 1-10 on the develop branch", "2m ago"),
                msg(Outbound, "Running regression suite against develop", "1m ago"),
            ],
        },
        AgentSeed {
            id: "agent-2",
            label: "code-agent",
            project_id: "productos-develop",
            task: "Implementing feature #42",
            status: AgentStatus::Running,
            runtime: "5m",
            started_at: "5m ago",
            tokens: 8_420,
            pr: None,
            messages: vec![
                msg(Inbound, "Implement feature #42", "5m ago"),
                msg(Outbound, "Scaffolded settings panel, wiring API next", "3m ago"),
            ],
        },
        AgentSeed {
            id: "agent-3",
            label: "planner-agent",
            project_id: "productos-develop",
            task: "Planning sprint tasks",
            status: AgentStatus::Complete,
            runtime: "8m",
            started_at: "10m ago",
            tokens: 3_150,
            pr: None,
            messages: vec![
                msg(Inbound, "Plan the next sprint from open issues", "10m ago"),
                msg(Outbound, "Sprint plan drafted: 10 tasks across 3 agents", "2m ago"),
            ],
        },
        AgentSeed {
            id: "agent-4",
            label: "verify-design",
            project_id: "productos-design",
            task: "Testing UI components",
            status: AgentStatus::Complete,
            runtime: "3m",
            started_at: "15m ago",
            tokens: 18_340,
            pr: None,
            messages: vec![
                msg(Inbound, "Verify fixes 15-18 in the design system", "15m ago"),
                msg(Outbound, "All component tests passed", "3m ago"),
            ],
        },
        AgentSeed {
            id: "agent-5",
            label: "verify-build",
            project_id: "productos-build",
            task: "Testing fixes 11-14",
            status: AgentStatus::Complete,
            runtime: "4m",
            started_at: "20m ago",
            tokens: 9_870,
            pr: Some("#42"),
            messages: vec![
                msg(Inbound, "Verify fixes 11-14 and merge when green", "20m ago"),
                msg(Outbound, "Checks green, merged PR #42", "4m ago"),
            ],
        },
        AgentSeed {
            id: "agent-6",
            label: "fix-upgrade-flow",
            project_id: "productos-build",
            task: "Issues 1-3",
            status: AgentStatus::Complete,
            runtime: "7m",
            started_at: "25m ago",
            tokens: 24_600,
            pr: Some("#41"),
            messages: vec![
                msg(Inbound, "Fix issues 1-3 in the upgrade flow", "25m ago"),
                msg(Outbound, "Patched plan upgrade redirect and billing sync", "12m ago"),
                msg(Outbound, "Opened PR #41 with fixes for issues 1-3", "7m ago"),
            ],
        },
    ];

    seeds.into_iter().map(Agent::from).collect()
}

fn activity() -> Vec<ActivityEvent> {
    vec![
        event(
            "evt-1",
            "productos-develop",
            "2m ago",
            "verify-develop started testing fixes 1-10",
            EventType::Start,
            Some("agent-1"),
        ),
        event(
            "evt-2",
            "productos-design",
            "3m ago",
            "verify-design completed all tests",
            EventType::Complete,
            Some("agent-4"),
        ),
        event(
            "evt-3",
            "productos-build",
            "4m ago",
            "verify-build merged PR #42",
            EventType::Merge,
            Some("agent-5"),
        ),
        event(
            "evt-4",
            "productos-build",
            "7m ago",
            "fix-upgrade-flow fixed issues 1-3",
            EventType::Fix,
            Some("agent-6"),
        ),
        event(
            "evt-5",
            "productos-develop",
            "10m ago",
            "18 issues identified in develop branch",
            EventType::Scan,
            None,
        ),
        event(
            "evt-6",
            "productos-develop",
            "12m ago",
            "Mission started by Heemang",
            EventType::Start,
            None,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_store_counts() {
        let store = StaticStore::new();
        assert_eq!(store.all_projects().len(), 3);
        assert_eq!(store.all_agents().len(), 6);
        assert_eq!(store.all_activity_events().len(), 6);
    }

    #[test]
    fn test_static_store_preserves_insertion_order() {
        let store = StaticStore::shared();
        let ids: Vec<&str> = store.all_agents().iter().map(|a| a.id.as_str()).collect();
        assert_eq!(
            ids,
            ["agent-1", "agent-2", "agent-3", "agent-4", "agent-5", "agent-6"]
        );
    }

    #[test]
    fn test_shared_returns_same_instance() {
        assert!(std::ptr::eq(StaticStore::shared(), StaticStore::shared()));
    }
}
