//! Agent registry commands.

use serde::Serialize;

use super::{Output, cell, json_line};
use crate::models::{Agent, AgentStatus, Message, MessageDirection};
use crate::query::{self, AgentFilter, format_tokens};
use crate::store::DataStore;
use crate::{Error, Result};

/// One row of the agent table.
#[derive(Debug, Clone, Serialize)]
pub struct AgentRow {
    pub id: String,
    pub label: String,
    pub project_id: String,
    /// Short project name, `None` if the project does not resolve
    pub project: Option<String>,
    pub task: String,
    pub status: AgentStatus,
    pub runtime: String,
    pub tokens: u64,
    pub tokens_display: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pr: Option<String>,
}

impl AgentRow {
    pub fn new(store: &dyn DataStore, agent: &Agent) -> Self {
        Self {
            id: agent.id.clone(),
            label: agent.label.clone(),
            project_id: agent.project_id.clone(),
            project: query::project_of(store, agent).map(|p| p.short_name().to_string()),
            task: agent.task.clone(),
            status: agent.status,
            runtime: agent.runtime.clone(),
            tokens: agent.tokens,
            tokens_display: format_tokens(agent.tokens),
            pr: agent.pr.clone(),
        }
    }

    pub(crate) fn human_line(&self) -> String {
        format!(
            "  {} {} {} {} {:>6} {:>7}",
            cell(&self.label, 18),
            cell(self.project.as_deref().unwrap_or("-"), 10),
            cell(&self.task, 26),
            cell(self.status.label(), 9),
            self.runtime,
            self.tokens_display
        )
    }
}

pub(crate) fn rows(store: &dyn DataStore, agents: &[&Agent]) -> Vec<AgentRow> {
    agents.iter().map(|a| AgentRow::new(store, a)).collect()
}

/// Result of `mc agent list` (and the project agents/tasks tabs).
#[derive(Debug, Clone, Serialize)]
pub struct AgentList {
    pub count: usize,
    pub filter: AgentFilter,
    pub agents: Vec<AgentRow>,
    #[serde(skip)]
    pub(crate) empty_message: &'static str,
}

impl AgentList {
    pub(crate) fn new(
        filter: AgentFilter,
        agents: Vec<AgentRow>,
        empty_message: &'static str,
    ) -> Self {
        Self {
            count: agents.len(),
            filter,
            agents,
            empty_message,
        }
    }
}

impl Output for AgentList {
    fn to_json(&self) -> String {
        json_line(self)
    }

    fn to_human(&self) -> String {
        if self.agents.is_empty() {
            return self.empty_message.to_string();
        }
        let mut lines = vec![format!("{} agent(s):", self.count)];
        lines.extend(self.agents.iter().map(AgentRow::human_line));
        lines.join("\n")
    }
}

/// Filter the agent registry.
pub fn agent_list(store: &dyn DataStore, filter: AgentFilter) -> AgentList {
    let agents = rows(store, &filter.apply(store));
    let empty_message = if filter.is_active() {
        "No agents match the current filters."
    } else {
        "No agents registered."
    };
    AgentList::new(filter, agents, empty_message)
}

/// Result of `mc agent show`.
#[derive(Debug, Clone, Serialize)]
pub struct AgentShow {
    #[serde(flatten)]
    pub agent: Agent,
    pub project_name: Option<String>,
    pub tokens_display: String,
}

impl Output for AgentShow {
    fn to_json(&self) -> String {
        json_line(self)
    }

    fn to_human(&self) -> String {
        let agent = &self.agent;
        let mut lines = vec![
            format!("{} ({})", agent.label, agent.id),
            format!(
                "  Project:  {}",
                self.project_name.as_deref().unwrap_or(&agent.project_id)
            ),
            format!("  Task:     {}", agent.task),
            format!("  Status:   {}", agent.status.label()),
            format!("  Runtime:  {} (started {})", agent.runtime, agent.started_at),
            format!("  Tokens:   {}", self.tokens_display),
        ];
        if let Some(ref pr) = agent.pr {
            lines.push(format!("  PR:       {}", pr));
        }
        lines.push(String::new());
        if agent.messages.is_empty() {
            lines.push("No messages recorded.".to_string());
        } else {
            lines.push("Communication log:".to_string());
            lines.extend(agent.messages.iter().map(message_line));
        }
        lines.join("\n")
    }
}

fn message_line(message: &Message) -> String {
    let arrow = match message.direction {
        MessageDirection::Inbound => "->",
        MessageDirection::Outbound => "<-",
    };
    format!("  {} [{}] {}", arrow, message.time, message.content)
}

/// Show one agent with its communication log.
pub fn agent_show(store: &dyn DataStore, id: &str) -> Result<AgentShow> {
    let agent = query::get_agent(store, id)
        .ok_or_else(|| Error::NotFound(format!("Agent not found: {}", id)))?;
    Ok(AgentShow {
        agent: agent.clone(),
        project_name: query::project_of(store, agent).map(|p| p.name.clone()),
        tokens_display: format_tokens(agent.tokens),
    })
}
