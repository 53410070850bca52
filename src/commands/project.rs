//! Project list and project detail commands.

use serde::Serialize;

use super::agent::{AgentList, AgentRow, rows};
use super::dashboard::{ActivityList, event_line};
use super::{Output, cell, json_line};
use crate::models::{ActivityEvent, Project};
use crate::query::{self, AgentFilter, ProjectDetail};
use crate::store::DataStore;
use crate::{Error, Result};

fn not_found(id: &str) -> Error {
    Error::NotFound(format!(
        "Project not found: {}. Run `mc project list` to see available projects",
        id
    ))
}

/// Result of `mc project list`.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectList {
    pub count: usize,
    pub projects: Vec<Project>,
}

impl Output for ProjectList {
    fn to_json(&self) -> String {
        json_line(self)
    }

    fn to_human(&self) -> String {
        if self.projects.is_empty() {
            return "No projects found.".to_string();
        }
        let mut lines = vec![format!("{} project(s):", self.count)];
        for p in &self.projects {
            lines.push(String::new());
            lines.push(format!("{} [{}]  ({})", p.name, p.status, p.id));
            lines.push(format!("  {}  {}", p.domain_url(), p.repo_url()));
            lines.push(format!(
                "  Agents: {}  Issues: {}  Last activity: {}",
                p.agents, p.issues, p.last_activity
            ));
        }
        lines.join("\n")
    }
}

/// List every project.
pub fn project_list(store: &dyn DataStore) -> ProjectList {
    let projects = store.all_projects().to_vec();
    ProjectList {
        count: projects.len(),
        projects,
    }
}

/// Result of `mc project show`.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectShow {
    pub project: Project,
    pub running_agents: usize,
    pub health_score: u8,
    pub agents: Vec<AgentRow>,
    pub tasks: Vec<AgentRow>,
    pub activity: Vec<ActivityEvent>,
}

impl Output for ProjectShow {
    fn to_json(&self) -> String {
        json_line(self)
    }

    fn to_human(&self) -> String {
        let p = &self.project;
        let mut lines = vec![
            format!("{} [{}]", p.name, p.status),
            format!("  {}", p.domain_url()),
            format!("  {}", p.repo_url()),
            String::new(),
            format!(
                "Active Agents  {} of {} total",
                self.running_agents, p.agents
            ),
            format!("Open Issues    {}", p.issues),
            format!("Health Score   {}%", self.health_score),
            format!("Last Activity  {}", p.last_activity),
            String::new(),
            "Agents".to_string(),
        ];

        if self.agents.is_empty() {
            lines.push("  No agents assigned to this project yet.".to_string());
        } else {
            lines.extend(self.agents.iter().map(AgentRow::human_line));
        }

        lines.push(String::new());
        lines.push("Tasks".to_string());
        if self.tasks.is_empty() {
            lines.push("  No tasks in progress.".to_string());
        } else {
            for t in &self.tasks {
                lines.push(format!(
                    "  {} assigned to {} ({})",
                    cell(&t.task, 28),
                    t.label,
                    t.status.label()
                ));
            }
        }

        lines.push(String::new());
        lines.push("Activity".to_string());
        if self.activity.is_empty() {
            lines.push("  No activity recorded for this project.".to_string());
        } else {
            lines.extend(self.activity.iter().map(event_line));
        }
        lines.join("\n")
    }
}

/// Project detail with every tab's content.
pub fn project_show(store: &dyn DataStore, id: &str) -> Result<ProjectShow> {
    let detail = ProjectDetail::build(store, id).ok_or_else(|| not_found(id))?;
    Ok(ProjectShow {
        project: detail.project.clone(),
        running_agents: detail.running_agents,
        health_score: detail.health_score,
        agents: rows(store, &detail.agents),
        tasks: rows(store, &detail.tasks()),
        activity: detail.activity.iter().map(|e| (*e).clone()).collect(),
    })
}

/// Agents tab of a project.
pub fn project_agents(store: &dyn DataStore, id: &str) -> Result<AgentList> {
    query::get_project(store, id).ok_or_else(|| not_found(id))?;
    let filter = AgentFilter::new().with_project(Some(id.to_string()));
    let agents = rows(store, &query::get_project_agents(store, id));
    Ok(AgentList::new(
        filter,
        agents,
        "No agents assigned to this project yet.",
    ))
}

/// Tasks tab of a project: agents running or complete.
pub fn project_tasks(store: &dyn DataStore, id: &str) -> Result<AgentList> {
    query::get_project(store, id).ok_or_else(|| not_found(id))?;
    let filter = AgentFilter::new().with_project(Some(id.to_string()));
    let agents = rows(store, &query::project_tasks(store, id));
    Ok(AgentList::new(filter, agents, "No tasks in progress."))
}

/// Activity tab of a project.
pub fn project_activity(store: &dyn DataStore, id: &str) -> Result<ActivityList> {
    query::get_project(store, id).ok_or_else(|| not_found(id))?;
    Ok(ActivityList::new(
        query::get_project_activity(store, id),
        "No activity recorded for this project.",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FixtureStore, StaticStore};

    #[test]
    fn test_project_list() {
        let list = project_list(StaticStore::shared());
        assert_eq!(list.count, 3);
        let human = list.to_human();
        assert!(human.contains("ProductOS - Design [warning]"));
        assert!(human.contains("https://github.com/virusha-tech/productos-design"));
    }

    #[test]
    fn test_project_show() {
        let show = project_show(StaticStore::shared(), "productos-build").unwrap();
        assert_eq!(show.running_agents, 0);
        assert_eq!(show.health_score, 98);
        assert_eq!(show.agents.len(), 2);
        assert_eq!(show.activity.len(), 2);
        let human = show.to_human();
        assert!(human.contains("Active Agents  0 of 2 total"));
        assert!(human.contains("assigned to verify-build"));
    }

    #[test]
    fn test_project_show_not_found() {
        let err = project_show(StaticStore::shared(), "nonexistent-id").unwrap_err();
        assert!(err.to_string().contains("Project not found: nonexistent-id"));
    }

    #[test]
    fn test_project_without_agents_renders_empty_states() {
        let json = r#"{
            "projects": [{"id": "quiet", "name": "Quiet", "domain": "quiet.dev", "repo": "o/quiet", "last_activity": "1d ago"}]
        }"#;
        let store = FixtureStore::from_json(json).unwrap();
        let human = project_show(&store, "quiet").unwrap().to_human();
        assert!(human.contains("No agents assigned to this project yet."));
        assert!(human.contains("No activity recorded for this project."));

        let agents = project_agents(&store, "quiet").unwrap();
        assert_eq!(agents.count, 0);
        assert_eq!(agents.to_human(), "No agents assigned to this project yet.");
    }

    #[test]
    fn test_project_tabs_require_existing_project() {
        let store = StaticStore::shared();
        assert!(project_agents(store, "nope").is_err());
        assert!(project_tasks(store, "nope").is_err());
        assert!(project_activity(store, "nope").is_err());
    }
}
