//! Projects View - project list and per-project detail with tabs

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs},
};

use super::{Selection, agent_status_color, event_color, project_status_color};
use crate::models::Agent;
use crate::query::{ProjectDetail, format_tokens};
use crate::state::ProjectTab;
use crate::store::DataStore;

/// State for the project list
#[derive(Debug, Default)]
pub struct ProjectsView {
    pub selection: Selection,
}

impl ProjectsView {
    pub fn new() -> Self {
        Self::default()
    }

    /// ID of the highlighted project, if any.
    pub fn selected_id<'a>(&self, store: &'a dyn DataStore) -> Option<&'a str> {
        store
            .all_projects()
            .get(self.selection.selected)
            .map(|p| p.id.as_str())
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, store: &dyn DataStore) {
        let projects = store.all_projects();
        self.selection.clamp(projects.len());

        if projects.is_empty() {
            let empty = Paragraph::new(" No projects found.")
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL).title(" Projects "));
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = projects
            .iter()
            .map(|p| {
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(
                            format!(" {:<28}", p.name),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(
                            format!("[{}]", p.status),
                            Style::default().fg(project_status_color(p.status)),
                        ),
                    ]),
                    Line::from(Span::styled(
                        format!(
                            "   {}  agents: {}  issues: {}  {}",
                            p.domain, p.agents, p.issues, p.last_activity
                        ),
                        Style::default().fg(Color::DarkGray),
                    )),
                ])
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" Projects "))
            .highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol(">");
        frame.render_stateful_widget(list, area, &mut self.selection.list_state);
    }
}

/// State for a single project's detail view
#[derive(Debug)]
pub struct ProjectDetailView {
    pub project_id: String,
    pub tab: ProjectTab,
}

impl ProjectDetailView {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            tab: ProjectTab::default(),
        }
    }

    pub fn next_tab(&mut self) {
        self.tab = self.tab.next();
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, store: &dyn DataStore) {
        let Some(detail) = ProjectDetail::build(store, &self.project_id) else {
            let missing = Paragraph::new(vec![
                Line::from(format!(" Project not found: {}", self.project_id)),
                Line::from(Span::styled(
                    " Backspace: back to projects",
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .block(Block::default().borders(Borders::ALL));
            frame.render_widget(missing, area);
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Header
                Constraint::Length(3), // Tabs
                Constraint::Min(3),    // Tab content
            ])
            .split(area);

        let p = detail.project;
        let header = Paragraph::new(vec![
            Line::from(vec![
                Span::styled(
                    format!(" {} ", p.name),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("[{}]", p.status),
                    Style::default().fg(project_status_color(p.status)),
                ),
            ]),
            Line::from(Span::styled(
                format!(
                    " Active agents {} of {} total   Open issues {}   Health {}%   Last activity {}",
                    detail.running_agents, p.agents, p.issues, detail.health_score, p.last_activity
                ),
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, chunks[0]);

        let titles: Vec<&str> = ProjectTab::ALL.iter().map(|t| t.label()).collect();
        let selected = ProjectTab::ALL
            .iter()
            .position(|t| *t == self.tab)
            .unwrap_or(0);
        let tabs = Tabs::new(titles)
            .select(selected)
            .highlight_style(Style::default().add_modifier(Modifier::BOLD).fg(Color::Cyan))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(tabs, chunks[1]);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", self.tab.label()));
        match self.tab {
            ProjectTab::Agents => {
                let list = agent_list(&detail.agents, "No agents assigned to this project yet.");
                frame.render_widget(list.block(block), chunks[2]);
            }
            ProjectTab::Tasks => {
                let list = agent_list(&detail.tasks(), "No tasks in progress.");
                frame.render_widget(list.block(block), chunks[2]);
            }
            ProjectTab::Activity => {
                let items: Vec<ListItem> = if detail.activity.is_empty() {
                    vec![ListItem::new(" No activity recorded for this project.")]
                } else {
                    detail
                        .activity
                        .iter()
                        .map(|e| {
                            ListItem::new(Line::from(vec![
                                Span::styled(
                                    format!(" {:>7} ", e.time),
                                    Style::default().fg(Color::DarkGray),
                                ),
                                Span::styled(
                                    "● ",
                                    Style::default().fg(event_color(e.event_type)),
                                ),
                                Span::raw(e.event.clone()),
                            ]))
                        })
                        .collect()
                };
                frame.render_widget(List::new(items).block(block), chunks[2]);
            }
            ProjectTab::Context => {
                let label = Style::default().add_modifier(Modifier::BOLD);
                let context = Paragraph::new(vec![
                    Line::from(Span::styled(" Repository", label)),
                    Line::from(format!("   {}", p.repo_url())),
                    Line::from(""),
                    Line::from(Span::styled(" Domain", label)),
                    Line::from(format!("   {}", p.domain_url())),
                ])
                .block(block);
                frame.render_widget(context, chunks[2]);
            }
        }
    }
}

fn agent_list<'a>(agents: &[&Agent], empty: &'a str) -> List<'a> {
    if agents.is_empty() {
        return List::new(vec![ListItem::new(format!(" {}", empty))]);
    }
    let items: Vec<ListItem> = agents
        .iter()
        .map(|a| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!(" {:<9}", a.status.label()),
                    Style::default().fg(agent_status_color(a.status)),
                ),
                Span::styled(
                    format!("{:<18}", a.label),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("{:<32}", a.task)),
                Span::styled(
                    format!("{:>8} {:>7}", a.runtime, format_tokens(a.tokens)),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();
    List::new(items)
}
