//! Agent Registry View - filterable agent list with a detail dialog
//!
//! Filtering goes through [`AgentRegistryState`], so the TUI narrows the
//! list exactly the way `mc agent list` does.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

use super::{Selection, agent_status_color};
use crate::models::{AgentStatus, MessageDirection};
use crate::query::{self, format_tokens};
use crate::state::AgentRegistryState;
use crate::store::DataStore;

/// State for the agent registry view
#[derive(Debug, Default)]
pub struct AgentRegistryView {
    pub state: AgentRegistryState,
    pub selection: Selection,
}

impl AgentRegistryView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of agents passing the current filter.
    pub fn visible_len(&self, store: &dyn DataStore) -> usize {
        self.state.visible(store).len()
    }

    /// Select `status`, or drop the status filter if it is already selected.
    pub fn toggle_status(&mut self, status: AgentStatus) {
        self.state.filter.toggle_status(status);
        self.selection.select_first();
    }

    /// Filter to the highlighted agent's project, or drop an active
    /// project filter.
    pub fn toggle_project(&mut self, store: &dyn DataStore) {
        let target = match &self.state.filter.project {
            Some(current) => Some(current.clone()),
            None => self
                .state
                .visible(store)
                .get(self.selection.selected)
                .map(|a| a.project_id.clone()),
        };
        if let Some(id) = target {
            self.state.filter.toggle_project(&id);
        }
        self.selection.select_first();
    }

    pub fn push_search(&mut self, c: char) {
        self.state.filter.search.push(c);
        self.selection.select_first();
    }

    pub fn pop_search(&mut self) {
        self.state.filter.search.pop();
        self.selection.select_first();
    }

    pub fn clear_filters(&mut self) {
        self.state.filter.clear();
        self.selection.select_first();
    }

    /// Open the dialog for the highlighted agent.
    pub fn open_selected(&mut self, store: &dyn DataStore) {
        let visible = self.state.visible(store);
        if let Some(agent) = visible.get(self.selection.selected) {
            self.state.open_dialog(agent.id.clone());
        }
    }

    fn filter_line(&self, store: &dyn DataStore, searching: bool) -> Line<'static> {
        let filter = &self.state.filter;
        let search = if searching {
            format!("{}_", filter.search)
        } else if filter.search.is_empty() {
            "-".to_string()
        } else {
            filter.search.clone()
        };
        let status = filter.status.map_or("All", |s| s.label());
        let project = filter
            .project
            .as_deref()
            .map(|id| {
                query::get_project(store, id)
                    .map(|p| p.short_name().to_string())
                    .unwrap_or_else(|| id.to_string())
            })
            .unwrap_or_else(|| "All".to_string());

        let key = Style::default().fg(Color::DarkGray);
        Line::from(vec![
            Span::styled(" Search: ", key),
            Span::raw(search),
            Span::styled("   Status: ", key),
            Span::raw(status),
            Span::styled("   Project: ", key),
            Span::raw(project),
        ])
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        store: &dyn DataStore,
        searching: bool,
    ) {
        let visible = self.state.visible(store);
        self.selection.clamp(visible.len());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(3)])
            .split(area);

        let filters = Paragraph::new(self.filter_line(store, searching))
            .block(Block::default().borders(Borders::ALL).title(" Filters "));
        frame.render_widget(filters, chunks[0]);

        let title = format!(" Agents ({} of {}) ", visible.len(), store.all_agents().len());
        if visible.is_empty() {
            let message = if self.state.filter.is_active() {
                " No agents match the current filters."
            } else {
                " No agents registered."
            };
            let empty = Paragraph::new(message)
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL).title(title));
            frame.render_widget(empty, chunks[1]);
        } else {
            let items: Vec<ListItem> = visible
                .iter()
                .map(|a| {
                    let project = query::project_of(store, a)
                        .map(|p| p.short_name())
                        .unwrap_or("-");
                    ListItem::new(Line::from(vec![
                        Span::styled(
                            format!(" {:<9}", a.status.label()),
                            Style::default().fg(agent_status_color(a.status)),
                        ),
                        Span::styled(
                            format!("{:<18}", a.label),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(format!("{:<10}", project), Style::default().fg(Color::Blue)),
                        Span::raw(format!("{:<32}", a.task)),
                        Span::styled(
                            format!(
                                "{:>8} {:>7} {}",
                                a.runtime,
                                format_tokens(a.tokens),
                                a.pr.as_deref().unwrap_or("")
                            ),
                            Style::default().fg(Color::DarkGray),
                        ),
                    ]))
                })
                .collect();
            let list = List::new(items)
                .block(Block::default().borders(Borders::ALL).title(title))
                .highlight_style(Style::default().bg(Color::DarkGray))
                .highlight_symbol(">");
            frame.render_stateful_widget(list, chunks[1], &mut self.selection.list_state);
        }

        self.render_dialog(frame, area, store);
    }

    fn render_dialog(&self, frame: &mut Frame, area: Rect, store: &dyn DataStore) {
        let Some(agent) = self.state.dialog_agent(store) else {
            return;
        };

        let popup = centered_rect(70, 70, area);
        let dim = Style::default().fg(Color::DarkGray);
        let project = query::project_of(store, agent)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| agent.project_id.clone());

        let mut lines = vec![
            Line::from(vec![
                Span::styled(
                    format!(" {} ", agent.label),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("[{}]", agent.status.label()),
                    Style::default().fg(agent_status_color(agent.status)),
                ),
            ]),
            Line::from(Span::styled(format!(" {}", agent.task), dim)),
            Line::from(""),
            Line::from(format!(" Project   {}", project)),
            Line::from(format!(" Started   {}", agent.started_at)),
            Line::from(format!(" Runtime   {}", agent.runtime)),
            Line::from(format!(" Tokens    {}", format_tokens(agent.tokens))),
        ];
        if let Some(pr) = &agent.pr {
            lines.push(Line::from(format!(" PR        {}", pr)));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            " Communication Log",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        if agent.messages.is_empty() {
            lines.push(Line::from(Span::styled(" No messages yet.", dim)));
        }
        for message in &agent.messages {
            let (arrow, color) = match message.direction {
                MessageDirection::Inbound => ("->", Color::Cyan),
                MessageDirection::Outbound => ("<-", Color::Green),
            };
            lines.push(Line::from(vec![
                Span::styled(format!(" {} ", arrow), Style::default().fg(color)),
                Span::styled(format!("[{}] ", message.time), dim),
                Span::raw(message.content.clone()),
            ]));
        }

        let dialog = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Agent Details ")
                    .title_bottom(" Esc: close "),
            );
        frame.render_widget(Clear, popup);
        frame.render_widget(dialog, popup);
    }
}

/// Rectangle of the given percentage size centered in `area`.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
