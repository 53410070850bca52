//! Dashboard View - summary cards, agent table, and recent activity

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use super::{agent_status_color, event_color};
use crate::query::{self, DashboardStats, ResolutionPolicy, format_tokens};
use crate::store::DataStore;

pub fn render_dashboard(
    frame: &mut Frame,
    area: Rect,
    store: &dyn DataStore,
    policy: ResolutionPolicy,
    activity_limit: usize,
) {
    let stats = DashboardStats::compute(store, policy);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(5)])
        .split(area);

    let cards = [
        (
            "Agents Running",
            stats.running_agents.to_string(),
            format!("of {} agents active", stats.total_agents),
        ),
        (
            "Issues Found",
            stats.total_issues.to_string(),
            "in current mission".to_string(),
        ),
        (
            "Issues Fixed",
            stats.fixed_issues.to_string(),
            format!("{} resolution rate", stats.resolution_rate),
        ),
        (
            "PRs Merged",
            stats.prs_merged.to_string(),
            "successfully deployed".to_string(),
        ),
        (
            "Tokens Used",
            format_tokens(stats.total_tokens),
            format!("{} complete, {} failed", stats.complete_agents, stats.failed_agents),
        ),
    ];

    let card_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 5); 5])
        .split(chunks[0]);

    for ((title, value, caption), card_area) in cards.iter().zip(card_areas.iter()) {
        let card = Paragraph::new(vec![
            Line::from(Span::styled(
                value.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                caption.clone(),
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .block(Block::default().borders(Borders::ALL).title(*title));
        frame.render_widget(card, *card_area);
    }

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    let agent_items: Vec<ListItem> = store
        .all_agents()
        .iter()
        .map(|agent| {
            let project = query::project_of(store, agent)
                .map(|p| p.short_name())
                .unwrap_or("-");
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!(" {:<9}", agent.status.label()),
                    Style::default().fg(agent_status_color(agent.status)),
                ),
                Span::styled(
                    format!("{:<18}", agent.label),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("{:<10}", project), Style::default().fg(Color::Blue)),
                Span::raw(format!("{:>8}  ", agent.runtime)),
                Span::styled(
                    format_tokens(agent.tokens),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let agents = if agent_items.is_empty() {
        List::new(vec![ListItem::new(" No agents registered.")])
    } else {
        List::new(agent_items)
    };
    frame.render_widget(
        agents.block(Block::default().borders(Borders::ALL).title(" Active Agents ")),
        body[0],
    );

    let events: Vec<ListItem> = store
        .all_activity_events()
        .iter()
        .take(activity_limit)
        .map(|event| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!(" {:>7} ", event.time),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled("● ", Style::default().fg(event_color(event.event_type))),
                Span::raw(event.event.clone()),
            ]))
        })
        .collect();

    let activity = if events.is_empty() {
        List::new(vec![ListItem::new(" No activity recorded.")])
    } else {
        List::new(events)
    };
    frame.render_widget(
        activity.block(Block::default().borders(Borders::ALL).title(" Recent Activity ")),
        body[1],
    );
}
