//! TUI Views module
//!
//! Contains the view implementations for the TUI.

mod agents;
mod dashboard;
mod projects;
mod settings;

pub use agents::AgentRegistryView;
pub use dashboard::render_dashboard;
pub use projects::{ProjectDetailView, ProjectsView};
pub use settings::render_settings;

use ratatui::{style::Color, widgets::ListState};

use crate::models::{AgentStatus, EventType, ProjectStatus};

/// Cursor over a list whose length may change between frames.
#[derive(Debug)]
pub struct Selection {
    /// Selected row index
    pub selected: usize,
    /// List widget state
    pub list_state: ListState,
}

impl Default for Selection {
    fn default() -> Self {
        Self::new()
    }
}

impl Selection {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            selected: 0,
            list_state,
        }
    }

    /// Keep selection valid after the list shrank.
    pub fn clamp(&mut self, len: usize) {
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
        self.list_state.select(Some(self.selected));
    }

    /// Move selection down
    pub fn select_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected = (self.selected + 1).min(len - 1);
        self.list_state.select(Some(self.selected));
    }

    /// Move selection up
    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
        self.list_state.select(Some(self.selected));
    }

    /// Jump to top
    pub fn select_first(&mut self) {
        self.selected = 0;
        self.list_state.select(Some(0));
    }

    /// Jump to bottom
    pub fn select_last(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected = len - 1;
        self.list_state.select(Some(self.selected));
    }
}

pub(crate) fn agent_status_color(status: AgentStatus) -> Color {
    match status {
        AgentStatus::Running => Color::Cyan,
        AgentStatus::Complete => Color::Green,
        AgentStatus::Failed => Color::Red,
        AgentStatus::Idle => Color::DarkGray,
    }
}

pub(crate) fn project_status_color(status: ProjectStatus) -> Color {
    match status {
        ProjectStatus::Healthy => Color::Green,
        ProjectStatus::Warning => Color::Yellow,
        ProjectStatus::Critical => Color::Red,
    }
}

pub(crate) fn event_color(event_type: EventType) -> Color {
    match event_type {
        EventType::Start => Color::Cyan,
        EventType::Complete | EventType::Merge => Color::Green,
        EventType::Fix => Color::Yellow,
        EventType::Scan => Color::Blue,
        EventType::Error => Color::Red,
    }
}
