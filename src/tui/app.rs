//! TUI Application - main event loop and terminal management
//!
//! This module contains the core TUI application logic including:
//! - Terminal setup and restoration
//! - Event loop for keyboard input
//! - Route switching between dashboard, projects, agents, and settings

use std::io::{self, Stdout, stdout};
use std::time::Duration;

use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use super::views::{
    AgentRegistryView, ProjectDetailView, ProjectsView, render_dashboard, render_settings,
};
use crate::config::ResolvedConfig;
use crate::models::AgentStatus;
use crate::nav::{NAV_ITEMS, Route, active_nav_index};
use crate::state::SidebarState;
use crate::store::DataStore;

/// How long to wait for a key before redrawing
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Sidebar width when expanded / collapsed
const SIDEBAR_WIDTH: u16 = 18;
const SIDEBAR_COLLAPSED_WIDTH: u16 = 5;

/// Where keystrokes go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Keys are commands
    Normal,
    /// Keys edit the agent search text
    Search,
}

/// TUI Application state
pub struct TuiApp<'a> {
    store: &'a dyn DataStore,
    config: &'a ResolvedConfig,
    /// Current route
    route: Route,
    sidebar: SidebarState,
    input_mode: InputMode,
    projects_view: ProjectsView,
    /// Detail view, present while a project route is open
    detail_view: Option<ProjectDetailView>,
    agents_view: AgentRegistryView,
    /// Whether to quit the application
    should_quit: bool,
    /// Last key pressed (for gg detection)
    last_key: Option<KeyCode>,
}

impl<'a> TuiApp<'a> {
    /// Create a new TUI application
    pub fn new(store: &'a dyn DataStore, config: &'a ResolvedConfig) -> Self {
        Self {
            store,
            config,
            route: Route::Dashboard,
            sidebar: SidebarState::default(),
            input_mode: InputMode::Normal,
            projects_view: ProjectsView::new(),
            detail_view: None,
            agents_view: AgentRegistryView::new(),
            should_quit: false,
            last_key: None,
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Switch to another view.
    pub fn navigate(&mut self, route: Route) {
        tracing::debug!(from = %self.route, to = %route, "navigate");
        self.detail_view = match &route {
            Route::ProjectDetail(id) => Some(ProjectDetailView::new(id.clone())),
            _ => None,
        };
        self.input_mode = InputMode::Normal;
        self.route = route;
    }

    fn navigate_to_nav_item(&mut self, index: usize) {
        if let Some(route) = NAV_ITEMS.get(index).and_then(|item| Route::parse(item.href)) {
            self.navigate(route);
        }
    }

    /// Cycle through the sidebar entries
    fn next_view(&mut self) {
        let next = active_nav_index(&self.route).map_or(0, |i| (i + 1) % NAV_ITEMS.len());
        self.navigate_to_nav_item(next);
    }

    /// Length of the list under the cursor, if the current view has one
    fn list_len(&self) -> Option<usize> {
        match self.route {
            Route::Projects => Some(self.store.all_projects().len()),
            Route::Agents => Some(self.agents_view.visible_len(self.store)),
            _ => None,
        }
    }

    fn move_cursor(&mut self, key: KeyCode) {
        let Some(len) = self.list_len() else {
            return;
        };
        let selection = match self.route {
            Route::Projects => &mut self.projects_view.selection,
            _ => &mut self.agents_view.selection,
        };
        match key {
            KeyCode::Char('j') | KeyCode::Down => selection.select_next(len),
            KeyCode::Char('k') | KeyCode::Up => selection.select_previous(),
            KeyCode::Char('G') | KeyCode::End => selection.select_last(len),
            KeyCode::Char('g') | KeyCode::Home => selection.select_first(),
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter | KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Backspace => self.agents_view.pop_search(),
            KeyCode::Char(c) => self.agents_view.push_search(c),
            _ => {}
        }
    }

    /// Handle keyboard events
    pub fn handle_key(&mut self, key: KeyCode) {
        if self.input_mode == InputMode::Search {
            self.handle_search_key(key);
            return;
        }

        // An open dialog takes every key but quit
        if self.agents_view.state.dialog.is_some() {
            match key {
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace => {
                    self.agents_view.state.close_dialog()
                }
                _ => {}
            }
            return;
        }

        match key {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc | KeyCode::Backspace => {
                if matches!(self.route, Route::ProjectDetail(_)) {
                    self.navigate(Route::Projects);
                } else if key == KeyCode::Esc {
                    self.should_quit = true;
                }
            }
            KeyCode::Char('b') => self.sidebar.toggle(),
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                self.navigate_to_nav_item(index);
            }
            KeyCode::Tab => match &mut self.detail_view {
                Some(detail) => detail.next_tab(),
                None => self.next_view(),
            },
            KeyCode::Char('g') => {
                // Check for gg sequence
                if self.last_key == Some(KeyCode::Char('g')) {
                    self.move_cursor(key);
                    self.last_key = None;
                    return;
                }
            }
            KeyCode::Char('j' | 'k' | 'G')
            | KeyCode::Down
            | KeyCode::Up
            | KeyCode::End
            | KeyCode::Home => self.move_cursor(key),
            KeyCode::Enter => match self.route {
                Route::Projects => {
                    if let Some(route) = self
                        .projects_view
                        .selected_id(self.store)
                        .and_then(Route::project)
                    {
                        self.navigate(route);
                    }
                }
                Route::Agents => self.agents_view.open_selected(self.store),
                _ => {}
            },
            KeyCode::Char('/') if self.route == Route::Agents => {
                self.input_mode = InputMode::Search;
            }
            KeyCode::Char(c @ ('r' | 'o' | 'f' | 'i')) if self.route == Route::Agents => {
                let status = match c {
                    'r' => AgentStatus::Running,
                    'o' => AgentStatus::Complete,
                    'f' => AgentStatus::Failed,
                    _ => AgentStatus::Idle,
                };
                self.agents_view.toggle_status(status);
            }
            KeyCode::Char('p') if self.route == Route::Agents => {
                self.agents_view.toggle_project(self.store)
            }
            KeyCode::Char('c') if self.route == Route::Agents => self.agents_view.clear_filters(),
            _ => {}
        }
        self.last_key = Some(key);
    }

    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        // Create main layout
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title bar
                Constraint::Min(5),    // Main content
                Constraint::Length(3), // Status bar
            ])
            .split(area);

        self.render_title_bar(frame, chunks[0]);

        let sidebar_width = if self.sidebar.collapsed {
            SIDEBAR_COLLAPSED_WIDTH
        } else {
            SIDEBAR_WIDTH
        };
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(sidebar_width), Constraint::Min(20)])
            .split(chunks[1]);

        self.render_sidebar(frame, body[0]);

        let content = body[1];
        let store = self.store;
        match &self.route {
            Route::Dashboard => render_dashboard(
                frame,
                content,
                store,
                self.config.resolution_policy(),
                self.config.recent_activity_limit(),
            ),
            Route::Projects => self.projects_view.render(frame, content, store),
            Route::ProjectDetail(_) => {
                if let Some(detail) = &self.detail_view {
                    detail.render(frame, content, store);
                }
            }
            Route::Agents => {
                let searching = self.input_mode == InputMode::Search;
                self.agents_view.render(frame, content, store, searching);
            }
            Route::Settings => render_settings(frame, content, self.config, &store.location()),
        }

        self.render_status_bar(frame, chunks[2]);
    }

    /// Render the title bar with the current path and data source
    fn render_title_bar(&self, frame: &mut Frame, area: Rect) {
        let left = format!(" Mission Control  {}", self.route.path());
        let right = format!("data: {}", self.store.location());
        let padding = area
            .width
            .saturating_sub(left.len() as u16 + right.len() as u16 + 3);

        let title = Paragraph::new(Line::from(vec![
            Span::styled(left, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" ".repeat(padding as usize)),
            Span::styled(right, Style::default().fg(Color::DarkGray)),
        ]))
        .block(Block::default().borders(Borders::ALL));

        frame.render_widget(title, area);
    }

    fn render_sidebar(&self, frame: &mut Frame, area: Rect) {
        let active = active_nav_index(&self.route);
        let items: Vec<ListItem> = NAV_ITEMS
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let text = if self.sidebar.collapsed {
                    format!(" {}", i + 1)
                } else {
                    format!(" {} {}", i + 1, item.label)
                };
                let style = if active == Some(i) {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(text).style(style)
            })
            .collect();
        frame.render_widget(
            List::new(items).block(Block::default().borders(Borders::ALL)),
            area,
        );
    }

    /// Render the status bar with keybindings
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let hints = match (&self.route, self.input_mode) {
            (Route::Agents, InputMode::Search) => {
                " Type to search  Backspace:Delete  Enter/Esc:Done"
            }
            (Route::Agents, _) if self.agents_view.state.dialog.is_some() => {
                " Esc:Close  q:Quit"
            }
            (Route::Agents, _) => {
                " j/k:Navigate  Enter:Details  /:Search  r/o/f/i:Status  p:Project  c:Clear  b:Sidebar  q:Quit"
            }
            (Route::Projects, _) => {
                " j/k:Navigate  Enter:Open  1-4/Tab:Switch View  b:Sidebar  q:Quit"
            }
            (Route::ProjectDetail(_), _) => {
                " Tab:Next Tab  Esc:Back  1-4:Switch View  b:Sidebar  q:Quit"
            }
            _ => " 1-4/Tab:Switch View  b:Sidebar  q:Quit",
        };
        let status = Paragraph::new(hints)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(status, area);
    }
}

/// Setup the terminal for TUI mode
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    Terminal::new(backend)
}

/// Restore the terminal to normal mode
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut TuiApp<'_>,
) -> io::Result<()> {
    while !app.should_quit {
        terminal.draw(|f| app.render(f))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code);
                }
            }
        }
    }
    Ok(())
}

/// Run the TUI application
///
/// The terminal is restored even when the event loop fails.
pub fn run_tui(store: &dyn DataStore, config: &ResolvedConfig) -> crate::Result<()> {
    let mut app = TuiApp::new(store, config);
    tracing::info!(data = %store.location(), "starting TUI");

    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &mut app);
    restore_terminal()?;

    Ok(result?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ProjectTab;
    use crate::store::StaticStore;
    use ratatui::backend::TestBackend;

    fn app(config: &ResolvedConfig) -> TuiApp<'_> {
        TuiApp::new(StaticStore::shared(), config)
    }

    fn screen(app: &mut TuiApp<'_>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_number_keys_switch_views() {
        let config = ResolvedConfig::default();
        let mut app = app(&config);
        assert_eq!(app.route(), &Route::Dashboard);

        app.handle_key(KeyCode::Char('2'));
        assert_eq!(app.route(), &Route::Projects);
        app.handle_key(KeyCode::Char('3'));
        assert_eq!(app.route(), &Route::Agents);
        app.handle_key(KeyCode::Char('4'));
        assert_eq!(app.route(), &Route::Settings);

        app.handle_key(KeyCode::Tab);
        assert_eq!(app.route(), &Route::Dashboard);
    }

    #[test]
    fn test_open_project_and_cycle_tabs() {
        let config = ResolvedConfig::default();
        let mut app = app(&config);
        app.handle_key(KeyCode::Char('2'));
        app.handle_key(KeyCode::Char('j'));
        app.handle_key(KeyCode::Enter);
        assert_eq!(
            app.route(),
            &Route::ProjectDetail("productos-design".to_string())
        );

        app.handle_key(KeyCode::Tab);
        app.handle_key(KeyCode::Tab);
        let tab = app.detail_view.as_ref().map(|d| d.tab);
        assert_eq!(tab, Some(ProjectTab::Activity));
        // Tab cycles tabs here, not views
        assert!(matches!(app.route(), Route::ProjectDetail(_)));

        app.handle_key(KeyCode::Esc);
        assert_eq!(app.route(), &Route::Projects);
        assert!(!app.should_quit());
    }

    #[test]
    fn test_gg_jumps_to_top() {
        let config = ResolvedConfig::default();
        let mut app = app(&config);
        app.handle_key(KeyCode::Char('3'));
        app.handle_key(KeyCode::Char('G'));
        assert_eq!(app.agents_view.selection.selected, 5);

        app.handle_key(KeyCode::Char('g'));
        assert_eq!(app.agents_view.selection.selected, 5);
        app.handle_key(KeyCode::Char('g'));
        assert_eq!(app.agents_view.selection.selected, 0);
    }

    #[test]
    fn test_search_mode_captures_keys() {
        let config = ResolvedConfig::default();
        let mut app = app(&config);
        app.handle_key(KeyCode::Char('3'));
        app.handle_key(KeyCode::Char('/'));
        assert_eq!(app.input_mode(), InputMode::Search);

        // 'q' is search text here, not quit
        for c in "verq".chars() {
            app.handle_key(KeyCode::Char(c));
        }
        app.handle_key(KeyCode::Backspace);
        app.handle_key(KeyCode::Char('i'));
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.input_mode(), InputMode::Normal);
        assert!(!app.should_quit());
        assert_eq!(app.agents_view.state.filter.search, "veri");
        assert_eq!(app.agents_view.visible_len(app.store), 3);

        app.handle_key(KeyCode::Char('o'));
        assert_eq!(
            app.agents_view.state.filter.status,
            Some(AgentStatus::Complete)
        );
        // verify-develop is still running
        assert_eq!(app.agents_view.visible_len(app.store), 2);

        // Same key again returns to "no filter"
        app.handle_key(KeyCode::Char('o'));
        assert_eq!(app.agents_view.state.filter.status, None);
        assert_eq!(app.agents_view.visible_len(app.store), 3);

        app.handle_key(KeyCode::Char('r'));
        app.handle_key(KeyCode::Char('p'));
        assert!(app.agents_view.state.filter.project.is_some());

        app.handle_key(KeyCode::Char('c'));
        assert!(!app.agents_view.state.filter.is_active());
    }

    #[test]
    fn test_dialog_opens_and_closes() {
        let config = ResolvedConfig::default();
        let mut app = app(&config);
        app.handle_key(KeyCode::Char('3'));
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.agents_view.state.dialog.as_deref(), Some("agent-1"));

        // Navigation keys are swallowed while the dialog is open
        app.handle_key(KeyCode::Char('2'));
        assert_eq!(app.route(), &Route::Agents);

        app.handle_key(KeyCode::Esc);
        assert_eq!(app.agents_view.state.dialog, None);
        assert!(!app.should_quit());
    }

    #[test]
    fn test_sidebar_toggle_and_quit() {
        let config = ResolvedConfig::default();
        let mut app = app(&config);
        app.handle_key(KeyCode::Char('b'));
        assert!(app.sidebar.collapsed);
        app.handle_key(KeyCode::Char('q'));
        assert!(app.should_quit());
    }

    #[test]
    fn test_render_dashboard() {
        let config = ResolvedConfig::default();
        let mut app = app(&config);
        let text = screen(&mut app);
        assert!(text.contains("Mission Control"));
        assert!(text.contains("Agents Running"));
        assert!(text.contains("verify-develop"));
    }

    #[test]
    fn test_render_every_view() {
        let config = ResolvedConfig::default();
        let mut app = app(&config);

        app.handle_key(KeyCode::Char('2'));
        assert!(screen(&mut app).contains("ProductOS - Build"));

        app.handle_key(KeyCode::Enter);
        assert!(screen(&mut app).contains("Health 98%"));

        app.handle_key(KeyCode::Char('3'));
        app.handle_key(KeyCode::Enter);
        assert!(screen(&mut app).contains("Communication Log"));
        app.handle_key(KeyCode::Esc);

        app.handle_key(KeyCode::Char('4'));
        assert!(screen(&mut app).contains("unresolved-offset"));
    }

    #[test]
    fn test_render_missing_project() {
        let config = ResolvedConfig::default();
        let mut app = app(&config);
        app.navigate(Route::ProjectDetail("nonexistent-id".to_string()));
        assert!(screen(&mut app).contains("Project not found: nonexistent-id"));
    }
}
