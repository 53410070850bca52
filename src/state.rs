//! Local UI state for dashboard views.
//!
//! Each view owns its state and passes it down explicitly; there is no
//! process-wide mutable state.

use serde::Serialize;

use crate::models::Agent;
use crate::query::AgentFilter;
use crate::store::DataStore;

/// Collapsible sidebar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SidebarState {
    pub collapsed: bool,
}

impl SidebarState {
    pub fn toggle(&mut self) {
        self.collapsed = !self.collapsed;
    }
}

/// Tabs on the project detail view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectTab {
    #[default]
    Agents,
    Tasks,
    Activity,
    Context,
}

impl ProjectTab {
    pub const ALL: [ProjectTab; 4] = [
        ProjectTab::Agents,
        ProjectTab::Tasks,
        ProjectTab::Activity,
        ProjectTab::Context,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ProjectTab::Agents => "Agents",
            ProjectTab::Tasks => "Tasks",
            ProjectTab::Activity => "Activity",
            ProjectTab::Context => "Context",
        }
    }

    /// Next tab, wrapping around.
    pub fn next(&self) -> Self {
        match self {
            ProjectTab::Agents => ProjectTab::Tasks,
            ProjectTab::Tasks => ProjectTab::Activity,
            ProjectTab::Activity => ProjectTab::Context,
            ProjectTab::Context => ProjectTab::Agents,
        }
    }
}

/// State of the agent registry view: the active filter plus the agent
/// whose detail dialog is open, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AgentRegistryState {
    pub filter: AgentFilter,
    pub dialog: Option<String>,
}

impl AgentRegistryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the detail dialog for an agent.
    pub fn open_dialog(&mut self, agent_id: impl Into<String>) {
        self.dialog = Some(agent_id.into());
    }

    pub fn close_dialog(&mut self) {
        self.dialog = None;
    }

    /// Agent shown in the dialog. `None` if no dialog is open or the agent
    /// no longer exists.
    pub fn dialog_agent<'a>(&self, store: &'a dyn DataStore) -> Option<&'a Agent> {
        let id = self.dialog.as_deref()?;
        crate::query::get_agent(store, id)
    }

    /// Agents visible under the current filter.
    pub fn visible<'a>(&self, store: &'a dyn DataStore) -> Vec<&'a Agent> {
        self.filter.apply(store)
    }
}
