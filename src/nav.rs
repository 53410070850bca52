//! In-process navigation between dashboard views.
//!
//! Views are addressed by path, the same paths the web dashboard used:
//! `/`, `/projects`, `/projects/<id>`, `/agents`, `/settings`.

use serde::Serialize;
use std::fmt;

/// A navigable view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", content = "id", rename_all = "snake_case")]
pub enum Route {
    Dashboard,
    Projects,
    /// Build with [`Route::project`]; the id must be a single path segment
    ProjectDetail(String),
    Agents,
    Settings,
}

impl Route {
    /// Parse a path. Unknown paths return `None`.
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim();
        let trimmed = trimmed.strip_prefix('/').unwrap_or(trimmed);
        let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
        let segments: Vec<&str> = if trimmed.is_empty() {
            Vec::new()
        } else {
            trimmed.split('/').collect()
        };

        match segments.as_slice() {
            [] => Some(Route::Dashboard),
            ["projects"] => Some(Route::Projects),
            ["projects", id] => Route::project(id),
            ["agents"] => Some(Route::Agents),
            ["settings"] => Some(Route::Settings),
            _ => None,
        }
    }

    /// Detail route for a project. Ids that cannot survive a trip through
    /// [`Route::path`] (empty, containing `/`, or padded with whitespace)
    /// return `None`.
    pub fn project(id: &str) -> Option<Self> {
        is_path_segment(id).then(|| Route::ProjectDetail(id.to_string()))
    }

    /// Canonical path for this route.
    pub fn path(&self) -> String {
        match self {
            Route::Dashboard => "/".to_string(),
            Route::Projects => "/projects".to_string(),
            Route::ProjectDetail(id) => format!("/projects/{}", id),
            Route::Agents => "/agents".to_string(),
            Route::Settings => "/settings".to_string(),
        }
    }
}

fn is_path_segment(id: &str) -> bool {
    !id.is_empty() && !id.contains('/') && id.trim() == id
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Sidebar navigation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub href: &'static str,
    pub label: &'static str,
}

/// Sidebar entries, top to bottom.
pub const NAV_ITEMS: [NavItem; 4] = [
    NavItem {
        href: "/",
        label: "Dashboard",
    },
    NavItem {
        href: "/projects",
        label: "Projects",
    },
    NavItem {
        href: "/agents",
        label: "Agents",
    },
    NavItem {
        href: "/settings",
        label: "Settings",
    },
];

impl NavItem {
    /// Dashboard is active only on `/`; every other entry is active for
    /// its own path and anything beneath it.
    pub fn is_active(&self, route: &Route) -> bool {
        let path = route.path();
        if self.href == "/" {
            path == "/"
        } else {
            path.starts_with(self.href)
        }
    }
}

/// Index into [`NAV_ITEMS`] of the entry highlighted for `route`.
pub fn active_nav_index(route: &Route) -> Option<usize> {
    NAV_ITEMS.iter().position(|item| item.is_active(route))
}
