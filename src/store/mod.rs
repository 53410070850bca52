//! Read-only data stores for Mission Control.
//!
//! A store owns the three collections (projects, agents, activity events)
//! for the lifetime of the process and hands out borrowed slices. Nothing
//! downstream of a store mutates it.
//!
//! Implementations:
//! - `StaticStore` - Compiled-in mock data (default)
//! - `FixtureStore` - Collections loaded once from a JSON fixture file

mod fixture;
mod static_data;

pub use fixture::{FixtureData, FixtureStore};
pub use static_data::StaticStore;

use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;

use crate::Result;
use crate::models::{ActivityEvent, Agent, Project};

/// Trait for read-only sources of dashboard data.
///
/// Collections are returned in insertion order. Implementations must be
/// immutable once constructed so concurrent readers never need locking.
pub trait DataStore: Send + Sync {
    /// All projects, in insertion order.
    fn all_projects(&self) -> &[Project];

    /// All agents, in insertion order.
    fn all_agents(&self) -> &[Agent];

    /// All activity events, in insertion order.
    fn all_activity_events(&self) -> &[ActivityEvent];

    /// Get the store description (for display purposes).
    fn location(&self) -> String;
}

/// Open the store named by configuration.
///
/// With no data file the built-in data set is used. `strict` rejects
/// fixtures containing dangling references.
pub fn open(data_file: Option<&Path>, strict: bool) -> Result<Box<dyn DataStore>> {
    match data_file {
        None => Ok(Box::new(StaticStore::new())),
        Some(path) if strict => Ok(Box::new(FixtureStore::load_strict(path)?)),
        Some(path) => Ok(Box::new(FixtureStore::load(path)?)),
    }
}

/// A foreign key that does not resolve to an existing record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingReference {
    /// Kind of record holding the reference ("agent" or "event")
    pub kind: &'static str,
    /// Identifier of the record holding the reference
    pub id: String,
    /// Field holding the reference
    pub field: &'static str,
    /// The unresolved target identifier
    pub target: String,
}

impl std::fmt::Display for DanglingReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} references missing {} '{}'",
            self.kind, self.id, self.field, self.target
        )
    }
}

/// Check every agent and event foreign key against the store.
///
/// Returns the dangling references in collection order (agents first, then
/// events). An empty result means the store is referentially sound.
pub fn validate_references(store: &dyn DataStore) -> Vec<DanglingReference> {
    let project_ids: HashSet<&str> = store
        .all_projects()
        .iter()
        .map(|p| p.id.as_str())
        .collect();
    let agent_ids: HashSet<&str> = store.all_agents().iter().map(|a| a.id.as_str()).collect();

    let mut dangling = Vec::new();

    for agent in store.all_agents() {
        if !project_ids.contains(agent.project_id.as_str()) {
            dangling.push(DanglingReference {
                kind: "agent",
                id: agent.id.clone(),
                field: "project_id",
                target: agent.project_id.clone(),
            });
        }
    }

    for event in store.all_activity_events() {
        if !project_ids.contains(event.project_id.as_str()) {
            dangling.push(DanglingReference {
                kind: "event",
                id: event.id.clone(),
                field: "project_id",
                target: event.project_id.clone(),
            });
        }
        if let Some(ref agent_id) = event.agent_id {
            if !agent_ids.contains(agent_id.as_str()) {
                dangling.push(DanglingReference {
                    kind: "event",
                    id: event.id.clone(),
                    field: "agent_id",
                    target: agent_id.clone(),
                });
            }
        }
    }

    for reference in &dangling {
        tracing::warn!(%reference, "dangling reference");
    }

    dangling
}
