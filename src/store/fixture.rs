//! JSON fixture store.
//!
//! Loads the three collections from a single JSON document once at startup:
//!
//! ```json
//! { "projects": [...], "agents": [...], "activity": [...] }
//! ```
//!
//! After loading, the store behaves exactly like the built-in one.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use super::{DataStore, validate_references};
use crate::models::{ActivityEvent, Agent, Project};
use crate::{Error, Result};

/// On-disk layout of a fixture file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureData {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub agents: Vec<Agent>,
    #[serde(default)]
    pub activity: Vec<ActivityEvent>,
}

impl FixtureData {
    /// Snapshot another store's collections.
    pub fn from_store(store: &dyn DataStore) -> Self {
        Self {
            projects: store.all_projects().to_vec(),
            agents: store.all_agents().to_vec(),
            activity: store.all_activity_events().to_vec(),
        }
    }
}

/// Store backed by a JSON fixture file.
#[derive(Debug, Clone)]
pub struct FixtureStore {
    data: FixtureData,
    source: Option<PathBuf>,
}

impl FixtureStore {
    /// Build a store from already-parsed data.
    ///
    /// Fails if any collection contains a duplicate identifier.
    pub fn from_data(data: FixtureData) -> Result<Self> {
        check_unique("project", data.projects.iter().map(|p| p.id.as_str()))?;
        check_unique("agent", data.agents.iter().map(|a| a.id.as_str()))?;
        check_unique("event", data.activity.iter().map(|e| e.id.as_str()))?;
        Ok(Self { data, source: None })
    }

    /// Parse a fixture from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let data: FixtureData = serde_json::from_str(json)?;
        Self::from_data(data)
    }

    /// Load a fixture file. Dangling references are tolerated.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let mut store = Self::from_json(&contents)?;
        store.source = Some(path.to_path_buf());
        tracing::debug!(
            path = %path.display(),
            projects = store.data.projects.len(),
            agents = store.data.agents.len(),
            events = store.data.activity.len(),
            "loaded fixture"
        );
        Ok(store)
    }

    /// Load a fixture file, rejecting it if any foreign key is dangling.
    pub fn load_strict(path: &Path) -> Result<Self> {
        let store = Self::load(path)?;
        let dangling = validate_references(&store);
        if let Some(first) = dangling.first() {
            return Err(Error::DanglingReference(format!(
                "{} ({} total)",
                first,
                dangling.len()
            )));
        }
        Ok(store)
    }
}

impl DataStore for FixtureStore {
    fn all_projects(&self) -> &[Project] {
        &self.data.projects
    }

    fn all_agents(&self) -> &[Agent] {
        &self.data.agents
    }

    fn all_activity_events(&self) -> &[ActivityEvent] {
        &self.data.activity
    }

    fn location(&self) -> String {
        match &self.source {
            Some(path) => path.display().to_string(),
            None => "in-memory fixture".to_string(),
        }
    }
}

fn check_unique<'a>(kind: &str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(Error::DuplicateId(format!("{} {}", kind, id)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StaticStore;
    use tempfile::TempDir;

    fn write_fixture(dir: &TempDir, data: &FixtureData) -> PathBuf {
        let path = dir.path().join("fixture.json");
        fs::write(&path, serde_json::to_string_pretty(data).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_load_matches_static_store() {
        let dir = TempDir::new().unwrap();
        let data = FixtureData::from_store(StaticStore::shared());
        let path = write_fixture(&dir, &data);

        let store = FixtureStore::load(&path).unwrap();
        assert_eq!(store.all_projects(), StaticStore::shared().all_projects());
        assert_eq!(store.all_agents(), StaticStore::shared().all_agents());
        assert_eq!(
            store.all_activity_events(),
            StaticStore::shared().all_activity_events()
        );
        assert_eq!(store.location(), path.display().to_string());
    }

    #[test]
    fn test_missing_collections_default_to_empty() {
        let store = FixtureStore::from_json("{}").unwrap();
        assert!(store.all_projects().is_empty());
        assert!(store.all_agents().is_empty());
        assert!(store.all_activity_events().is_empty());
    }

    #[test]
    fn test_duplicate_project_id_rejected() {
        let mut data = FixtureData::from_store(StaticStore::shared());
        let duplicate = data.projects[0].clone();
        data.projects.push(duplicate);

        let err = FixtureStore::from_data(data).unwrap_err();
        assert!(matches!(err, Error::DuplicateId(ref id) if id == "project productos-build"));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(matches!(
            FixtureStore::from_json("{not json"),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let result = FixtureStore::load(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_strict_load_rejects_dangling_project() {
        let dir = TempDir::new().unwrap();
        let mut data = FixtureData::from_store(StaticStore::shared());
        data.agents[2].project_id = "retired-project".to_string();
        let path = write_fixture(&dir, &data);

        assert!(FixtureStore::load(&path).is_ok());
        let err = FixtureStore::load_strict(&path).unwrap_err();
        assert!(err.to_string().contains("retired-project"));
    }
}
