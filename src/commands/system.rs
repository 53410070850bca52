//! Navigation, integrity check, and resolved settings.

use serde::Serialize;

use super::{Output, agent_list, dashboard, json_line, project_list, project_show};
use crate::config::{ResolvedConfig, config_path};
use crate::nav::Route;
use crate::query::AgentFilter;
use crate::store::{DanglingReference, DataStore, validate_references};
use crate::{Error, Result};

/// Render the view a navigation path names.
pub fn open(
    store: &dyn DataStore,
    path: &str,
    config: &ResolvedConfig,
) -> Result<Box<dyn Output>> {
    let route = Route::parse(path).ok_or_else(|| {
        Error::InvalidInput(format!(
            "Unknown path '{}'. Valid paths: /, /projects, /projects/<id>, /agents, /settings",
            path
        ))
    })?;
    tracing::debug!(%route, "opening view");

    let view: Box<dyn Output> = match route {
        Route::Dashboard => Box::new(dashboard(
            store,
            config.resolution_policy(),
            config.recent_activity_limit(),
        )),
        Route::Projects => Box::new(project_list(store)),
        Route::ProjectDetail(id) => Box::new(project_show(store, &id)?),
        Route::Agents => Box::new(agent_list(store, AgentFilter::new())),
        Route::Settings => Box::new(config_show(config, &store.location())),
    };
    Ok(view)
}

/// Result of `mc doctor`.
#[derive(Debug, Clone, Serialize)]
pub struct DoctorResult {
    pub ok: bool,
    pub location: String,
    pub projects: usize,
    pub agents: usize,
    pub events: usize,
    pub dangling: Vec<DanglingReference>,
}

impl Output for DoctorResult {
    fn to_json(&self) -> String {
        json_line(self)
    }

    fn to_human(&self) -> String {
        let mut lines = vec![format!(
            "Data: {} ({} projects, {} agents, {} events)",
            self.location, self.projects, self.agents, self.events
        )];
        if self.ok {
            lines.push("All references resolve.".to_string());
        } else {
            lines.push(format!("{} dangling reference(s):", self.dangling.len()));
            lines.extend(self.dangling.iter().map(|d| format!("  {}", d)));
        }
        lines.join("\n")
    }
}

/// Check referential integrity of the loaded data.
pub fn doctor(store: &dyn DataStore) -> DoctorResult {
    let dangling = validate_references(store);
    DoctorResult {
        ok: dangling.is_empty(),
        location: store.location(),
        projects: store.all_projects().len(),
        agents: store.all_agents().len(),
        events: store.all_activity_events().len(),
        dangling,
    }
}

/// Compile-time build metadata.
#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    pub commit: &'static str,
    pub built_at: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            commit: env!("MC_GIT_COMMIT"),
            built_at: env!("MC_BUILD_TIMESTAMP"),
        }
    }
}

/// Result of `mc config show`: the settings view.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigShow {
    pub config_path: Option<String>,
    pub data: String,
    pub config: ResolvedConfig,
    pub build: BuildInfo,
}

impl Output for ConfigShow {
    fn to_json(&self) -> String {
        json_line(self)
    }

    fn to_human(&self) -> String {
        let c = &self.config;
        let data_file = match &c.data_file {
            Some(r) => format!("{} ({})", r.value.display(), r.source),
            None => "built-in (default)".to_string(),
        };
        [
            "Settings".to_string(),
            format!(
                "  Config file:            {}",
                self.config_path.as_deref().unwrap_or("(none)")
            ),
            format!("  Data:                   {}", self.data),
            format!("  data-file:              {}", data_file),
            format!(
                "  output-format:          {} ({})",
                c.output_format.value, c.output_format.source
            ),
            format!(
                "  unresolved-offset:      {} ({})",
                c.unresolved_offset.value, c.unresolved_offset.source
            ),
            format!(
                "  recent-activity-limit:  {} ({})",
                c.recent_activity_limit.value, c.recent_activity_limit.source
            ),
            String::new(),
            format!(
                "mc {} ({}, built {})",
                self.build.version, self.build.commit, self.build.built_at
            ),
        ]
        .join("\n")
    }
}

/// Show resolved configuration with value sources.
pub fn config_show(config: &ResolvedConfig, data_location: &str) -> ConfigShow {
    ConfigShow {
        config_path: config_path().map(|p| p.display().to_string()),
        data: data_location.to_string(),
        config: config.clone(),
        build: BuildInfo::current(),
    }
}
