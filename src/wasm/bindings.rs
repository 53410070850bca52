//! JavaScript bindings for the browser dashboard
//!
//! [`MissionControlState`] holds a store and answers queries as JSON
//! strings. It builds on every platform so the query surface is testable
//! natively; the `MissionControl` class wraps it for wasm32.

use crate::Result;
use crate::models::AgentStatus;
use crate::query::{AgentFilter, DashboardStats, ProjectDetail, ResolutionPolicy};
use crate::store::{DataStore, FixtureStore, StaticStore};

/// Store plus query entry points exposed to JavaScript
pub struct MissionControlState {
    store: Box<dyn DataStore>,
}

impl Default for MissionControlState {
    fn default() -> Self {
        Self::new()
    }
}

impl MissionControlState {
    /// State over the built-in data set.
    pub fn new() -> Self {
        Self {
            store: Box::new(StaticStore::new()),
        }
    }

    /// State over a JSON fixture (same shape as `--data` files).
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self {
            store: Box::new(FixtureStore::from_json(json)?),
        })
    }

    pub fn projects_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self.store.all_projects())?)
    }

    /// Filtered agent list. Empty `status`/`project` mean "all".
    pub fn agents_json(
        &self,
        search: &str,
        status: Option<&str>,
        project: Option<&str>,
    ) -> Result<String> {
        let status = match status.filter(|s| !s.is_empty()) {
            Some(s) => Some(s.parse::<AgentStatus>()?),
            None => None,
        };
        let filter = AgentFilter::new()
            .with_search(search)
            .with_status(status)
            .with_project(project.filter(|p| !p.is_empty()).map(str::to_string));
        Ok(serde_json::to_string(&filter.apply(self.store.as_ref()))?)
    }

    pub fn stats_json(&self, unresolved_offset: u64) -> Result<String> {
        let stats = DashboardStats::compute(
            self.store.as_ref(),
            ResolutionPolicy::new(unresolved_offset),
        );
        Ok(serde_json::to_string(&stats)?)
    }

    /// Project detail, or `None` for an unknown id.
    pub fn project_json(&self, id: &str) -> Result<Option<String>> {
        ProjectDetail::build(self.store.as_ref(), id)
            .map(|detail| serde_json::to_string(&detail))
            .transpose()
            .map_err(Into::into)
    }
}

#[cfg(target_arch = "wasm32")]
mod js {
    use wasm_bindgen::prelude::*;

    use super::MissionControlState;

    fn to_js(e: crate::Error) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    #[wasm_bindgen]
    pub struct MissionControl {
        inner: MissionControlState,
    }

    #[wasm_bindgen]
    impl MissionControl {
        #[wasm_bindgen(constructor)]
        pub fn new() -> MissionControl {
            crate::wasm::init_panic_hook();
            MissionControl {
                inner: MissionControlState::new(),
            }
        }

        #[wasm_bindgen(js_name = fromJson)]
        pub fn from_json(json: &str) -> Result<MissionControl, JsValue> {
            crate::wasm::init_panic_hook();
            Ok(MissionControl {
                inner: MissionControlState::from_json(json).map_err(to_js)?,
            })
        }

        pub fn projects(&self) -> Result<String, JsValue> {
            self.inner.projects_json().map_err(to_js)
        }

        pub fn agents(
            &self,
            search: &str,
            status: Option<String>,
            project: Option<String>,
        ) -> Result<String, JsValue> {
            self.inner
                .agents_json(search, status.as_deref(), project.as_deref())
                .map_err(to_js)
        }

        pub fn stats(&self, unresolved_offset: Option<u32>) -> Result<String, JsValue> {
            self.inner
                .stats_json(u64::from(unresolved_offset.unwrap_or(0)))
                .map_err(to_js)
        }

        pub fn project(&self, id: &str) -> Result<Option<String>, JsValue> {
            self.inner.project_json(id).map_err(to_js)
        }
    }

    #[wasm_bindgen(js_name = formatTokens)]
    pub fn format_tokens(tokens: f64) -> String {
        crate::query::format_tokens(tokens.max(0.0) as u64)
    }
}

#[cfg(target_arch = "wasm32")]
pub use js::{MissionControl, format_tokens};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projects_json() {
        let state = MissionControlState::new();
        let projects: serde_json::Value =
            serde_json::from_str(&state.projects_json().unwrap()).unwrap();
        assert_eq!(projects.as_array().map(|a| a.len()), Some(3));
        assert_eq!(projects[0]["id"], "productos-build");
    }

    #[test]
    fn test_agents_json_filters() {
        let state = MissionControlState::new();
        let json = state.agents_json("verify", Some("complete"), Some("")).unwrap();
        let agents: serde_json::Value = serde_json::from_str(&json).unwrap();
        let ids: Vec<&str> = agents
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, ["agent-4", "agent-5"]);
    }

    #[test]
    fn test_agents_json_rejects_unknown_status() {
        let state = MissionControlState::new();
        assert!(state.agents_json("", Some("sleeping"), None).is_err());
    }

    #[test]
    fn test_stats_json() {
        let state = MissionControlState::new();
        let stats: serde_json::Value =
            serde_json::from_str(&state.stats_json(0).unwrap()).unwrap();
        assert_eq!(stats["running_agents"], 2);
        assert_eq!(stats["total_tokens"], 76880);
    }

    #[test]
    fn test_project_json() {
        let state = MissionControlState::new();
        let detail = state.project_json("productos-design").unwrap().unwrap();
        let detail: serde_json::Value = serde_json::from_str(&detail).unwrap();
        assert_eq!(detail["health_score"], 75);
        assert_eq!(state.project_json("nonexistent-id").unwrap(), None);
    }

    #[test]
    fn test_from_json_fixture() {
        let state = MissionControlState::from_json(r#"{"projects": []}"#).unwrap();
        assert_eq!(state.projects_json().unwrap(), "[]");
        assert!(MissionControlState::from_json("not json").is_err());
    }
}
