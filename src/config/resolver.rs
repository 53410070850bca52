//! Precedence resolution for configuration.
//!
//! ## Precedence (highest to lowest)
//!
//! 1. CLI flags (passed at runtime)
//! 2. Environment variables (`MC_DATA` for the data file)
//! 3. config.kdl
//! 4. Built-in defaults

use serde::Serialize;
use std::path::PathBuf;

use crate::Result;
use crate::config::schema::{McConfig, OutputFormat, read_config};
use crate::query::ResolutionPolicy;

/// Environment variable naming a JSON fixture to load.
pub const DATA_FILE_ENV: &str = "MC_DATA";

/// Default number of events in the dashboard's recent activity list.
pub const DEFAULT_RECENT_ACTIVITY_LIMIT: usize = 6;

/// Tracks where a resolved value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
    /// Value from environment variable
    EnvVar(String),
    /// Value from config.kdl
    ConfigFile,
    /// Value from CLI flag
    CliFlag,
    /// Built-in default value
    Default,
}

impl std::fmt::Display for ValueSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueSource::EnvVar(name) => write!(f, "env:{}", name),
            ValueSource::ConfigFile => write!(f, "config"),
            ValueSource::CliFlag => write!(f, "cli"),
            ValueSource::Default => write!(f, "default"),
        }
    }
}

impl Serialize for ValueSource {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A resolved value with its source.
#[derive(Debug, Clone, Serialize)]
pub struct Resolved<T> {
    /// The resolved value
    pub value: T,
    /// Where the value came from
    pub source: ValueSource,
}

impl<T> Resolved<T> {
    /// Create a new resolved value.
    pub fn new(value: T, source: ValueSource) -> Self {
        Self { value, source }
    }
}

/// Fully resolved configuration with source tracking.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedConfig {
    pub output_format: Resolved<OutputFormat>,
    /// `None` means the built-in data set
    pub data_file: Option<Resolved<PathBuf>>,
    pub unresolved_offset: Resolved<u64>,
    pub recent_activity_limit: Resolved<usize>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            output_format: Resolved::new(OutputFormat::Json, ValueSource::Default),
            data_file: None,
            unresolved_offset: Resolved::new(0, ValueSource::Default),
            recent_activity_limit: Resolved::new(
                DEFAULT_RECENT_ACTIVITY_LIMIT,
                ValueSource::Default,
            ),
        }
    }
}

impl ResolvedConfig {
    /// Get the output format value.
    pub fn output_format(&self) -> OutputFormat {
        self.output_format.value
    }

    /// Get the data file, if one is configured.
    pub fn data_file(&self) -> Option<&PathBuf> {
        self.data_file.as_ref().map(|r| &r.value)
    }

    /// Resolution-rate policy built from the configured offset.
    pub fn resolution_policy(&self) -> ResolutionPolicy {
        ResolutionPolicy::new(self.unresolved_offset.value)
    }

    /// Get the recent activity limit.
    pub fn recent_activity_limit(&self) -> usize {
        self.recent_activity_limit.value
    }
}

/// CLI overrides for configuration resolution.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Output format override from CLI flag
    pub output_format: Option<OutputFormat>,
    /// Data file override from CLI flag
    pub data_file: Option<PathBuf>,
}

impl ConfigOverrides {
    /// Create empty overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set output format override.
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = Some(format);
        self
    }

    /// Set data file override.
    pub fn with_data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = Some(path.into());
        self
    }
}

/// Resolve configuration against config.kdl and the process environment.
pub fn resolve_config(overrides: &ConfigOverrides) -> Result<ResolvedConfig> {
    let file_config = read_config()?;
    let env_data = std::env::var(DATA_FILE_ENV).ok().filter(|v| !v.is_empty());
    Ok(resolve_with(overrides, env_data, &file_config))
}

/// Resolve configuration from explicit inputs.
///
/// `env_data` is the value of `MC_DATA`, if set.
pub fn resolve_with(
    overrides: &ConfigOverrides,
    env_data: Option<String>,
    file_config: &McConfig,
) -> ResolvedConfig {
    let mut result = ResolvedConfig::default();

    // Resolve output_format
    if let Some(format) = overrides.output_format {
        result.output_format = Resolved::new(format, ValueSource::CliFlag);
    } else if let Some(format) = file_config.output_format {
        result.output_format = Resolved::new(format, ValueSource::ConfigFile);
    }

    // Resolve data_file
    if let Some(ref path) = overrides.data_file {
        result.data_file = Some(Resolved::new(path.clone(), ValueSource::CliFlag));
    } else if let Some(path) = env_data {
        result.data_file = Some(Resolved::new(
            PathBuf::from(path),
            ValueSource::EnvVar(DATA_FILE_ENV.to_string()),
        ));
    } else if let Some(ref path) = file_config.data_file {
        result.data_file = Some(Resolved::new(path.clone(), ValueSource::ConfigFile));
    }
    // else: remains None (built-in data)

    if let Some(offset) = file_config.unresolved_offset {
        result.unresolved_offset = Resolved::new(offset, ValueSource::ConfigFile);
    }

    if let Some(limit) = file_config.recent_activity_limit {
        result.recent_activity_limit = Resolved::new(limit, ValueSource::ConfigFile);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_nothing_set() {
        let resolved = resolve_with(&ConfigOverrides::new(), None, &McConfig::new());
        assert_eq!(resolved.output_format(), OutputFormat::Json);
        assert_eq!(resolved.output_format.source, ValueSource::Default);
        assert!(resolved.data_file().is_none());
        assert_eq!(resolved.resolution_policy(), ResolutionPolicy::new(0));
        assert_eq!(resolved.recent_activity_limit(), DEFAULT_RECENT_ACTIVITY_LIMIT);
    }

    #[test]
    fn test_cli_beats_env_beats_file() {
        let file = McConfig {
            data_file: Some(PathBuf::from("file.json")),
            ..Default::default()
        };

        let resolved = resolve_with(&ConfigOverrides::new(), None, &file);
        assert_eq!(resolved.data_file(), Some(&PathBuf::from("file.json")));
        assert_eq!(
            resolved.data_file.as_ref().unwrap().source,
            ValueSource::ConfigFile
        );

        let resolved = resolve_with(&ConfigOverrides::new(), Some("env.json".to_string()), &file);
        assert_eq!(resolved.data_file(), Some(&PathBuf::from("env.json")));
        assert_eq!(
            resolved.data_file.as_ref().unwrap().source,
            ValueSource::EnvVar(DATA_FILE_ENV.to_string())
        );

        let overrides = ConfigOverrides::new().with_data_file("cli.json");
        let resolved = resolve_with(&overrides, Some("env.json".to_string()), &file);
        assert_eq!(resolved.data_file(), Some(&PathBuf::from("cli.json")));
        assert_eq!(
            resolved.data_file.as_ref().unwrap().source,
            ValueSource::CliFlag
        );
    }

    #[test]
    fn test_output_format_cli_over_file() {
        let file = McConfig {
            output_format: Some(OutputFormat::Human),
            ..Default::default()
        };
        let resolved = resolve_with(&ConfigOverrides::new(), None, &file);
        assert_eq!(resolved.output_format(), OutputFormat::Human);

        let overrides = ConfigOverrides::new().with_output_format(OutputFormat::Json);
        let resolved = resolve_with(&overrides, None, &file);
        assert_eq!(resolved.output_format(), OutputFormat::Json);
        assert_eq!(resolved.output_format.source, ValueSource::CliFlag);
    }

    #[test]
    fn test_file_sets_policy_and_limit() {
        let file = McConfig {
            unresolved_offset: Some(2),
            recent_activity_limit: Some(3),
            ..Default::default()
        };
        let resolved = resolve_with(&ConfigOverrides::new(), None, &file);
        assert_eq!(resolved.resolution_policy().unresolved_offset, 2);
        assert_eq!(resolved.recent_activity_limit(), 3);
    }

    #[test]
    fn test_value_source_display() {
        assert_eq!(ValueSource::EnvVar("MC_DATA".to_string()).to_string(), "env:MC_DATA");
        assert_eq!(ValueSource::ConfigFile.to_string(), "config");
        assert_eq!(ValueSource::CliFlag.to_string(), "cli");
        assert_eq!(ValueSource::Default.to_string(), "default");
    }
}
