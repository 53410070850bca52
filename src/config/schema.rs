//! KDL schema for config.kdl.
//!
//! This module provides:
//! - The `McConfig` struct representing the file
//! - Parsing and validation of KDL
//! - Location of the config directory

use kdl::KdlDocument;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::{Error, Result};

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "MC_CONFIG_DIR";

/// Name of the config file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.kdl";

/// Output format preference for CLI commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON output (default, machine-readable)
    #[default]
    Json,
    /// Human-readable output
    Human,
}

impl OutputFormat {
    /// Parse from string, case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "human" => Some(OutputFormat::Human),
            _ => None,
        }
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Human => "human",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User preferences stored in config.kdl.
///
/// # KDL Schema
///
/// ```kdl
/// output-format "human"  // or "json"
/// data-file "/path/to/fixture.json"
/// unresolved-offset 2
/// recent-activity-limit 6
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct McConfig {
    /// Default output format for CLI commands
    pub output_format: Option<OutputFormat>,

    /// JSON fixture to load instead of the built-in data
    pub data_file: Option<PathBuf>,

    /// Issues assumed unresolved when estimating the resolution rate
    pub unresolved_offset: Option<u64>,

    /// Maximum events shown in the dashboard's recent activity list
    pub recent_activity_limit: Option<usize>,
}

impl McConfig {
    /// Create an empty config with no values set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the config values.
    ///
    /// Returns an error message if any value is invalid.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.recent_activity_limit == Some(0) {
            return Err("recent-activity-limit must be at least 1".to_string());
        }
        Ok(())
    }

    /// Parse config from a KDL document. Unknown nodes and values of the
    /// wrong type are ignored.
    pub fn from_kdl(doc: &KdlDocument) -> Self {
        let mut config = Self::new();

        if let Some(s) = first_string(doc, "output-format") {
            config.output_format = OutputFormat::parse(s);
        }

        if let Some(s) = first_string(doc, "data-file") {
            config.data_file = Some(PathBuf::from(s));
        }

        if let Some(i) = first_integer(doc, "unresolved-offset") {
            config.unresolved_offset = u64::try_from(i).ok();
        }

        if let Some(i) = first_integer(doc, "recent-activity-limit") {
            config.recent_activity_limit = usize::try_from(i).ok();
        }

        config
    }

    /// Parse and validate config text.
    pub fn parse(text: &str) -> Result<Self> {
        let doc: KdlDocument = text
            .parse()
            .map_err(|e: kdl::KdlError| Error::Config(e.to_string()))?;
        let config = Self::from_kdl(&doc);
        config.validate().map_err(Error::Config)?;
        Ok(config)
    }
}

fn first_string<'a>(doc: &'a KdlDocument, name: &str) -> Option<&'a str> {
    doc.get(name)?.entries().first()?.value().as_string()
}

fn first_integer(doc: &KdlDocument, name: &str) -> Option<i128> {
    doc.get(name)?.entries().first()?.value().as_integer()
}

/// Directory holding config.kdl.
///
/// `MC_CONFIG_DIR` wins; otherwise `~/.config/mission-control`.
pub fn config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        if !dir.is_empty() {
            return Some(PathBuf::from(dir));
        }
    }
    dirs::config_dir().map(|d| d.join("mission-control"))
}

/// Full path of config.kdl, if a config directory can be determined.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join(CONFIG_FILE_NAME))
}

/// Read config.kdl. A missing file yields an empty config.
pub fn read_config() -> Result<McConfig> {
    let Some(path) = config_path() else {
        return Ok(McConfig::new());
    };
    if !path.exists() {
        return Ok(McConfig::new());
    }
    let text = fs::read_to_string(&path)?;
    let config = McConfig::parse(&text).map_err(|e| match e {
        Error::Config(msg) => Error::Config(format!("{}: {}", path.display(), msg)),
        other => other,
    })?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== OutputFormat Tests ====================

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::parse("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse("HUMAN"), Some(OutputFormat::Human));
        assert_eq!(OutputFormat::parse("yaml"), None);
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(format!("{}", OutputFormat::Json), "json");
        assert_eq!(format!("{}", OutputFormat::Human), "human");
    }

    // ==================== McConfig Tests ====================

    #[test]
    fn test_config_from_kdl_empty() {
        let doc = KdlDocument::new();
        assert_eq!(McConfig::from_kdl(&doc), McConfig::default());
    }

    #[test]
    fn test_config_from_kdl_full() {
        let kdl = r#"
            output-format "human"
            data-file "/tmp/fixture.json"
            unresolved-offset 2
            recent-activity-limit 4
        "#;
        let doc: KdlDocument = kdl.parse().unwrap();
        let config = McConfig::from_kdl(&doc);

        assert_eq!(config.output_format, Some(OutputFormat::Human));
        assert_eq!(config.data_file, Some(PathBuf::from("/tmp/fixture.json")));
        assert_eq!(config.unresolved_offset, Some(2));
        assert_eq!(config.recent_activity_limit, Some(4));
    }

    #[test]
    fn test_config_ignores_wrong_types() {
        let kdl = r#"
            output-format 3
            unresolved-offset "two"
            recent-activity-limit -1
        "#;
        let doc: KdlDocument = kdl.parse().unwrap();
        assert_eq!(McConfig::from_kdl(&doc), McConfig::default());
    }

    #[test]
    fn test_parse_rejects_zero_activity_limit() {
        let err = McConfig::parse("recent-activity-limit 0").unwrap_err();
        assert!(err.to_string().contains("recent-activity-limit"));
    }

    #[test]
    fn test_parse_rejects_malformed_kdl() {
        assert!(matches!(
            McConfig::parse("output-format \"human"),
            Err(Error::Config(_))
        ));
    }
}
