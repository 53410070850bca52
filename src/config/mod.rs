//! Configuration for Mission Control.
//!
//! ## config.kdl - User preferences
//!
//! Located at `~/.config/mission-control/config.kdl`, or under the
//! directory named by `MC_CONFIG_DIR`.
//!
//! Contains:
//! - `output-format` - "json" or "human"
//! - `data-file` - JSON fixture to load instead of the built-in data
//! - `unresolved-offset` - Issues assumed open when estimating the resolution rate
//! - `recent-activity-limit` - Events shown on the dashboard
//!
//! ## Precedence
//!
//! CLI flag > environment variable > config.kdl > defaults
//!
//! Use the [`resolver`] module for unified precedence resolution.

pub mod resolver;
pub mod schema;

pub use resolver::{
    ConfigOverrides, DATA_FILE_ENV, Resolved, ResolvedConfig, ValueSource, resolve_config,
    resolve_with,
};
pub use schema::{CONFIG_DIR_ENV, McConfig, OutputFormat, config_path, read_config};
