//! Mission Control - a dashboard over agents, projects, and their activity.
//!
//! This library provides the core functionality for the `mc` CLI tool:
//! the data model, read-only data stores, and the query/aggregation layer
//! that every view (CLI, TUI, browser) renders from.

#[cfg(not(target_arch = "wasm32"))]
pub mod cli;
#[cfg(not(target_arch = "wasm32"))]
pub mod commands;
#[cfg(not(target_arch = "wasm32"))]
pub mod config;
pub mod models;
pub mod nav;
pub mod query;
pub mod state;
pub mod store;
#[cfg(not(target_arch = "wasm32"))]
pub mod tui;
#[cfg(feature = "wasm")]
pub mod wasm;

/// Library-level error type for Mission Control operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Duplicate ID: {0}")]
    DuplicateId(String),

    #[error("Dangling reference: {0}")]
    DanglingReference(String),
}

/// Result type alias for Mission Control operations.
pub type Result<T> = std::result::Result<T, Error>;
