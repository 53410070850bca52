//! Terminal User Interface module for Mission Control
//!
//! A keyboard-driven dashboard over the same query layer the CLI uses.
//! Views mirror the navigation routes: dashboard, projects (with a detail
//! view per project), the agent registry, and settings.

#[cfg(feature = "tui")]
mod app;
#[cfg(feature = "tui")]
mod views;

#[cfg(feature = "tui")]
pub use app::{InputMode, TuiApp, run_tui};
