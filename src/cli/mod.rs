//! CLI argument definitions for Mission Control.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::models::{AgentStatus, EventType};

/// Mission Control - a dashboard over agents, projects, and their activity.
///
/// Start with `mc dashboard` for an overview, then drill into projects and agents.
#[derive(Parser, Debug)]
#[command(name = "mc")]
#[command(author, version, long_about = None)]
#[command(about = "Dashboard over agents, projects, and their activity")]
pub struct Cli {
    /// Output in human-readable format instead of JSON
    #[arg(short = 'H', long = "human", global = true)]
    pub human_readable: bool,

    /// Load data from a JSON fixture instead of the built-in data set.
    /// Can also be set via MC_DATA or `data-file` in config.kdl.
    #[arg(long = "data", global = true)]
    pub data_file: Option<PathBuf>,

    /// Reject data whose agents or events reference missing records
    #[arg(long, global = true)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summary cards, agent table, and recent activity (start here!)
    Dashboard,

    /// Aggregate statistics only
    Stats,

    /// Project commands
    Project {
        #[command(subcommand)]
        command: ProjectCommands,
    },

    /// Agent registry commands
    Agent {
        #[command(subcommand)]
        command: AgentCommands,
    },

    /// Activity feed across all projects
    Activity {
        /// Only events for this project
        #[arg(long, short = 'p')]
        project: Option<String>,

        /// Only events of this type (start, complete, merge, fix, scan, error)
        #[arg(long = "type", short = 't', value_parser = parse_event_type)]
        event_type: Option<EventType>,
    },

    /// Render the view a navigation path names (e.g., /projects/<id>)
    Open {
        /// View path: /, /projects, /projects/<id>, /agents, /settings
        path: String,
    },

    /// Check that every agent and event references existing records
    Doctor,

    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Interactive terminal dashboard
    #[cfg(feature = "tui")]
    Tui,
}

/// Project subcommands
#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// List all projects
    List,

    /// Show a project with its agents, tasks, and activity
    Show {
        /// Project ID (e.g., productos-build)
        id: String,
    },

    /// Agents assigned to a project
    Agents {
        /// Project ID
        id: String,
    },

    /// Agents running or complete on a project
    Tasks {
        /// Project ID
        id: String,
    },

    /// Activity log for a project
    Activity {
        /// Project ID
        id: String,
    },
}

/// Agent subcommands
#[derive(Subcommand, Debug)]
pub enum AgentCommands {
    /// List agents, optionally filtered
    List {
        /// Case-insensitive substring of the agent label
        #[arg(long, short = 's', default_value = "")]
        search: String,

        /// Only agents with this status (running, complete, failed, idle)
        #[arg(long, value_parser = parse_agent_status)]
        status: Option<AgentStatus>,

        /// Only agents owned by this project
        #[arg(long, short = 'p')]
        project: Option<String>,
    },

    /// Show an agent with its communication log
    Show {
        /// Agent ID (e.g., agent-1)
        id: String,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show resolved configuration and where each value came from
    Show,
}

fn parse_agent_status(s: &str) -> Result<AgentStatus, String> {
    s.parse().map_err(|e: crate::Error| e.to_string())
}

fn parse_event_type(s: &str) -> Result<EventType, String> {
    s.parse().map_err(|e: crate::Error| e.to_string())
}
