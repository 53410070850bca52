//! Mission Control CLI - a dashboard over agents, projects, and their activity.

use clap::Parser;
use mission_control::cli::{AgentCommands, Cli, Commands, ConfigCommands, ProjectCommands};
use mission_control::commands::{self, Output};
use mission_control::config::{ConfigOverrides, OutputFormat, ResolvedConfig, resolve_config};
use mission_control::query::AgentFilter;
use mission_control::store::{self, DataStore};
use std::process;
use tracing_subscriber::EnvFilter;

/// Environment variable controlling log verbosity (tracing `EnvFilter` syntax).
const LOG_ENV: &str = "MC_LOG";

fn main() {
    let cli = Cli::parse();

    init_logging(&cli.command);

    let mut overrides = ConfigOverrides::new();
    if cli.human_readable {
        overrides = overrides.with_output_format(OutputFormat::Human);
    }
    if let Some(path) = cli.data_file {
        overrides = overrides.with_data_file(path);
    }

    // Config errors are reported in the format the user asked for on the command line
    let config = match resolve_config(&overrides) {
        Ok(config) => config,
        Err(e) => exit_with_error(&e, cli.human_readable),
    };
    let human = config.output_format() == OutputFormat::Human;

    let result = store::open(config.data_file().map(|p| p.as_path()), cli.strict)
        .and_then(|store| run_command(cli.command, store.as_ref(), &config, human));

    if let Err(e) = result {
        exit_with_error(&e, human);
    }
}

/// Route diagnostics to stderr, or to a log file while the TUI owns the terminal.
fn init_logging(command: &Option<Commands>) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    #[cfg(feature = "tui")]
    if matches!(command, Some(Commands::Tui)) {
        let appender = tracing_appender::rolling::never(std::env::temp_dir(), "mc-tui.log");
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(appender)
            .try_init();
        return;
    }
    #[cfg(not(feature = "tui"))]
    let _ = command;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

fn exit_with_error(e: &mission_control::Error, human: bool) -> ! {
    if human {
        eprintln!("Error: {}", e);
    } else {
        eprintln!("{}", serde_json::json!({ "error": e.to_string() }));
    }
    process::exit(1);
}

fn run_command(
    command: Option<Commands>,
    store: &dyn DataStore,
    config: &ResolvedConfig,
    human: bool,
) -> Result<(), mission_control::Error> {
    match command {
        None | Some(Commands::Dashboard) => {
            let result = commands::dashboard(
                store,
                config.resolution_policy(),
                config.recent_activity_limit(),
            );
            output(&result, human);
        }

        Some(Commands::Stats) => {
            let result = commands::stats(store, config.resolution_policy());
            output(&result, human);
        }

        Some(Commands::Project { command }) => match command {
            ProjectCommands::List => {
                output(&commands::project_list(store), human);
            }
            ProjectCommands::Show { id } => {
                output(&commands::project_show(store, &id)?, human);
            }
            ProjectCommands::Agents { id } => {
                output(&commands::project_agents(store, &id)?, human);
            }
            ProjectCommands::Tasks { id } => {
                output(&commands::project_tasks(store, &id)?, human);
            }
            ProjectCommands::Activity { id } => {
                output(&commands::project_activity(store, &id)?, human);
            }
        },

        Some(Commands::Agent { command }) => match command {
            AgentCommands::List {
                search,
                status,
                project,
            } => {
                let filter = AgentFilter::new()
                    .with_search(search)
                    .with_status(status)
                    .with_project(project);
                output(&commands::agent_list(store, filter), human);
            }
            AgentCommands::Show { id } => {
                output(&commands::agent_show(store, &id)?, human);
            }
        },

        Some(Commands::Activity {
            project,
            event_type,
        }) => {
            let result = commands::activity(store, project.as_deref(), event_type);
            output(&result, human);
        }

        Some(Commands::Open { path }) => {
            let view = commands::open(store, &path, config)?;
            output(view.as_ref(), human);
        }

        Some(Commands::Doctor) => {
            let result = commands::doctor(store);
            output(&result, human);
            if !result.ok {
                process::exit(2);
            }
        }

        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => {
                output(&commands::config_show(config, &store.location()), human);
            }
        },

        #[cfg(feature = "tui")]
        Some(Commands::Tui) => {
            mission_control::tui::run_tui(store, config)?;
        }
    }

    Ok(())
}

/// Print output in JSON or human-readable format.
fn output<T: Output + ?Sized>(result: &T, human: bool) {
    if human {
        println!("{}", result.to_human());
    } else {
        println!("{}", result.to_json());
    }
}
