//! Mockflow CLI - edit which dependencies of a test flow get mocked.
//!
//! `mockflow serve` runs the backend with sample data; `mockflow ui` (the
//! default) launches the desktop configuration view against it.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

mod commands;
mod config;

use config::Config;

/// Mockflow CLI - Configure dependency mocking for test flows.
///
/// Run `mockflow` or `mockflow ui` to open the configuration view.
#[derive(Parser, Debug)]
#[command(
    name = "mockflow",
    author,
    version,
    about = "Mockflow: configure dependency mocking for test flows",
    long_about = None
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the Mockflow API server with sample flow data.
    Serve {
        /// Port to listen on (defaults to the configured port).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Launch the desktop configuration UI (default command).
    Ui {
        /// Base URL of the Mockflow API server.
        #[arg(long)]
        base_url: Option<String>,

        /// Flow to edit.
        #[arg(long)]
        flow: Option<String>,
    },

    /// Manage CLI configuration.
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Configuration subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show current configuration.
    Show,

    /// Set a configuration value.
    Set {
        /// Configuration key (base_url, flow_name or port).
        key: String,
        /// Configuration value.
        value: String,
    },

    /// Show path to config file.
    Path,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    let level = if cli.quiet {
        Level::ERROR
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .init();

    // Load configuration
    let config = Config::load()?;

    // Default to launching the UI if no command given
    let command = cli.command.unwrap_or(Commands::Ui {
        base_url: None,
        flow: None,
    });

    match command {
        Commands::Serve { port } => {
            let port = port.unwrap_or(config.port);
            // The UI path must own the main thread, so the runtime is
            // scoped to the server command instead of wrapping main.
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(commands::serve::execute(port))?;
        }

        Commands::Ui { base_url, flow } => {
            let base_url = base_url.unwrap_or_else(|| config.base_url.clone());
            let flow = flow.unwrap_or_else(|| config.flow_name.clone());
            commands::ui::execute(base_url, flow)?;
        }

        Commands::Config(config_cmd) => {
            let mut config = config;
            match config_cmd {
                ConfigCommands::Show => commands::config::show(&config)?,
                ConfigCommands::Set { key, value } => {
                    commands::config::set(&mut config, &key, &value)?
                }
                ConfigCommands::Path => commands::config::path()?,
            }
        }
    }

    Ok(())
}
