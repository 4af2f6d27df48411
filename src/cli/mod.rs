//! Command-line interface for alaunch.
//!
//! The CLI is the front end of the update pipeline: it runs the startup
//! check, renders status and download progress, and performs the primary
//! action.
//!
//! # Available Commands
//!
//! - `check` - Run one update cycle and report the result
//! - `play` - Check for updates, then launch the installed build
//! - `status` - Show what is installed, without touching the network
//!
//! # Global Options
//!
//! All commands support these global options:
//! - `--verbose` - Enable debug output
//! - `--quiet` - Only print errors and the output of `status`
//! - `--no-progress` - Disable progress bars and spinners
//! - `--config` - Path to the launcher configuration file
//!
//! # Example
//!
//! ```bash
//! # Install or update, then start the game
//! alaunch play
//!
//! # Same, using a specific configuration and no spinner
//! alaunch --config ./games/dominion.toml --no-progress play
//!
//! # Machine-readable install status
//! alaunch status --format json
//! ```

mod check;
mod common;
mod play;
mod status;


use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Runtime options shared by every command.
///
/// Built once from the global flags and passed down explicitly instead of
/// going through environment variables.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log level for the launcher's own targets. `None` disables logging.
    pub log_level: Option<String>,

    /// Hide progress bars and spinners.
    pub no_progress: bool,

    /// Skip progress and success messages.
    pub quiet: bool,

    /// Explicit configuration file (`--config`).
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the global tracing subscriber.
    ///
    /// `RUST_LOG` takes precedence over the level chosen by the flags. Logs
    /// go to stderr so command output stays parseable.
    pub fn init_logging(&self) {
        let Some(level) = &self.log_level else {
            return;
        };

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("alaunch_cli={level},alaunch={level}")));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

#[derive(Parser)]
#[command(
    name = "alaunch",
    about = "Keep a game or application up to date, then launch it",
    version,
    long_about = "alaunch compares the installed build with the version published on an update \
                  server, downloads and unpacks a new build when they differ, and launches it."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only print errors and the output of `status`
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the launcher configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Disable progress bars and spinners
    #[arg(long, global = true)]
    no_progress: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check for updates and install a new build if one is published
    Check(check::CheckCommand),

    /// Check for updates, then launch the installed build
    Play(play::PlayCommand),

    /// Show the installed version and install location
    Status(status::StatusCommand),
}

impl Cli {
    /// Execute the selected command.
    ///
    /// # Errors
    ///
    /// Returns the command's error; `main` renders it and exits with 1.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Translate the global flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None
        } else {
            Some("warn".to_string())
        };

        CliConfig {
            log_level,
            no_progress: self.no_progress || self.quiet,
            quiet: self.quiet,
            config_path: self.config.clone(),
        }
    }

    /// Execute with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns the command's error.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        match self.command {
            Commands::Check(cmd) => cmd.execute(&config).await,
            Commands::Play(cmd) => cmd.execute(&config).await,
            Commands::Status(cmd) => cmd.execute(&config).await,
        }
    }
}
