//! alaunch CLI entry point
//!
//! Parses arguments, runs the selected command, and renders any error with
//! its suggestion before exiting with status 1.
//!
//! - `check` - Run one update cycle
//! - `play` - Update if needed, then launch
//! - `status` - Show what is installed

use alaunch_cli::cli;
use alaunch_cli::core::error::user_friendly_error;
use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
