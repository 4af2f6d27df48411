//! `alaunch check`: run one update cycle.

use crate::cli::CliConfig;
use crate::cli::common::{build_pipeline, load_config, outcome_error, progress_for, report, run_cycle};
use anyhow::Result;
use clap::Args;

/// Check for updates and install a new build if one is published.
#[derive(Args, Debug, Default)]
pub struct CheckCommand {}

impl CheckCommand {
    /// # Errors
    ///
    /// Fails if the configuration cannot be loaded or the cycle fails.
    pub async fn execute(self, cli: &CliConfig) -> Result<()> {
        let config = load_config(cli).await?;
        let pipeline = build_pipeline(&config)?;

        let outcome = run_cycle(&pipeline, &progress_for(cli)).await?;
        if let Some(error) = outcome_error(&outcome) {
            return Err(error);
        }

        report(cli, &outcome, &pipeline.state());
        Ok(())
    }
}
