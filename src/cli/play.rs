//! `alaunch play`: the startup check followed by the primary action.

use crate::cli::CliConfig;
use crate::cli::common::{build_pipeline, load_config, outcome_error, progress_for, report, run_cycle};
use crate::core::LauncherError;
use crate::launch::{LaunchAction, LaunchController};
use crate::updater::CheckOutcome;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use tracing::debug;

/// Check for updates, then launch the installed build.
#[derive(Args, Debug, Default)]
pub struct PlayCommand {}

impl PlayCommand {
    /// # Errors
    ///
    /// Fails if the update cycle fails (run `play` again to retry), or if
    /// there is nothing to launch.
    pub async fn execute(self, cli: &CliConfig) -> Result<()> {
        let config = load_config(cli).await?;
        let pipeline = build_pipeline(&config)?;
        let controller = LaunchController::new(pipeline.clone());

        let outcome = run_cycle(&pipeline, &progress_for(cli)).await?;
        if let Some(error) = outcome_error(&outcome) {
            return Err(error.context("Run `alaunch play` again to retry"));
        }
        report(cli, &outcome, &pipeline.state());

        // Without a published version the status never left its initial
        // value, but the recorded build is still playable.
        let action = if outcome == CheckOutcome::NoRemoteVersion {
            LaunchAction::Launched(controller.launch()?.id())
        } else {
            controller.primary_action().await?
        };

        match action {
            LaunchAction::Launched(pid) if cli.quiet => {
                debug!("Launched {} (pid {})", config.artifact_name, pid);
                Ok(())
            }
            LaunchAction::Launched(pid) => {
                println!(
                    "{} Launched {} (pid {})",
                    "▶".green(),
                    config.artifact_name.as_str().bold(),
                    pid
                );
                Ok(())
            }
            LaunchAction::Retried(outcome) => {
                // Only reachable if the status flipped to Failed after the check
                debug!("Primary action retried: {:?}", outcome);
                outcome_error(&outcome).map_or(Ok(()), Err)
            }
            LaunchAction::Idle if outcome == CheckOutcome::Busy => {
                Err(anyhow::anyhow!("Another launcher is updating this installation"))
            }
            LaunchAction::Idle => Err(LauncherError::ExecutableNotFound {
                path: pipeline.installation().executable_path().display().to_string(),
            }
            .into()),
        }
    }
}
