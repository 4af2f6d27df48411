//! Shared plumbing for commands that run an update cycle.

use crate::cli::CliConfig;
use crate::config::LauncherConfig;
use crate::core::LauncherError;
use crate::installation::{InstallationState, LauncherState};
use crate::remote::{HttpSource, RemoteSource};
use crate::updater::{CheckOutcome, UpdatePipeline};
use crate::utils::progress::ProgressBar;
use anyhow::{Context, Result};
use colored::Colorize;
use std::sync::Arc;
use tracing::debug;

/// Load the launcher configuration named by the global flags.
pub async fn load_config(cli: &CliConfig) -> Result<LauncherConfig> {
    LauncherConfig::load(cli.config_path.clone()).await
}

/// Pipeline over the configured HTTP endpoints.
pub fn build_pipeline(config: &LauncherConfig) -> Result<Arc<UpdatePipeline<HttpSource>>> {
    let source = HttpSource::from_config(config)?;
    Ok(Arc::new(UpdatePipeline::new(InstallationState::from_config(config), source)))
}

pub fn progress_for(cli: &CliConfig) -> ProgressBar {
    if cli.no_progress {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    }
}

/// Run `check_for_updates` on a task while rendering published state.
///
/// Ctrl-C cancels the running download instead of killing the process, so
/// the partial archive is cleaned up.
pub async fn run_cycle<S>(pipeline: &Arc<UpdatePipeline<S>>, progress: &ProgressBar) -> Result<CheckOutcome>
where
    S: RemoteSource + 'static,
{
    let mut updates = pipeline.subscribe();
    let worker = Arc::clone(pipeline);
    let mut cycle = tokio::spawn(async move { worker.check_for_updates().await });

    progress.set_message("Checking for updates");

    let outcome = loop {
        tokio::select! {
            result = &mut cycle => break result.context("Update task failed")?,
            changed = updates.changed() => {
                if changed.is_err() {
                    break (&mut cycle).await.context("Update task failed")?;
                }
                render(progress, &updates.borrow_and_update());
            }
            signal = tokio::signal::ctrl_c() => {
                if signal.is_ok() {
                    debug!("Interrupted, cancelling update");
                    pipeline.cancel();
                }
            }
        }
    };

    progress.finish_and_clear();
    Ok(outcome)
}

fn render(progress: &ProgressBar, state: &LauncherState) {
    match state.status {
        Some(status) if status.is_downloading() => {
            progress.set_message(status.action_label());
            if let Some(p) = state.progress {
                progress.set_download(p.downloaded, p.total);
            }
        }
        _ => progress.set_message("Checking for updates"),
    }
}

/// Print the result of a cycle. Failures are left to the caller.
pub fn report(cli: &CliConfig, outcome: &CheckOutcome, state: &LauncherState) {
    if cli.quiet {
        return;
    }

    match outcome {
        CheckOutcome::Installed(version) => {
            println!("{} Installed version {}", "✓".green(), version.to_string().as_str().bold());
        }
        CheckOutcome::UpToDate => {
            let version = state.installed_version.map(|v| v.to_string()).unwrap_or_default();
            println!("{} Version {} is up to date", "✓".green(), version.as_str().bold());
        }
        CheckOutcome::NoRemoteVersion => {
            println!("{} The update server did not publish a version", "!".yellow());
        }
        CheckOutcome::Busy => {
            println!("{} Another update is already in progress", "!".yellow());
        }
        CheckOutcome::Failed(_) | CheckOutcome::Cancelled => {}
    }
}

/// Turn a failed or cancelled outcome into the command's error.
pub fn outcome_error(outcome: &CheckOutcome) -> Option<anyhow::Error> {
    match outcome {
        CheckOutcome::Failed(message) => {
            Some(anyhow::anyhow!("{message}").context("Update failed - Retry"))
        }
        CheckOutcome::Cancelled => Some(LauncherError::Cancelled.into()),
        _ => None,
    }
}
