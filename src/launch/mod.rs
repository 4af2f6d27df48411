//! The primary action: play when ready, retry when failed.

use crate::core::LauncherError;
use crate::core::error_builders::fs_error;
use crate::installation::Status;
use crate::remote::RemoteSource;
use crate::updater::{CheckOutcome, UpdatePipeline};
use anyhow::Result;
use std::process::{Child, Command};
use std::sync::Arc;
use tracing::{debug, info};

/// What [`LaunchController::primary_action`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchAction {
    /// The executable was started with this process id.
    Launched(u32),
    /// The previous cycle had failed, so a new one was run.
    Retried(CheckOutcome),
    /// Nothing to do yet: not checked, downloading, or no executable.
    Idle,
}

/// Decides what the primary action does from the pipeline's status.
pub struct LaunchController<S: RemoteSource> {
    pipeline: Arc<UpdatePipeline<S>>,
}

impl<S: RemoteSource> LaunchController<S> {
    pub fn new(pipeline: Arc<UpdatePipeline<S>>) -> Self {
        Self {
            pipeline,
        }
    }

    pub fn pipeline(&self) -> &Arc<UpdatePipeline<S>> {
        &self.pipeline
    }

    /// Run the primary action.
    ///
    /// - [`Status::Ready`] with the executable on disk: start it.
    /// - [`Status::Failed`]: run [`UpdatePipeline::check_for_updates`] again.
    /// - anything else: do nothing.
    ///
    /// # Errors
    ///
    /// Fails only if the executable exists but cannot be started.
    pub async fn primary_action(&self) -> Result<LaunchAction> {
        let status = self.pipeline.state().status;

        match status {
            Some(Status::Ready) if self.pipeline.installation().executable_exists() => {
                let child = self.launch()?;
                Ok(LaunchAction::Launched(child.id()))
            }
            Some(Status::Failed) => {
                info!("Retrying after failed update");
                Ok(LaunchAction::Retried(self.pipeline.check_for_updates().await))
            }
            other => {
                debug!("Primary action idle (status: {:?})", other);
                Ok(LaunchAction::Idle)
            }
        }
    }

    /// Start the installed executable with `Build/` as working directory.
    ///
    /// The child is not waited on; it keeps running after the launcher
    /// exits.
    ///
    /// # Errors
    ///
    /// Returns [`LauncherError::ExecutableNotFound`] if the entry point is
    /// missing, or the spawn failure.
    pub fn launch(&self) -> Result<Child> {
        let installation = self.pipeline.installation();
        let executable = installation.executable_path();

        if !installation.executable_exists() {
            return Err(LauncherError::ExecutableNotFound {
                path: executable.display().to_string(),
            }
            .into());
        }

        let child = Command::new(executable)
            .current_dir(installation.build_dir())
            .spawn()
            .map_err(|e| fs_error(e, "launch executable", executable))?;

        info!("Launched {} (pid {})", executable.display(), child.id());
        Ok(child)
    }
}
