//! The check → download → extract → record cycle.

use crate::core::LauncherError;
use crate::installation::{InstallationState, LauncherState, Status};
use crate::remote::RemoteSource;
use crate::updater::download::download_archive;
use crate::updater::extract::extract_archive;
use crate::updater::guard::{InstallGuard, InstallLock, InstallPermit};
use crate::utils::fs::remove_file_if_exists;
use crate::version::Version;
use anyhow::{Context, Result};
use chrono::Utc;
use std::sync::{Mutex, PoisonError};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// How an update cycle ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Another cycle was already running; nothing was changed.
    Busy,
    /// The version endpoint returned nothing; status left as it was.
    NoRemoteVersion,
    /// The installed version matches the published one.
    UpToDate,
    /// A new build was installed and recorded.
    Installed(Version),
    /// The cycle failed; status is [`Status::Failed`].
    Failed(String),
    /// The cycle was cancelled; status is [`Status::Failed`].
    Cancelled,
}

impl CheckOutcome {
    /// Whether the cycle left the launcher in [`Status::Ready`].
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::UpToDate | Self::Installed(_))
    }
}

/// Claims held for the duration of one cycle.
struct Cycle<'a> {
    _permit: InstallPermit<'a>,
    _lock: InstallLock,
    cancel: CancellationToken,
}

/// Keeps one installation in sync with a [`RemoteSource`].
///
/// The pipeline is shared behind an `Arc` and driven from a spawned task.
/// Front ends observe it through [`UpdatePipeline::subscribe`]; every change
/// of status, installed version, error, or progress is published as a new
/// [`LauncherState`] snapshot.
///
/// Only one cycle runs at a time. An overlapping call to
/// [`check_for_updates`](Self::check_for_updates) or
/// [`install`](Self::install) returns [`CheckOutcome::Busy`] without
/// touching any state.
///
/// # Example
///
/// ```rust,no_run
/// use alaunch_cli::installation::InstallationState;
/// use alaunch_cli::remote::HttpSource;
/// use alaunch_cli::updater::{CheckOutcome, UpdatePipeline};
/// use std::sync::Arc;
///
/// # async fn example() -> anyhow::Result<()> {
/// let source = HttpSource::new(
///     "https://downloads.example.com/version.txt",
///     "https://downloads.example.com/Game.zip",
/// )?;
/// let pipeline = Arc::new(UpdatePipeline::new(InstallationState::new(".", "Game"), source));
///
/// let mut updates = pipeline.subscribe();
/// let worker = Arc::clone(&pipeline);
/// let cycle = tokio::spawn(async move { worker.check_for_updates().await });
///
/// while updates.changed().await.is_ok() {
///     println!("{}", updates.borrow().action_label());
/// }
///
/// if let CheckOutcome::Failed(message) = cycle.await? {
///     eprintln!("{message}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct UpdatePipeline<S: RemoteSource> {
    installation: InstallationState,
    source: S,
    state: watch::Sender<LauncherState>,
    guard: InstallGuard,
    cancel: Mutex<CancellationToken>,
}

impl<S: RemoteSource> UpdatePipeline<S> {
    pub fn new(installation: InstallationState, source: S) -> Self {
        let (state, _) = watch::channel(LauncherState::default());
        Self {
            installation,
            source,
            state,
            guard: InstallGuard::new(),
            cancel: Mutex::new(CancellationToken::new()),
        }
    }

    pub fn installation(&self) -> &InstallationState {
        &self.installation
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Receive every published [`LauncherState`].
    pub fn subscribe(&self) -> watch::Receiver<LauncherState> {
        self.state.subscribe()
    }

    /// Current snapshot.
    pub fn state(&self) -> LauncherState {
        self.state.borrow().clone()
    }

    /// Whether a cycle is running in this process.
    pub fn is_busy(&self) -> bool {
        self.guard.is_busy()
    }

    /// Abort the running download, if any.
    ///
    /// The cycle removes its partial archive, leaves the version record
    /// alone, and ends with [`CheckOutcome::Cancelled`]. Calling this while
    /// idle has no effect on the next cycle.
    pub fn cancel(&self) {
        self.cancel.lock().unwrap_or_else(PoisonError::into_inner).cancel();
    }

    /// Bring the installation up to date with the remote.
    ///
    /// Installs from scratch when no version record exists. Otherwise
    /// compares the recorded version with the published one and installs
    /// on any difference. Failures are reported through the outcome and the
    /// published state and are never retried automatically.
    pub async fn check_for_updates(&self) -> CheckOutcome {
        let cycle = match self.begin_cycle().await {
            Ok(Some(cycle)) => cycle,
            Ok(None) => return CheckOutcome::Busy,
            Err(e) => return self.fail(&e),
        };

        let result = self.run_check(&cycle.cancel).await;
        self.finish(result)
    }

    /// Download and install `remote_version`.
    ///
    /// For a first install (`is_update == false`) the remote version is
    /// fetched again and `remote_version` is ignored.
    pub async fn install(&self, is_update: bool, remote_version: Version) -> CheckOutcome {
        let cycle = match self.begin_cycle().await {
            Ok(Some(cycle)) => cycle,
            Ok(None) => return CheckOutcome::Busy,
            Err(e) => return self.fail(&e),
        };

        let result = self.run_install(is_update, remote_version, &cycle.cancel).await;
        self.finish(result)
    }

    async fn begin_cycle(&self) -> Result<Option<Cycle<'_>>> {
        let Some(permit) = self.guard.try_acquire() else {
            debug!("Update cycle already in progress");
            return Ok(None);
        };

        let Some(lock) = InstallLock::try_acquire(&self.installation.lock_path()).await? else {
            info!(
                "Another launcher is updating {}",
                self.installation.root_path().display()
            );
            return Ok(None);
        };

        let cancel = CancellationToken::new();
        *self.cancel.lock().unwrap_or_else(PoisonError::into_inner) = cancel.clone();

        self.publish(|state| state.last_checked = Some(Utc::now()));

        Ok(Some(Cycle {
            _permit: permit,
            _lock: lock,
            cancel,
        }))
    }

    async fn run_check(&self, cancel: &CancellationToken) -> Result<CheckOutcome> {
        let Some(local) = self.installation.read_version().await? else {
            info!("No installation found, installing {}", self.installation.artifact_name());
            return self.run_install(false, Version::ZERO, cancel).await;
        };
        self.publish(|state| state.installed_version = Some(local));

        let Some(text) =
            self.source.fetch_version_text().await.context("Failed to check for updates")?
        else {
            info!("Remote returned no version, keeping current status");
            return Ok(CheckOutcome::NoRemoteVersion);
        };

        let remote = Version::parse(&text);
        if remote.is_different_from(&local) {
            info!("Update available: {} -> {}", local, remote);
            return self.run_install(true, remote, cancel).await;
        }

        debug!("Installed version {} is current", local);
        self.publish(|state| {
            state.status = Some(Status::Ready);
            state.last_error = None;
        });
        Ok(CheckOutcome::UpToDate)
    }

    async fn run_install(
        &self,
        is_update: bool,
        remote_version: Version,
        cancel: &CancellationToken,
    ) -> Result<CheckOutcome> {
        let status = if is_update {
            Status::DownloadingUpdate
        } else {
            Status::DownloadingGame
        };
        self.publish(|state| {
            state.status = Some(status);
            state.last_error = None;
            state.progress = None;
        });

        let remote_version = if is_update {
            remote_version
        } else {
            let text = self
                .source
                .fetch_version_text()
                .await
                .context("Failed to fetch remote version")?;
            text.map_or(Version::ZERO, |text| Version::parse(&text))
        };

        let archive_path = self.installation.archive_path();
        let archive = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(LauncherError::Cancelled.into()),
            archive = self.source.fetch_archive() => {
                archive.context("Failed to download archive")?
            }
        };

        info!("Downloading {} {}", self.installation.artifact_name(), remote_version);
        download_archive(archive, archive_path, cancel, |progress| {
            self.publish(|state| state.progress = Some(progress));
        })
        .await?;

        let extracted = extract_archive(
            archive_path,
            self.installation.root_path(),
            &self.installation.reserved_paths(),
        )
        .await;
        remove_file_if_exists(archive_path).await;
        let count = extracted?;
        debug!("Extracted {} entries", count);

        self.installation.write_version(&remote_version).await?;

        info!("Installed {} {}", self.installation.artifact_name(), remote_version);
        self.publish(|state| {
            state.status = Some(Status::Ready);
            state.installed_version = Some(remote_version);
            state.progress = None;
        });
        Ok(CheckOutcome::Installed(remote_version))
    }

    fn finish(&self, result: Result<CheckOutcome>) -> CheckOutcome {
        match result {
            Ok(outcome) => outcome,
            Err(e) if matches!(e.downcast_ref::<LauncherError>(), Some(LauncherError::Cancelled)) => {
                info!("Update cancelled");
                self.publish(|state| {
                    state.status = Some(Status::Failed);
                    state.last_error = Some(LauncherError::Cancelled.to_string());
                    state.progress = None;
                });
                CheckOutcome::Cancelled
            }
            Err(e) => self.fail(&e),
        }
    }

    fn fail(&self, error: &anyhow::Error) -> CheckOutcome {
        let message = format!("{error:#}");
        warn!("Update failed: {}", message);
        self.publish(|state| {
            state.status = Some(Status::Failed);
            state.last_error = Some(message.clone());
            state.progress = None;
        });
        CheckOutcome::Failed(message)
    }

    fn publish(&self, update: impl FnOnce(&mut LauncherState)) {
        self.state.send_modify(update);
    }
}
