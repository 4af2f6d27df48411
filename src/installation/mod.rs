//! Install layout and the persisted version record.
//!
//! Everything the launcher owns lives under one install root:
//!
//! ```text
//! {root}/
//! ├── version.txt              # version record, "major.minor.sub_minor"
//! ├── {artifact}.zip           # working archive, only present mid-install
//! ├── .alaunch.lock            # cross-process install lock
//! └── Build/
//!     └── {artifact}{EXE}      # launchable entry point
//! ```
//!
//! The version record is the single source of truth for what is installed.
//! Its absence means "nothing installed yet"; it is only rewritten after an
//! archive has been fully extracted.

pub mod status;

pub use status::{DownloadProgress, LauncherState, Status};

use crate::config::LauncherConfig;
use crate::constants::{BUILD_DIR_NAME, LOCK_FILE_NAME, VERSION_FILE_NAME};
use crate::core::error_builders::fs_error;
use crate::utils::fs::atomic_write;
use crate::version::Version;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Paths of one installation, derived once from the root and artifact name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallationState {
    root_path: PathBuf,
    artifact_name: String,
    version_file_path: PathBuf,
    archive_path: PathBuf,
    build_dir: PathBuf,
    executable_path: PathBuf,
}

impl InstallationState {
    /// Derive the layout for `artifact_name` under `root_path`.
    pub fn new(root_path: impl Into<PathBuf>, artifact_name: impl Into<String>) -> Self {
        let root_path = root_path.into();
        let artifact_name = artifact_name.into();
        let build_dir = root_path.join(BUILD_DIR_NAME);

        Self {
            version_file_path: root_path.join(VERSION_FILE_NAME),
            archive_path: root_path.join(format!("{artifact_name}.zip")),
            executable_path: build_dir
                .join(format!("{artifact_name}{}", std::env::consts::EXE_SUFFIX)),
            build_dir,
            root_path,
            artifact_name,
        }
    }

    /// Layout described by a loaded configuration.
    #[must_use]
    pub fn from_config(config: &LauncherConfig) -> Self {
        Self::new(config.install_root.clone(), config.artifact_name.clone())
    }

    #[must_use]
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    #[must_use]
    pub fn artifact_name(&self) -> &str {
        &self.artifact_name
    }

    #[must_use]
    pub fn version_file_path(&self) -> &Path {
        &self.version_file_path
    }

    #[must_use]
    pub fn archive_path(&self) -> &Path {
        &self.archive_path
    }

    /// Working directory for the launched executable.
    #[must_use]
    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    #[must_use]
    pub fn executable_path(&self) -> &Path {
        &self.executable_path
    }

    /// Advisory lock file guarding installs across processes.
    #[must_use]
    pub fn lock_path(&self) -> PathBuf {
        self.root_path.join(LOCK_FILE_NAME)
    }

    /// Paths archive entries must never be extracted onto.
    #[must_use]
    pub fn reserved_paths(&self) -> Vec<PathBuf> {
        vec![self.version_file_path.clone(), self.archive_path.clone(), self.lock_path()]
    }

    /// Whether a version record exists.
    ///
    /// # Errors
    ///
    /// Fails if the file system cannot tell, for example when the root is
    /// not searchable.
    pub async fn has_version_record(&self) -> Result<bool> {
        tokio::fs::try_exists(&self.version_file_path)
            .await
            .map_err(|e| fs_error(e, "check version record", &self.version_file_path))
    }

    /// Whether the launchable entry point is on disk.
    #[must_use]
    pub fn executable_exists(&self) -> bool {
        self.executable_path.is_file()
    }

    /// Read the recorded local version.
    ///
    /// Returns `Ok(None)` when no version record exists. A record with
    /// malformed contents reads as [`Version::ZERO`].
    ///
    /// # Errors
    ///
    /// Fails if the record exists but cannot be read, or if its presence
    /// cannot be determined.
    pub async fn read_version(&self) -> Result<Option<Version>> {
        if !self.has_version_record().await? {
            debug!("No version record at {}", self.version_file_path.display());
            return Ok(None);
        }

        let text = tokio::fs::read_to_string(&self.version_file_path)
            .await
            .map_err(|e| fs_error(e, "read version record", &self.version_file_path))?;

        let version = Version::parse(&text);
        debug!("Local version {} from {}", version, self.version_file_path.display());
        Ok(Some(version))
    }

    /// Replace the version record with `version`.
    ///
    /// The write goes through a temp file and rename, so readers see either
    /// the previous record or the new one.
    ///
    /// # Errors
    ///
    /// Fails if the temp file cannot be written or renamed into place.
    pub async fn write_version(&self, version: &Version) -> Result<()> {
        let path = self.version_file_path.clone();
        let content = version.to_string();

        tokio::task::spawn_blocking(move || atomic_write(&path, content.as_bytes()))
            .await
            .context("Version record writer task panicked")??;

        debug!("Recorded version {} at {}", version, self.version_file_path.display());
        Ok(())
    }
}
