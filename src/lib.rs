//! alaunch - a self-updating launcher
//!
//! Keeps one versioned artifact (typically a game build) current before
//! running it. On every start the launcher compares the locally recorded
//! version with the one published on an update server; when they differ it
//! downloads the published ZIP archive, unpacks it into the install
//! directory, and records the new version.
//!
//! # Architecture Overview
//!
//! ```text
//! LaunchController ──► UpdatePipeline::check_for_updates()
//!                        ├── InstallationState::read_version()   (version.txt)
//!                        ├── RemoteSource::fetch_version_text()  (version_url)
//!                        └── install()
//!                              ├── RemoteSource::fetch_archive() (archive_url)
//!                              ├── extract into {root} (archive carries Build/)
//!                              └── InstallationState::write_version()
//! ```
//!
//! Front ends observe the pipeline through a `tokio::sync::watch` channel of
//! [`installation::LauncherState`] snapshots and drive it through
//! [`launch::LaunchController::primary_action`]: play when ready, retry
//! when the last cycle failed.
//!
//! # Core Modules
//!
//! - [`version`] - Three-component version identifier
//! - [`installation`] - Install layout, version record, and status
//! - [`remote`] - Where versions and archives come from
//! - [`updater`] - The check/download/extract/record cycle
//! - [`launch`] - The primary action
//!
//! ## Supporting Modules
//! - [`cli`] - Command-line front end
//! - [`config`] - Launcher configuration file
//! - [`core`] - Error types and user-facing error rendering
//! - [`utils`] - Atomic writes, path validation, progress display
//!
//! # Install Layout
//!
//! ```text
//! {install_root}/
//! ├── version.txt
//! └── Build/
//!     └── {artifact_name}{EXE}
//! ```
//!
//! # Configuration (launcher.toml)
//!
//! ```toml
//! artifact_name = "Dominion"
//! version_url = "https://downloads.example.com/dominion/version.txt"
//! archive_url = "https://downloads.example.com/dominion/Dominion.zip"
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;

pub mod installation;
pub mod launch;
pub mod remote;
pub mod updater;

pub mod utils;
pub mod version;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
