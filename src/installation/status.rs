//! Launcher status and the observable state published to front ends.

use crate::version::Version;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// What the primary action should do next.
///
/// Extraction is reported as part of the download phase; there is no
/// separate "extracting" state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// The installed artifact is current and can be launched.
    Ready,
    /// The last check or install failed; the primary action retries.
    Failed,
    /// First install in progress.
    DownloadingGame,
    /// Replacing an existing install.
    DownloadingUpdate,
}

impl Status {
    /// Label for the primary action button/prompt.
    #[must_use]
    pub const fn action_label(&self) -> &'static str {
        match self {
            Self::Ready => "Play",
            Self::Failed => "Update failed - Retry",
            Self::DownloadingGame => "Downloading Game",
            Self::DownloadingUpdate => "Downloading Update",
        }
    }

    /// `true` while a download/extract is running.
    #[must_use]
    pub const fn is_downloading(&self) -> bool {
        matches!(self, Self::DownloadingGame | Self::DownloadingUpdate)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ready => "ready",
            Self::Failed => "failed",
            Self::DownloadingGame => "downloading game",
            Self::DownloadingUpdate => "downloading update",
        };
        f.write_str(name)
    }
}

/// Bytes received for the archive currently being downloaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DownloadProgress {
    /// Bytes written to the working archive so far
    pub downloaded: u64,
    /// Total size if the server sent a content length
    pub total: Option<u64>,
}

/// Snapshot of everything a front end renders.
///
/// Published through a `tokio::sync::watch` channel by the update pipeline;
/// every status change replaces the whole snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LauncherState {
    /// `None` until the first check has run
    pub status: Option<Status>,
    /// Version from the version record, if any
    pub installed_version: Option<Version>,
    /// Message of the most recent failure, cleared when a new cycle starts
    pub last_error: Option<String>,
    /// Download progress while a download is running
    pub progress: Option<DownloadProgress>,
    /// When the last check started
    pub last_checked: Option<DateTime<Utc>>,
}

impl LauncherState {
    /// Label for the primary action, defaulting to "Play" before the first check.
    #[must_use]
    pub fn action_label(&self) -> &'static str {
        self.status.map_or("Play", |s| s.action_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_labels() {
        assert_eq!(Status::Ready.action_label(), "Play");
        assert_eq!(Status::Failed.action_label(), "Update failed - Retry");
        assert_eq!(Status::DownloadingGame.action_label(), "Downloading Game");
        assert_eq!(Status::DownloadingUpdate.action_label(), "Downloading Update");
    }

    #[test]
    fn test_default_state_shows_play() {
        let state = LauncherState::default();
        assert_eq!(state.status, None);
        assert_eq!(state.action_label(), "Play");
    }

    #[test]
    fn test_is_downloading() {
        assert!(Status::DownloadingGame.is_downloading());
        assert!(Status::DownloadingUpdate.is_downloading());
        assert!(!Status::Ready.is_downloading());
        assert!(!Status::Failed.is_downloading());
    }

    #[test]
    fn test_state_serializes_status_snake_case() {
        let state = LauncherState {
            status: Some(Status::DownloadingUpdate),
            installed_version: Some(Version::new(1, 2, 3)),
            ..Default::default()
        };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["status"], "downloading_update");
        assert_eq!(json["installed_version"], "1.2.3");
    }
}
