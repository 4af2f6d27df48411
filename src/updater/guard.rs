//! Single-flight guards for update cycles.
//!
//! Two layers keep installs from overlapping:
//! - [`InstallGuard`] rejects a second cycle inside the same process
//! - [`InstallLock`] rejects a second launcher process working on the same
//!   install root, via an advisory lock on `{root}/.alaunch.lock`
//!
//! Both are released on drop, so every exit path of a cycle, including
//! errors and cancellation, frees them.

use crate::core::error_builders::fs_error;
use crate::utils::fs::ensure_dir;
use anyhow::{Context, Result};
use fs4::fs_std::FileExt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

/// In-process busy flag.
#[derive(Debug, Default)]
pub struct InstallGuard {
    busy: AtomicBool,
}

impl InstallGuard {
    pub const fn new() -> Self {
        Self {
            busy: AtomicBool::new(false),
        }
    }

    /// Claim the guard, or `None` if a cycle already holds it.
    pub fn try_acquire(&self) -> Option<InstallPermit<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InstallPermit {
                guard: self,
            })
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Proof of holding an [`InstallGuard`]; releases it when dropped.
#[derive(Debug)]
pub struct InstallPermit<'a> {
    guard: &'a InstallGuard,
}

impl Drop for InstallPermit<'_> {
    fn drop(&mut self) {
        self.guard.busy.store(false, Ordering::Release);
    }
}

/// Exclusive advisory lock on an install root.
#[derive(Debug)]
pub struct InstallLock {
    file: File,
    path: PathBuf,
}

impl InstallLock {
    /// Try to take the lock at `path` without waiting.
    ///
    /// Returns `Ok(None)` if another process holds it. The lock file is
    /// created (with its parent directory) if missing and is left in place
    /// afterwards.
    ///
    /// # Errors
    ///
    /// Fails if the lock file cannot be created or the file system does not
    /// support locking.
    pub async fn try_acquire(path: &Path) -> Result<Option<Self>> {
        let path = path.to_path_buf();

        tokio::task::spawn_blocking(move || -> Result<Option<Self>> {
            if let Some(parent) = path.parent() {
                ensure_dir(parent)?;
            }

            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(false)
                .open(&path)
                .map_err(|e| fs_error(e, "open install lock", &path))?;

            let acquired = FileExt::try_lock_exclusive(&file)
                .with_context(|| format!("Failed to lock {}", path.display()))?;

            if !acquired {
                debug!("Install lock {} is held by another process", path.display());
                return Ok(None);
            }

            debug!("Acquired install lock {}", path.display());
            Ok(Some(Self {
                file,
                path,
            }))
        })
        .await
        .context("Install lock task panicked")?
    }
}

impl Drop for InstallLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            warn!("Failed to unlock {}: {}", self.path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_guard_is_single_flight() {
        let guard = InstallGuard::new();

        let permit = guard.try_acquire();
        assert!(permit.is_some());
        assert!(guard.is_busy());
        assert!(guard.try_acquire().is_none());

        drop(permit);
        assert!(!guard.is_busy());
        assert!(guard.try_acquire().is_some());
    }

    #[tokio::test]
    async fn test_lock_excludes_second_holder() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("root").join(".alaunch.lock");

        let first = InstallLock::try_acquire(&path).await.unwrap();
        assert!(first.is_some());
        assert!(path.exists());

        // Separate file handles conflict even within one process
        let second = InstallLock::try_acquire(&path).await.unwrap();
        assert!(second.is_none());

        drop(first);
        let third = InstallLock::try_acquire(&path).await.unwrap();
        assert!(third.is_some());
    }
}
