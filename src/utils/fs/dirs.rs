//! Directory creation and cleanup helpers.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::warn;

/// Create `path` and all of its parents if needed.
///
/// # Errors
///
/// Fails if the directory cannot be created or `path` exists but is not a
/// directory.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).with_context(|| {
            let platform_help = if cfg!(windows) {
                "On Windows: Check that the path length is < 260 chars or that long path support is enabled"
            } else {
                "Check directory permissions and path validity"
            };

            format!("Failed to create directory: {}\n\n{}", path.display(), platform_help)
        })?;
    } else if !path.is_dir() {
        return Err(anyhow::anyhow!("Path exists but is not a directory: {}", path.display()));
    }

    Ok(())
}

/// Remove a working file, ignoring "not found".
///
/// Used on failure paths, where the original error is what gets reported;
/// a cleanup failure is only logged.
pub async fn remove_file_if_exists(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!("Failed to remove {}: {}", path.display(), e),
    }
}
