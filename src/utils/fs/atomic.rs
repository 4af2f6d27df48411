//! Atomic file write operations using temp-and-rename strategy.
//!
//! The version record is the launcher's commit point, so it must contain
//! either the previous version or the new one, never a partial write.

use crate::utils::fs::dirs::ensure_dir;
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Atomically writes bytes to a file using a write-then-rename strategy.
///
/// 1. Write `content` to a sibling temp file
/// 2. Sync it to disk
/// 3. Rename it over `path`
///
/// Parent directories are created if missing. The temp file lives in the
/// same directory as `path` so the rename never crosses file systems.
///
/// # Errors
///
/// Fails if the temp file cannot be created, written, synced, or renamed.
///
/// # Examples
///
/// ```rust,no_run
/// use alaunch_cli::utils::fs::atomic_write;
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// atomic_write(Path::new("version.txt"), b"1.3.0")?;
/// # Ok(())
/// # }
/// ```
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    ensure_dir(parent)?;

    let mut temp = tempfile::NamedTempFile::new_in(parent).with_context(|| {
        let platform_help = if cfg!(windows) {
            "On Windows: Check file permissions, path length, and that directory exists"
        } else {
            "Check file permissions and that directory exists"
        };

        format!("Failed to create temp file in: {}\n\n{}", parent.display(), platform_help)
    })?;

    temp.write_all(content)
        .with_context(|| format!("Failed to write temp file for: {}", path.display()))?;

    temp.as_file().sync_all().with_context(|| "Failed to sync file to disk")?;

    temp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to rename temp file to: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write_creates_and_replaces() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("version.txt");

        atomic_write(&path, b"1.2.3").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "1.2.3");

        atomic_write(&path, b"1.3.0").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "1.3.0");
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_files() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("version.txt");

        atomic_write(&path, b"2.0.0").unwrap();

        let entries: Vec<_> = fs::read_dir(temp.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_atomic_write_creates_parent() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("version.txt");

        atomic_write(&path, b"0.0.1").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "0.0.1");
    }
}
