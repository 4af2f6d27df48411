//! Unpacking the downloaded archive into the install root.

use crate::core::LauncherError;
use crate::core::error_builders::fs_error;
use crate::utils::fs::ensure_dir;
use crate::utils::path_validation::{is_directory_entry, resolve_entry_path};
use anyhow::{Context, Result};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;
use zip::ZipArchive;

fn archive_error(archive_path: &Path, reason: impl std::fmt::Display) -> anyhow::Error {
    LauncherError::ArchiveError {
        path: archive_path.display().to_string(),
        reason: reason.to_string(),
    }
    .into()
}

struct PlannedEntry {
    index: usize,
    name: String,
    dest: PathBuf,
    is_dir: bool,
}

/// Extract every entry of the ZIP at `archive_path` under `root`.
///
/// All entry names are resolved before anything is written, so an archive
/// with one unsafe entry leaves the install root untouched. An entry that
/// lands on or under one of the `reserved` paths counts as unsafe. Existing
/// files are overwritten. Returns the number of entries extracted.
pub(crate) async fn extract_archive(
    archive_path: &Path,
    root: &Path,
    reserved: &[PathBuf],
) -> Result<usize> {
    let archive_path = archive_path.to_path_buf();
    let root = root.to_path_buf();
    let reserved = reserved.to_vec();

    tokio::task::spawn_blocking(move || extract_blocking(&archive_path, &root, &reserved))
        .await
        .context("Archive extraction task panicked")?
}

/// Whether `dest` is, or sits below, one of the `reserved` paths.
///
/// Names are compared case-insensitively where the default file system is.
fn is_reserved(dest: &Path, reserved: &[PathBuf]) -> bool {
    if cfg!(any(windows, target_os = "macos")) {
        let dest = dest.to_string_lossy().to_lowercase();
        reserved.iter().any(|path| {
            let path = path.to_string_lossy().to_lowercase();
            Path::new(&dest).starts_with(Path::new(&path))
        })
    } else {
        reserved.iter().any(|path| dest.starts_with(path))
    }
}

fn extract_blocking(archive_path: &Path, root: &Path, reserved: &[PathBuf]) -> Result<usize> {
    let file = File::open(archive_path).map_err(|e| fs_error(e, "open archive", archive_path))?;
    let mut archive = ZipArchive::new(file).map_err(|e| archive_error(archive_path, e))?;

    let mut plan = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let entry = archive.by_index_raw(index).map_err(|e| archive_error(archive_path, e))?;
        let name = entry.name().to_string();
        let dest = resolve_entry_path(root, &name)?;
        if is_reserved(&dest, reserved) {
            return Err(LauncherError::UnsafeArchiveEntry {
                entry: name,
            }
            .into());
        }
        plan.push(PlannedEntry {
            index,
            is_dir: entry.is_dir() || is_directory_entry(&name),
            name,
            dest,
        });
    }

    for planned in &plan {
        if planned.is_dir {
            ensure_dir(&planned.dest)?;
            continue;
        }

        if let Some(parent) = planned.dest.parent() {
            ensure_dir(parent)?;
        }

        let mut entry =
            archive.by_index(planned.index).map_err(|e| archive_error(archive_path, e))?;
        let mut out =
            File::create(&planned.dest).map_err(|e| fs_error(e, "write file", &planned.dest))?;
        std::io::copy(&mut entry, &mut out).map_err(|e| {
            archive_error(archive_path, format!("failed to extract '{}': {e}", planned.name))
        })?;

        apply_mode(&planned.dest, entry.unix_mode())?;
    }

    debug!("Extracted {} entries into {}", plan.len(), root.display());
    Ok(plan.len())
}

#[cfg(unix)]
fn apply_mode(path: &Path, mode: Option<u32>) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    if let Some(mode) = mode {
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode & 0o777))
            .map_err(|e| fs_error(e, "set permissions", path))?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn apply_mode(_path: &Path, _mode: Option<u32>) -> Result<()> {
    Ok(())
}
