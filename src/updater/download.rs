//! Streaming the archive body to disk.

use crate::core::LauncherError;
use crate::core::error_builders::fs_error;
use crate::installation::DownloadProgress;
use crate::remote::ArchiveStream;
use crate::utils::fs::{ensure_dir, remove_file_if_exists};
use anyhow::Result;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Write `archive` to `dest` chunk by chunk, reporting progress after each
/// chunk.
///
/// On any failure, cancellation included, the partially written file is
/// removed before returning. Returns the number of bytes written.
pub(crate) async fn download_archive<A: ArchiveStream>(
    archive: A,
    dest: &Path,
    cancel: &CancellationToken,
    on_progress: impl FnMut(DownloadProgress) + Send,
) -> Result<u64> {
    let result = stream_to_file(archive, dest, cancel, on_progress).await;
    if result.is_err() {
        debug!("Removing partial archive {}", dest.display());
        remove_file_if_exists(dest).await;
    }
    result
}

async fn stream_to_file<A: ArchiveStream>(
    mut archive: A,
    dest: &Path,
    cancel: &CancellationToken,
    mut on_progress: impl FnMut(DownloadProgress) + Send,
) -> Result<u64> {
    if let Some(parent) = dest.parent() {
        ensure_dir(parent)?;
    }

    let mut file = File::create(dest).await.map_err(|e| fs_error(e, "create archive", dest))?;

    let total = archive.content_length();
    let mut downloaded = 0u64;
    on_progress(DownloadProgress {
        downloaded,
        total,
    });

    loop {
        let chunk = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(LauncherError::Cancelled.into()),
            chunk = archive.next_chunk() => chunk?,
        };
        let Some(chunk) = chunk else {
            break;
        };

        file.write_all(&chunk).await.map_err(|e| fs_error(e, "write archive", dest))?;
        downloaded += chunk.len() as u64;
        on_progress(DownloadProgress {
            downloaded,
            total,
        });
    }

    file.flush().await.map_err(|e| fs_error(e, "write archive", dest))?;
    file.sync_all().await.map_err(|e| fs_error(e, "write archive", dest))?;

    debug!("Downloaded {} bytes to {}", downloaded, dest.display());
    Ok(downloaded)
}
