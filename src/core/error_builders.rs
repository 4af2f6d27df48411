//! Builders that turn low-level failures into typed launcher errors.

use crate::core::LauncherError;
use std::path::Path;

/// Wrap an I/O failure on `path` as a [`LauncherError`] context layer.
///
/// Permission problems become [`LauncherError::PermissionDenied`], everything
/// else [`LauncherError::FileSystemError`]. The original `io::Error` stays in
/// the chain so the surfaced message still says what the OS reported.
///
/// # Example
///
/// ```no_run
/// use alaunch_cli::core::error_builders::fs_error;
/// use std::path::Path;
///
/// let path = Path::new("version.txt");
/// let result = std::fs::read_to_string(path).map_err(|e| fs_error(e, "read version record", path));
/// ```
pub fn fs_error(err: std::io::Error, operation: &str, path: &Path) -> anyhow::Error {
    let typed = if err.kind() == std::io::ErrorKind::PermissionDenied {
        LauncherError::PermissionDenied {
            operation: operation.to_string(),
            path: path.display().to_string(),
        }
    } else {
        LauncherError::FileSystemError {
            operation: operation.to_string(),
            path: path.display().to_string(),
        }
    };
    anyhow::Error::new(err).context(typed)
}

/// Wrap a transport failure as [`LauncherError::NetworkError`].
pub fn network_error(operation: &str, err: impl std::fmt::Display) -> anyhow::Error {
    LauncherError::NetworkError {
        operation: operation.to_string(),
        reason: err.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fs_error_permission_denied() {
        let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let wrapped = fs_error(err, "write version record", Path::new("/x/version.txt"));

        let typed = wrapped.downcast_ref::<LauncherError>().unwrap();
        assert!(matches!(typed, LauncherError::PermissionDenied { .. }));
        assert!(wrapped.chain().any(|c| c.to_string() == "nope"));
    }

    #[test]
    fn test_fs_error_other_kinds() {
        let err = std::io::Error::other("disk full");
        let wrapped = fs_error(err, "create archive", Path::new("/x/game.zip"));

        let typed = wrapped.downcast_ref::<LauncherError>().unwrap();
        match typed {
            LauncherError::FileSystemError {
                operation,
                path,
            } => {
                assert_eq!(operation, "create archive");
                assert_eq!(path, "/x/game.zip");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_network_error_message() {
        let err = network_error("fetch remote version", "connection refused");
        assert_eq!(err.to_string(), "Network error: fetch remote version: connection refused");
        let typed = err.downcast_ref::<LauncherError>().unwrap();
        assert!(matches!(typed, LauncherError::NetworkError { reason, .. } if reason == "connection refused"));
    }
}
