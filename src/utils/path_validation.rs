//! Path validation for archive extraction.
//!
//! Archive entry names are untrusted input. Before anything is written, every
//! entry name is resolved against the install root with
//! [`resolve_entry_path`], which refuses names that could land outside it.

use crate::core::LauncherError;
use std::path::{Component, Path, PathBuf};

/// Resolve an archive entry name to a destination under `root`.
///
/// Both `/` and `\` are treated as separators so archives built on Windows
/// behave the same everywhere. Empty and `.` segments are skipped.
///
/// # Errors
///
/// Returns [`LauncherError::UnsafeArchiveEntry`] if the name:
/// - is absolute (leading separator or a drive/UNC prefix)
/// - contains a parent directory reference (`..`)
/// - resolves to the root itself
pub fn resolve_entry_path(root: &Path, entry_name: &str) -> Result<PathBuf, LauncherError> {
    let unsafe_entry = || LauncherError::UnsafeArchiveEntry {
        entry: entry_name.to_string(),
    };

    if entry_name.starts_with('/') || entry_name.starts_with('\\') {
        return Err(unsafe_entry());
    }

    let mut resolved = root.to_path_buf();
    let mut depth = 0usize;

    for segment in entry_name.split(['/', '\\']) {
        match segment {
            "" | "." => continue,
            ".." => return Err(unsafe_entry()),
            _ => {}
        }

        // Catches drive prefixes like "C:" and anything the platform would
        // not treat as a single plain component.
        let mut components = Path::new(segment).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) if !segment.contains(':') => {}
            _ => return Err(unsafe_entry()),
        }

        resolved.push(segment);
        depth += 1;
    }

    if depth == 0 {
        return Err(unsafe_entry());
    }

    Ok(resolved)
}

/// Whether an archive entry name denotes a directory.
///
/// Directory entries end in a separator and have an empty leaf name.
#[must_use]
pub fn is_directory_entry(entry_name: &str) -> bool {
    entry_name.ends_with('/') || entry_name.ends_with('\\')
}

/// Whether a configured artifact name is a plain file name.
///
/// The name is spliced into the archive and executable paths, so it must not
/// contain separators or traversal segments.
#[must_use]
pub fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', ':'])
        && !name.chars().any(char::is_control)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_plain_entries() {
        let root = Path::new("/install");
        assert_eq!(
            resolve_entry_path(root, "Build/Game.exe").unwrap(),
            root.join("Build").join("Game.exe")
        );
        assert_eq!(resolve_entry_path(root, "Build/").unwrap(), root.join("Build"));
        assert_eq!(
            resolve_entry_path(root, "Build\\Data\\level1.dat").unwrap(),
            root.join("Build").join("Data").join("level1.dat")
        );
        assert_eq!(
            resolve_entry_path(root, "./Build//readme.txt").unwrap(),
            root.join("Build").join("readme.txt")
        );
    }

    #[test]
    fn test_resolve_allows_dots_inside_names() {
        let root = Path::new("/install");
        assert_eq!(
            resolve_entry_path(root, "Build/..hidden").unwrap(),
            root.join("Build").join("..hidden")
        );
        assert_eq!(
            resolve_entry_path(root, "Build/v1..2.txt").unwrap(),
            root.join("Build").join("v1..2.txt")
        );
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let root = Path::new("/install");
        for name in [
            "../evil.txt",
            "Build/../../evil.txt",
            "Build/..",
            "..\\evil.txt",
            "/etc/passwd",
            "\\Windows\\evil.dll",
            "C:/Windows/evil.dll",
            "C:evil.dll",
            "",
            "./",
        ] {
            let err = resolve_entry_path(root, name).unwrap_err();
            assert!(
                matches!(err, LauncherError::UnsafeArchiveEntry { ref entry } if entry == name),
                "'{name}' should be rejected"
            );
        }
    }

    #[test]
    fn test_is_directory_entry() {
        assert!(is_directory_entry("Build/"));
        assert!(is_directory_entry("Build/Data/"));
        assert!(is_directory_entry("Build\\"));
        assert!(!is_directory_entry("Build/Game.exe"));
        assert!(!is_directory_entry("Build"));
    }

    #[test]
    fn test_is_plain_file_name() {
        assert!(is_plain_file_name("Dominion"));
        assert!(is_plain_file_name("My Game 2"));
        assert!(!is_plain_file_name(""));
        assert!(!is_plain_file_name(".."));
        assert!(!is_plain_file_name("../Game"));
        assert!(!is_plain_file_name("Build/Game"));
        assert!(!is_plain_file_name("C:Game"));
    }
}
