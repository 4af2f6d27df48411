//! Global constants used throughout the launcher.
//!
//! File names of the install layout and network defaults live here so the
//! layout, the pipeline, and the tests agree on them.

/// Name of the version record inside the install root.
pub const VERSION_FILE_NAME: &str = "version.txt";

/// Directory inside the install root that receives the extracted build.
pub const BUILD_DIR_NAME: &str = "Build";

/// Advisory lock file that serializes installs across launcher processes.
pub const LOCK_FILE_NAME: &str = ".alaunch.lock";

/// Configuration file looked up in the current directory.
pub const LOCAL_CONFIG_FILE_NAME: &str = "launcher.toml";

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV_VAR: &str = "ALAUNCH_CONFIG";

/// Environment variable that hides progress indicators when set.
pub const NO_PROGRESS_ENV_VAR: &str = "ALAUNCH_NO_PROGRESS";

/// Default timeout for each remote request, in seconds.
///
/// Applies to each request as a whole; large archives on slow links need a
/// larger value in the configuration.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// User agent sent with every request unless configured otherwise.
pub const DEFAULT_USER_AGENT: &str = concat!("alaunch/", env!("CARGO_PKG_VERSION"));
