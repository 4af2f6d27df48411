//! The launcher configuration file.

use crate::constants::{
    CONFIG_ENV_VAR, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_USER_AGENT, LOCAL_CONFIG_FILE_NAME,
};
use crate::core::LauncherError;
use crate::utils::fs::atomic_write;
use crate::utils::path_validation::is_plain_file_name;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::debug;

/// Where the artifact comes from and where it is installed.
///
/// # Example
///
/// ```toml
/// artifact_name = "Dominion"
/// version_url = "https://downloads.example.com/dominion/version.txt"
/// archive_url = "https://downloads.example.com/dominion/Dominion.zip"
/// install_root = "."
/// request_timeout = 30
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LauncherConfig {
    /// Name of the artifact. The archive is `{artifact_name}.zip` and the
    /// executable `Build/{artifact_name}{EXE}`.
    pub artifact_name: String,

    /// URL returning the published version as plain text.
    pub version_url: String,

    /// URL returning the ZIP archive of the published build.
    pub archive_url: String,

    /// Install base directory. Relative paths are resolved against the
    /// current directory when the configuration is loaded.
    #[serde(default = "default_install_root")]
    pub install_root: PathBuf,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_install_root() -> PathBuf {
    PathBuf::from(".")
}

const fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl LauncherConfig {
    /// Build a configuration with defaults for the optional fields.
    pub fn new(
        artifact_name: impl Into<String>,
        version_url: impl Into<String>,
        archive_url: impl Into<String>,
    ) -> Self {
        Self {
            artifact_name: artifact_name.into(),
            version_url: version_url.into(),
            archive_url: archive_url.into(),
            install_root: default_install_root(),
            request_timeout: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }

    /// Set a different install root.
    #[must_use]
    pub fn with_install_root(mut self, install_root: impl Into<PathBuf>) -> Self {
        self.install_root = install_root.into();
        self
    }

    /// Request timeout as a [`Duration`].
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Find and load the configuration.
    ///
    /// Lookup order:
    /// 1. `explicit` (the `--config` flag)
    /// 2. the file named by `ALAUNCH_CONFIG`
    /// 3. `./launcher.toml`
    /// 4. the per-user default, see [`LauncherConfig::default_path`]
    ///
    /// An explicitly named file (1 or 2) must exist; the implicit locations
    /// are skipped when absent.
    ///
    /// # Errors
    ///
    /// Returns [`LauncherError::ConfigNotFound`] if no file is found, or a
    /// parse/validation error for the file that was found.
    pub async fn load(explicit: Option<PathBuf>) -> Result<Self> {
        let explicit = explicit.or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from));

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(LauncherError::ConfigNotFound {
                    path: path.display().to_string(),
                }
                .into());
            }
            return Self::load_from(&path).await;
        }

        let local = PathBuf::from(LOCAL_CONFIG_FILE_NAME);
        if local.exists() {
            return Self::load_from(&local).await;
        }

        let user = Self::default_path()?;
        if user.exists() {
            return Self::load_from(&user).await;
        }

        Err(LauncherError::ConfigNotFound {
            path: format!("{} or {}", local.display(), user.display()),
        }
        .into())
    }

    /// Load and validate a specific file.
    ///
    /// A relative `install_root` is resolved against the current directory.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, is not valid TOML, or does not pass
    /// [`LauncherConfig::validate`].
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read launcher config from {}", path.display()))?;

        let mut config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse launcher config from {}", path.display()))?;

        if config.install_root.is_relative() {
            let cwd = std::env::current_dir().context("Failed to determine current directory")?;
            config.install_root = cwd.join(&config.install_root);
        }

        config.validate()?;
        debug!("Loaded launcher config from {}", path.display());
        Ok(config)
    }

    /// Write the configuration as TOML.
    ///
    /// The file is replaced atomically, creating parent directories as
    /// needed.
    ///
    /// # Errors
    ///
    /// Fails if the parent directory cannot be created or the file written.
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize launcher config")?;
        let target = path.to_path_buf();

        tokio::task::spawn_blocking(move || atomic_write(&target, content.as_bytes()))
            .await
            .context("Config writer task panicked")?
            .with_context(|| format!("Failed to write launcher config to {}", path.display()))?;

        debug!("Saved launcher config to {}", path.display());
        Ok(())
    }

    /// Check the artifact name and both URLs.
    ///
    /// # Errors
    ///
    /// Returns [`LauncherError::ConfigError`] describing the first problem.
    pub fn validate(&self) -> Result<(), LauncherError> {
        if !is_plain_file_name(&self.artifact_name) {
            return Err(LauncherError::ConfigError {
                message: format!(
                    "artifact_name '{}' must be a plain file name",
                    self.artifact_name
                ),
            });
        }

        for (field, url) in [("version_url", &self.version_url), ("archive_url", &self.archive_url)]
        {
            let parsed = reqwest::Url::parse(url).map_err(|e| LauncherError::ConfigError {
                message: format!("{field} '{url}' is not a valid URL: {e}"),
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(LauncherError::ConfigError {
                    message: format!("{field} '{url}' must use http or https"),
                });
            }
        }

        if self.request_timeout == 0 {
            return Err(LauncherError::ConfigError {
                message: "request_timeout must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Per-user configuration path.
    ///
    /// - Unix/macOS: `~/.alaunch/config.toml`
    /// - Windows: `%LOCALAPPDATA%\alaunch\config.toml`
    ///
    /// # Errors
    ///
    /// Fails if the home (or local data) directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
                .join("alaunch")
        } else {
            dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
                .join(".alaunch")
        };

        Ok(config_dir.join("config.toml"))
    }
}
