//! `alaunch status`: what is installed, read from disk only.

use crate::cli::CliConfig;
use crate::cli::common::load_config;
use crate::installation::InstallationState;
use crate::version::Version;
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Show the installed version and install location.
#[derive(Args, Debug, Default)]
pub struct StatusCommand {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Snapshot printed by `alaunch status`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct InstallReport {
    pub artifact_name: String,
    pub install_root: PathBuf,
    pub installed_version: Option<Version>,
    pub executable: PathBuf,
    pub executable_present: bool,
    pub version_url: String,
    pub archive_url: String,
}

impl InstallReport {
    pub async fn collect(installation: &InstallationState, version_url: &str, archive_url: &str) -> Result<Self> {
        Ok(Self {
            artifact_name: installation.artifact_name().to_string(),
            install_root: installation.root_path().to_path_buf(),
            installed_version: installation.read_version().await?,
            executable: installation.executable_path().to_path_buf(),
            executable_present: installation.executable_exists(),
            version_url: version_url.to_string(),
            archive_url: archive_url.to_string(),
        })
    }

    fn print_text(&self) {
        println!("{}", self.artifact_name.as_str().bold());
        println!("  Install root: {}", self.install_root.display());
        match self.installed_version {
            Some(version) => println!("  Installed:    {}", version.to_string().as_str().green()),
            None => println!("  Installed:    {}", "not installed".yellow()),
        }
        let present = if self.executable_present {
            "present".green()
        } else {
            "missing".red()
        };
        println!("  Executable:   {} ({})", self.executable.display(), present);
        println!("  Version URL:  {}", self.version_url);
        println!("  Archive URL:  {}", self.archive_url);
    }
}

impl StatusCommand {
    /// # Errors
    ///
    /// Fails if the configuration cannot be loaded or the version record
    /// cannot be read.
    pub async fn execute(self, cli: &CliConfig) -> Result<()> {
        let config = load_config(cli).await?;
        let installation = InstallationState::from_config(&config);
        let report =
            InstallReport::collect(&installation, &config.version_url, &config.archive_url).await?;

        match self.format {
            OutputFormat::Text => report.print_text(),
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&report)
                    .context("Failed to serialize install status")?;
                println!("{json}");
            }
        }
        Ok(())
    }
}
