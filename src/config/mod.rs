//! Configuration management for alaunch
//!
//! The launcher needs four facts from outside: the artifact name, where to
//! fetch the published version, where to fetch the archive, and where to
//! install. They come from a TOML file, see [`LauncherConfig`].
//!
//! # Lookup
//!
//! 1. `--config <path>`
//! 2. `ALAUNCH_CONFIG=<path>`
//! 3. `./launcher.toml`
//! 4. `~/.alaunch/config.toml` (`%LOCALAPPDATA%\alaunch\config.toml` on Windows)
//!
//! ```toml
//! artifact_name = "Dominion"
//! version_url = "https://downloads.example.com/dominion/version.txt"
//! archive_url = "https://downloads.example.com/dominion/Dominion.zip"
//! # optional
//! install_root = "."
//! request_timeout = 30
//! user_agent = "alaunch/0.1.0"
//! ```

mod launcher;

pub use launcher::LauncherConfig;
