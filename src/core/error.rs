//! Error handling for alaunch
//!
//! The error system follows two rules:
//! 1. **Strongly-typed errors** ([`LauncherError`]) for the failure modes the
//!    update pipeline distinguishes
//! 2. **User-friendly messages** ([`ErrorContext`]) with actionable suggestions
//!    for the person at the terminal
//!
//! Pipeline operations return [`anyhow::Result`] and attach context with
//! `.context(...)`. At the CLI boundary [`user_friendly_error`] downcasts the
//! chain back to a [`LauncherError`] (or a raw [`std::io::Error`]) and picks a
//! suggestion.
//!
//! # Examples
//!
//! ```rust,no_run
//! use alaunch_cli::core::{LauncherError, ErrorContext, user_friendly_error};
//!
//! let error = LauncherError::HttpStatus {
//!     url: "https://example.com/version.txt".to_string(),
//!     status: 503,
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for launcher operations.
///
/// None of these are fatal to the process: the pipeline maps every one of
/// them to `Status::Failed` and the user retries through the primary action.
#[derive(Error, Debug, Clone)]
pub enum LauncherError {
    /// Transport-level failure talking to a remote endpoint
    #[error("Network error: {operation}: {reason}")]
    NetworkError {
        /// The network operation that failed
        operation: String,
        /// Reason for the network failure
        reason: String,
    },

    /// Remote endpoint answered with a non-success status
    #[error("Request to {url} failed with HTTP status {status}")]
    HttpStatus {
        /// URL that was requested
        url: String,
        /// The HTTP status code returned
        status: u16,
    },

    /// File system error
    #[error("File system error: {operation} ({path})")]
    FileSystemError {
        /// The file system operation that failed
        operation: String,
        /// Path where the file system error occurred
        path: String,
    },

    /// Permission denied
    #[error("Permission denied: {operation} ({path})")]
    PermissionDenied {
        /// The operation that was denied
        operation: String,
        /// Path where permission was denied
        path: String,
    },

    /// The downloaded archive could not be read
    #[error("Invalid archive {path}: {reason}")]
    ArchiveError {
        /// Path of the archive on disk
        path: String,
        /// What was wrong with it
        reason: String,
    },

    /// An archive entry would land outside the install root or on a file
    /// the launcher owns
    #[error("Unsafe archive entry '{entry}': outside the install root or over a launcher file")]
    UnsafeArchiveEntry {
        /// Raw entry name as stored in the archive
        entry: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// Config file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// Path to the configuration file that was not found
        path: String,
    },

    /// The installed artifact has no launchable entry point
    #[error("Executable not found: {path}")]
    ExecutableNotFound {
        /// Expected location of the executable
        path: String,
    },

    /// An in-flight update was cancelled
    #[error("Update cancelled")]
    Cancelled,

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

/// Error wrapper carrying a suggestion and details for display.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: LauncherError,
    /// What the user can do about it
    pub suggestion: Option<String>,
    /// Extra explanation of the failure
    pub details: Option<String>,
}

impl ErrorContext {
    /// Wrap an error with no suggestion or details.
    #[must_use]
    pub const fn new(error: LauncherError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Attach a suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach details.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print to stderr with colours.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Render a full error chain as one message.
///
/// This is the text surfaced to observers as `last_error`; it keeps every
/// `.context(...)` layer so a transport failure still names the URL.
#[must_use]
pub fn error_chain_message(error: &anyhow::Error) -> String {
    let mut message = error.to_string();

    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    message
}

/// Convert any error into an [`ErrorContext`] with a suggestion.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(launcher_error) = error.downcast_ref::<LauncherError>() {
        return create_error_context(launcher_error.clone());
    }

    for cause in error.chain() {
        if let Some(launcher_error) = cause.downcast_ref::<LauncherError>() {
            return create_error_context(launcher_error.clone());
        }
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(LauncherError::PermissionDenied {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion(
                    "Check that the install directory is writable by the current user",
                )
                .with_details(
                    "The launcher writes the archive, the Build folder and version.txt into the install root",
                );
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(LauncherError::FileSystemError {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(LauncherError::ConfigError {
            message: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax of your launcher configuration");
    }

    ErrorContext::new(LauncherError::Other {
        message: error_chain_message(&error),
    })
}

fn create_error_context(error: LauncherError) -> ErrorContext {
    match &error {
        LauncherError::NetworkError {
            ..
        } => ErrorContext::new(error.clone()).with_suggestion("Check your internet connection, then run the command again to retry"),
        LauncherError::HttpStatus {
            status,
            ..
        } => {
            let suggestion = if *status == 404 {
                "Check `version_url` and `archive_url` in your launcher configuration"
            } else {
                "The update server may be unavailable; try again later"
            };
            ErrorContext::new(error.clone()).with_suggestion(suggestion)
        }
        LauncherError::PermissionDenied {
            path,
            ..
        } => ErrorContext::new(error.clone())
            .with_details(format!("Path: {path}"))
            .with_suggestion("Check that the install directory is writable by the current user"),
        LauncherError::ArchiveError {
            ..
        }
        | LauncherError::UnsafeArchiveEntry {
            ..
        } => ErrorContext::new(error.clone())
            .with_details("The previously installed version was left in place")
            .with_suggestion("Retry the update; if it keeps failing the published archive is broken"),
        LauncherError::ConfigNotFound {
            ..
        } => ErrorContext::new(error.clone()).with_suggestion(
            "Create launcher.toml next to the launcher or pass --config <path>",
        ),
        LauncherError::ConfigError {
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion("Fix the launcher configuration and run the command again"),
        LauncherError::ExecutableNotFound {
            ..
        } => ErrorContext::new(error.clone()).with_suggestion(
            "Run `alaunch check` to reinstall, or check `artifact_name` in the configuration",
        ),
        LauncherError::Cancelled => ErrorContext::new(error.clone())
            .with_details("The version record was not changed"),
        _ => ErrorContext::new(error.clone()),
    }
}
