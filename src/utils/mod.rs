//! Utility modules for the launcher.
//!
//! - [`fs`]: atomic writes and directory helpers
//! - [`path_validation`]: archive entry and artifact name validation
//! - [`progress`]: spinner/progress bar for the CLI

pub mod fs;
pub mod path_validation;
pub mod progress;

pub use fs::{atomic_write, ensure_dir};
pub use progress::ProgressBar;
