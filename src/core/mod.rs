//! Core types shared across the launcher.
//!
//! - [`error`]: the [`LauncherError`] enum and the [`ErrorContext`] wrapper used
//!   for user-facing messages
//! - [`error_builders`]: helpers that wrap I/O and transport failures in typed
//!   error layers

pub mod error;
pub mod error_builders;

pub use error::{ErrorContext, LauncherError, error_chain_message, user_friendly_error};
