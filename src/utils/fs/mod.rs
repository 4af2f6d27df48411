//! File system helpers used by the install pipeline.
//!
//! - [`atomic`]: write-then-rename so the version record is never half written
//! - [`dirs`]: directory creation and best-effort removal of working files

pub mod atomic;
pub mod dirs;

pub use atomic::atomic_write;
pub use dirs::{ensure_dir, remove_file_if_exists};
