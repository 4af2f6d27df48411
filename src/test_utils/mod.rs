//! Test utilities for alaunch
//!
//! Helpers for exercising the update pipeline without touching the network:
//! - [`FakeSource`]: an in-memory [`RemoteSource`](crate::remote::RemoteSource)
//!   with scriptable version and archive responses
//! - [`TestServer`]: a minimal local HTTP responder for [`HttpSource`](crate::remote::HttpSource)
//! - [`ZipBuilder`]: builds ZIP archives in memory
//!
//! # Example
//!
//! ```rust,no_run
//! use alaunch_cli::test_utils::{FakeSource, ZipBuilder};
//!
//! let archive = ZipBuilder::new()
//!     .dir("Build/")
//!     .file("Build/Game", b"binary")
//!     .build();
//! let source = FakeSource::new("1.0.0", archive);
//! ```

pub mod archive;
pub mod fake_source;
pub mod http_server;

pub use archive::ZipBuilder;
pub use fake_source::{FakeArchive, FakeSource};
pub use http_server::TestServer;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has any effect. Uses `level` if given, otherwise
/// `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=alaunch_cli=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}
