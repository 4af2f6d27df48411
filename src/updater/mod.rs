//! Keeping the installed artifact current.
//!
//! [`UpdatePipeline`] runs one update cycle at a time:
//!
//! ```text
//! check_for_updates()
//!   ├── no version record ──────────────► install(first install)
//!   ├── read local version
//!   ├── fetch remote version text
//!   │     ├── nothing returned ─────────► NoRemoteVersion (status unchanged)
//!   │     └── error ────────────────────► Failed
//!   └── compare
//!         ├── equal ────────────────────► Ready / UpToDate
//!         └── different ────────────────► install(update)
//!
//! install()
//!   ├── status = DownloadingGame | DownloadingUpdate
//!   ├── stream archive to {root}/{artifact}.zip
//!   ├── validate every entry, then extract into {root}
//!   ├── delete the archive
//!   └── atomically rewrite version.txt ─► Ready / Installed
//! ```
//!
//! The version record is the commit point: any failure before it is rewritten
//! leaves the previous install recorded and sets [`Status::Failed`]. The
//! primary action then retries by running another cycle.
//!
//! [`Status::Failed`]: crate::installation::Status::Failed

mod download;
mod extract;
mod guard;
mod pipeline;


pub use guard::{InstallGuard, InstallLock, InstallPermit};
pub use pipeline::{CheckOutcome, UpdatePipeline};
