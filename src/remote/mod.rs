//! Remote version source.
//!
//! The update pipeline talks to the outside world through [`RemoteSource`]:
//! one call for the published version text, one for the archive. The
//! archive comes back as an [`ArchiveStream`] so the pipeline can write it to
//! disk chunk by chunk; archives are never buffered whole in memory.
//!
//! [`HttpSource`] is the production implementation. Tests substitute an
//! in-memory source.
//!
//! # Contract
//!
//! - `fetch_version_text` returns `Ok(None)` when the endpoint answered but
//!   returned nothing usable (an empty body). Transport failures and
//!   non-success statuses are errors. The pipeline treats the two
//!   differently: "nothing" leaves the status alone, an error marks the cycle
//!   failed.
//! - `fetch_archive` fails before returning if the request itself fails or
//!   the status is not a success; later chunk errors surface from
//!   [`ArchiveStream::next_chunk`].

mod http;

pub use http::{HttpArchive, HttpSource};

use anyhow::Result;
use std::future::Future;

/// A streamed archive body.
pub trait ArchiveStream: Send {
    /// Size announced by the server, if any.
    fn content_length(&self) -> Option<u64>;

    /// Next chunk of the body, `Ok(None)` once the body is complete.
    fn next_chunk(&mut self) -> impl Future<Output = Result<Option<Vec<u8>>>> + Send;
}

/// Where the published version and archive come from.
pub trait RemoteSource: Send + Sync {
    /// Body type returned by [`RemoteSource::fetch_archive`].
    type Archive: ArchiveStream;

    /// Fetch the published version text.
    fn fetch_version_text(&self) -> impl Future<Output = Result<Option<String>>> + Send;

    /// Start fetching the archive.
    fn fetch_archive(&self) -> impl Future<Output = Result<Self::Archive>> + Send;
}
