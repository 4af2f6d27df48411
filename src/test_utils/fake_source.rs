//! Scriptable in-memory remote.

use crate::core::error_builders::network_error;
use crate::remote::{ArchiveStream, RemoteSource};
use anyhow::Result;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

const CHUNK_SIZE: usize = 1024;

#[derive(Clone)]
enum VersionResponse {
    Text(String),
    Empty,
    Error(String),
}

#[derive(Clone)]
enum ArchiveResponse {
    Bytes {
        data: Vec<u8>,
        fail_after_chunks: Option<usize>,
    },
    Error(String),
}

struct Script {
    version: VersionResponse,
    archive: ArchiveResponse,
}

/// A [`RemoteSource`] whose responses are set by the test.
///
/// Responses can be changed between calls through `&self`, so a pipeline
/// that owns the source can still be re-scripted via
/// [`UpdatePipeline::source`](crate::updater::UpdatePipeline::source).
pub struct FakeSource {
    script: Mutex<Script>,
    gate: Option<Arc<Notify>>,
    version_calls: AtomicUsize,
    archive_calls: AtomicUsize,
}

impl FakeSource {
    /// Serve `version` as the version text and `archive` as the archive body.
    pub fn new(version: &str, archive: Vec<u8>) -> Self {
        Self {
            script: Mutex::new(Script {
                version: VersionResponse::Text(version.to_string()),
                archive: ArchiveResponse::Bytes {
                    data: archive,
                    fail_after_chunks: None,
                },
            }),
            gate: None,
            version_calls: AtomicUsize::new(0),
            archive_calls: AtomicUsize::new(0),
        }
    }

    /// Hold every archive stream before its first chunk until `gate` is
    /// notified.
    #[must_use]
    pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn set_version(&self, version: &str) {
        self.script().version = VersionResponse::Text(version.to_string());
    }

    /// Make the version endpoint return an empty body.
    pub fn set_version_empty(&self) {
        self.script().version = VersionResponse::Empty;
    }

    /// Make the version endpoint fail like a transport error.
    pub fn set_version_error(&self, message: &str) {
        self.script().version = VersionResponse::Error(message.to_string());
    }

    pub fn set_archive(&self, data: Vec<u8>) {
        self.script().archive = ArchiveResponse::Bytes {
            data,
            fail_after_chunks: None,
        };
    }

    /// Make the archive request itself fail.
    pub fn set_archive_error(&self, message: &str) {
        self.script().archive = ArchiveResponse::Error(message.to_string());
    }

    /// Serve `data` but fail the stream after `chunks` chunks.
    pub fn fail_archive_after(&self, data: Vec<u8>, chunks: usize) {
        self.script().archive = ArchiveResponse::Bytes {
            data,
            fail_after_chunks: Some(chunks),
        };
    }

    pub fn version_calls(&self) -> usize {
        self.version_calls.load(Ordering::SeqCst)
    }

    pub fn archive_calls(&self) -> usize {
        self.archive_calls.load(Ordering::SeqCst)
    }

    fn script(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl RemoteSource for FakeSource {
    type Archive = FakeArchive;

    async fn fetch_version_text(&self) -> Result<Option<String>> {
        self.version_calls.fetch_add(1, Ordering::SeqCst);
        let response = self.script().version.clone();
        match response {
            VersionResponse::Text(text) => Ok(Some(text)),
            VersionResponse::Empty => Ok(None),
            VersionResponse::Error(message) => Err(network_error("fetch remote version", message)),
        }
    }

    async fn fetch_archive(&self) -> Result<FakeArchive> {
        self.archive_calls.fetch_add(1, Ordering::SeqCst);
        let response = self.script().archive.clone();
        match response {
            ArchiveResponse::Bytes {
                data,
                fail_after_chunks,
            } => Ok(FakeArchive {
                content_length: Some(data.len() as u64),
                chunks: data.chunks(CHUNK_SIZE).map(<[u8]>::to_vec).collect(),
                fail_after_chunks,
                served: 0,
                gate: self.gate.clone(),
            }),
            ArchiveResponse::Error(message) => Err(network_error("download archive", message)),
        }
    }
}

/// Archive body produced by [`FakeSource`].
pub struct FakeArchive {
    content_length: Option<u64>,
    chunks: VecDeque<Vec<u8>>,
    fail_after_chunks: Option<usize>,
    served: usize,
    gate: Option<Arc<Notify>>,
}

impl ArchiveStream for FakeArchive {
    fn content_length(&self) -> Option<u64> {
        self.content_length
    }

    async fn next_chunk(&mut self) -> Result<Option<Vec<u8>>> {
        if self.served == 0 {
            if let Some(gate) = self.gate.take() {
                gate.notified().await;
            }
        }

        if self.fail_after_chunks == Some(self.served) {
            return Err(network_error("download archive", "connection reset"));
        }

        self.served += 1;
        Ok(self.chunks.pop_front())
    }
}
