use crate::config::LauncherConfig;
use crate::constants::{DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::core::LauncherError;
use crate::core::error_builders::network_error;
use crate::remote::{ArchiveStream, RemoteSource};
use anyhow::{Context, Result};
use std::time::Duration;
use tracing::debug;

/// [`RemoteSource`] backed by two fixed HTTP(S) URLs.
///
/// # Examples
///
/// ```rust,no_run
/// use alaunch_cli::remote::{HttpSource, RemoteSource};
///
/// # async fn example() -> anyhow::Result<()> {
/// let source = HttpSource::new(
///     "https://downloads.example.com/version.txt",
///     "https://downloads.example.com/Game.zip",
/// )?;
///
/// if let Some(text) = source.fetch_version_text().await? {
///     println!("Published version: {}", text.trim());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    version_url: String,
    archive_url: String,
    timeout: Duration,
    user_agent: String,
}

impl HttpSource {
    /// Create a source with the default timeout and user agent.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be built (e.g. no TLS backend).
    pub fn new(version_url: impl Into<String>, archive_url: impl Into<String>) -> Result<Self> {
        Self::with_settings(
            version_url.into(),
            archive_url.into(),
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            DEFAULT_USER_AGENT.to_string(),
        )
    }

    /// Create a source from the configured URLs, timeout, and user agent.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be built.
    pub fn from_config(config: &LauncherConfig) -> Result<Self> {
        Self::with_settings(
            config.version_url.clone(),
            config.archive_url.clone(),
            config.request_timeout(),
            config.user_agent.clone(),
        )
    }

    fn with_settings(
        version_url: String,
        archive_url: String,
        timeout: Duration,
        user_agent: String,
    ) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout, &user_agent)?,
            version_url,
            archive_url,
            timeout,
            user_agent,
        })
    }

    /// Fetch the version text from synchronous code.
    ///
    /// The request runs on a dedicated worker thread with its own
    /// single-threaded runtime, so this is safe to call from inside an async
    /// context without stalling its event loop on the network.
    ///
    /// # Errors
    ///
    /// Same as [`RemoteSource::fetch_version_text`], plus failure to start
    /// the worker.
    pub fn fetch_version_text_blocking(&self) -> Result<Option<String>> {
        let version_url = self.version_url.clone();
        let archive_url = self.archive_url.clone();
        let timeout = self.timeout;
        let user_agent = self.user_agent.clone();

        let worker = std::thread::Builder::new()
            .name("alaunch-version-fetch".to_string())
            .spawn(move || -> Result<Option<String>> {
                let runtime = tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                    .context("Failed to start runtime for version fetch")?;

                // The client's connection pool is bound to the runtime that
                // drives it, so the worker builds its own.
                let source = Self::with_settings(version_url, archive_url, timeout, user_agent)?;
                runtime.block_on(source.fetch_version_text())
            })
            .context("Failed to spawn version fetch worker")?;

        worker.join().map_err(|_| anyhow::anyhow!("Version fetch worker panicked"))?
    }

    async fn get(&self, url: &str, operation: &str) -> Result<reqwest::Response> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| network_error(operation, e))
            .with_context(|| format!("Request to {url} failed"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LauncherError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            }
            .into());
        }

        Ok(response)
    }
}

fn build_client(timeout: Duration, user_agent: &str) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()
        .context("Failed to build HTTP client")
}

impl RemoteSource for HttpSource {
    type Archive = HttpArchive;

    async fn fetch_version_text(&self) -> Result<Option<String>> {
        let response = self.get(&self.version_url, "fetch remote version").await?;

        let text = response
            .text()
            .await
            .map_err(|e| network_error("read remote version", e))?;

        if text.trim().is_empty() {
            debug!("Version endpoint {} returned an empty body", self.version_url);
            return Ok(None);
        }

        Ok(Some(text))
    }

    async fn fetch_archive(&self) -> Result<HttpArchive> {
        let response = self.get(&self.archive_url, "download archive").await?;
        Ok(HttpArchive {
            content_length: response.content_length(),
            response,
        })
    }
}

/// Streaming archive body of an HTTP response.
#[derive(Debug)]
pub struct HttpArchive {
    response: reqwest::Response,
    content_length: Option<u64>,
}

impl ArchiveStream for HttpArchive {
    fn content_length(&self) -> Option<u64> {
        self.content_length
    }

    async fn next_chunk(&mut self) -> Result<Option<Vec<u8>>> {
        let chunk = self
            .response
            .chunk()
            .await
            .map_err(|e| network_error("download archive", e))?;
        Ok(chunk.map(|bytes| bytes.to_vec()))
    }
}
