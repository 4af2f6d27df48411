//! Progress indicators for downloads and checks.
//!
//! A thin wrapper over `indicatif` that switches between a spinner (unknown
//! size, or no download yet) and a byte-count bar once the archive size is
//! known. Progress output is hidden when `ALAUNCH_NO_PROGRESS` is set.
//!
//! ```rust,no_run
//! use alaunch_cli::utils::progress::ProgressBar;
//!
//! let progress = ProgressBar::new_spinner();
//! progress.set_message("Checking for updates");
//! progress.set_download(512, Some(2048));
//! progress.finish_and_clear();
//! ```

use crate::constants::NO_PROGRESS_ENV_VAR;
use indicatif::{ProgressBar as IndicatifBar, ProgressStyle as IndicatifStyle};
use std::time::Duration;

fn is_progress_disabled() -> bool {
    std::env::var(NO_PROGRESS_ENV_VAR).is_ok()
}

/// Spinner that turns into a byte-count bar during a download.
#[derive(Clone)]
pub struct ProgressBar {
    inner: IndicatifBar,
}

impl ProgressBar {
    /// Create a ticking spinner (hidden if progress is disabled).
    pub fn new_spinner() -> Self {
        let bar = if is_progress_disabled() {
            IndicatifBar::hidden()
        } else {
            let bar = IndicatifBar::new_spinner();
            bar.set_style(spinner_style());
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        };
        Self {
            inner: bar,
        }
    }

    /// Create a bar that never draws.
    pub fn hidden() -> Self {
        Self {
            inner: IndicatifBar::hidden(),
        }
    }

    pub fn set_message(&self, msg: impl Into<String>) {
        self.inner.set_message(msg.into());
    }

    /// Show `downloaded` of `total` bytes.
    ///
    /// Without a total the spinner keeps ticking and only the byte count is
    /// shown.
    pub fn set_download(&self, downloaded: u64, total: Option<u64>) {
        match total {
            Some(total) => {
                if self.inner.length() != Some(total) {
                    self.inner.set_length(total);
                    self.inner.set_style(download_style());
                }
                self.inner.set_position(downloaded);
            }
            None => {
                self.inner.set_position(downloaded);
            }
        }
    }

    pub fn finish_and_clear(&self) {
        self.inner.finish_and_clear();
    }

    /// Whether output is suppressed.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.inner.is_hidden()
    }
}

fn download_style() -> IndicatifStyle {
    IndicatifStyle::default_bar()
        .template("{spinner:.cyan} {msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
        .unwrap_or_else(|_| IndicatifStyle::default_bar())
        .progress_chars("━╸━")
}

fn spinner_style() -> IndicatifStyle {
    IndicatifStyle::default_spinner()
        .template("{spinner:.cyan} {msg} {bytes}")
        .unwrap_or_else(|_| IndicatifStyle::default_spinner())
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
}
