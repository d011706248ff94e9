//! Per-download progress display.
//!
//! [`DownloadProgress`] wraps one [`ProgressBar`] for the lifetime of one
//! response body: created once the headers are in, advanced per chunk and
//! finished once the body is buffered.
//!
//! # Examples
//!
//! ```rust
//! use downl::progress::{DownloadProgress, StyleOptions};
//!
//! let progress = DownloadProgress::start(&StyleOptions::hidden(), Some(1024), "file.zip");
//! progress.inc(512);
//! progress.inc(512);
//! assert_eq!(progress.position(), 1024);
//! progress.finish();
//! ```

use crate::progress::StyleOptions;
use indicatif::ProgressBar;

/// Progress bar of a single download.
#[derive(Debug)]
pub struct DownloadProgress {
    pb: ProgressBar,
    clear: bool,
}

impl DownloadProgress {
    /// Create and draw the bar for a body of `expected` bytes.
    ///
    /// # Arguments
    /// * `style_options` - Style configuration for progress bars
    /// * `expected` - Announced body length, if any
    /// * `label` - Message shown next to the bar
    pub fn start(style_options: &StyleOptions, expected: Option<u64>, label: &str) -> Self {
        let opts = match expected {
            Some(_) => style_options.bar(),
            None => style_options.spinner(),
        };
        let clear = opts.clear;
        let pb = opts.clone().to_progress_bar(expected);
        pb.set_message(label.to_string());
        pb.tick();

        Self { pb, clear }
    }

    /// Advance by `delta` received bytes.
    pub fn inc(&self, delta: u64) {
        self.pb.inc(delta);
    }

    /// Bytes received so far.
    pub fn position(&self) -> u64 {
        self.pb.position()
    }

    /// Finish the bar, clearing or keeping it based on configuration.
    pub fn finish(self) {
        if self.clear {
            self.pb.finish_and_clear();
        } else {
            self.pb.finish();
        }
    }

    /// Stop the bar after a failed transfer, leaving the position as is.
    pub fn abandon(self) {
        if self.clear {
            self.pb.finish_and_clear();
        } else {
            self.pb.abandon();
        }
    }
}
