//! Progress bar styling and configuration options.
//!
//! A download shows a byte bar when the response announces its length and a
//! spinner otherwise. Both are configured through [`StyleOptions`].
//!
//! # Examples
//!
//! ## Default Styling
//!
//! ```rust
//! use downl::progress::StyleOptions;
//!
//! // Pip-like byte bar, spinner for unknown lengths, both cleared on completion
//! let style_options = StyleOptions::default();
//! assert!(style_options.is_enabled());
//! ```
//!
//! ## Custom Styling
//!
//! ```rust
//! use downl::progress::{StyleOptions, ProgressBarOpts};
//!
//! let custom_style = StyleOptions::new(
//!     ProgressBarOpts::new(
//!         Some("[{bar:40.cyan/blue}] {bytes}/{total_bytes} {msg}".to_string()),
//!         Some(ProgressBarOpts::CHARS_FINE.to_string()),
//!         true,
//!         false,
//!     ),
//!     ProgressBarOpts::spinner(),
//! );
//! ```
//!
//! ## Hidden Progress Bars
//!
//! ```rust
//! use downl::progress::StyleOptions;
//!
//! let hidden_style = StyleOptions::hidden();
//! assert!(!hidden_style.is_enabled());
//! ```

use indicatif::{ProgressBar, ProgressStyle};

/// Define the download progress style options.
#[derive(Debug, Clone)]
pub struct StyleOptions {
    /// Style options for downloads with a known length.
    pub(crate) bar: ProgressBarOpts,
    /// Style options for downloads of unknown length.
    pub(crate) spinner: ProgressBarOpts,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            bar: ProgressBarOpts::with_pip_style(),
            spinner: ProgressBarOpts::spinner(),
        }
    }
}

impl StyleOptions {
    /// Create new [`StyleOptions`].
    pub fn new(bar: ProgressBarOpts, spinner: ProgressBarOpts) -> Self {
        Self { bar, spinner }
    }

    /// Style options which never draw anything.
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBarOpts::hidden(),
            spinner: ProgressBarOpts::hidden(),
        }
    }

    /// Set the options for the sized progress bar.
    pub fn set_bar(&mut self, bar: ProgressBarOpts) {
        self.bar = bar;
    }

    /// Set the options for the unknown-length spinner.
    pub fn set_spinner(&mut self, spinner: ProgressBarOpts) {
        self.spinner = spinner;
    }

    /// Return `false` if neither the bar nor the spinner is enabled.
    pub fn is_enabled(&self) -> bool {
        self.bar.enabled || self.spinner.enabled
    }

    /// Get a reference to the sized progress bar options.
    pub fn bar(&self) -> &ProgressBarOpts {
        &self.bar
    }

    /// Get a reference to the spinner options.
    pub fn spinner(&self) -> &ProgressBarOpts {
        &self.spinner
    }
}

/// Define the options for a progress bar.
#[derive(Debug, Clone)]
pub struct ProgressBarOpts {
    /// Progress bar template string.
    template: Option<String>,
    /// Progression characters set.
    ///
    /// There must be at least 3 characters for the following states:
    /// "filled", "current", and "to do".
    progress_chars: Option<String>,
    /// Enable or disable the progress bar.
    pub(crate) enabled: bool,
    /// Clear the progress bar once completed.
    pub(crate) clear: bool,
}

impl Default for ProgressBarOpts {
    fn default() -> Self {
        Self {
            template: None,
            progress_chars: None,
            enabled: true,
            clear: true,
        }
    }
}

impl ProgressBarOpts {
    /// Template which looks like the Python package installer pip.
    ///
    /// `━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━ 211.23 KiB/211.23 KiB 1008.31 KiB/s eta 0s`
    pub const TEMPLATE_PIP: &'static str =
        "{bar:40.green/black} {bytes:>11.green}/{total_bytes:<11.green} {bytes_per_sec:>13.red} eta {eta:.blue}";
    /// Template for bodies of unknown length.
    ///
    /// `⠙ 211.23 KiB 1008.31 KiB/s file.zip`
    pub const TEMPLATE_SPINNER: &'static str =
        "{spinner:.green} {bytes:>11.green} {bytes_per_sec:>13.red} {msg}";
    /// Use fine blocks as progress characters: `"█▉▊▋▌▍▎▏  "`.
    pub const CHARS_FINE: &'static str = "█▉▊▋▌▍▎▏  ";
    /// Use a line as progress characters: `"━╾─"`.
    pub const CHARS_LINE: &'static str = "━╾╴─";

    /// Create a new [`ProgressBarOpts`].
    pub fn new(
        template: Option<String>,
        progress_chars: Option<String>,
        enabled: bool,
        clear: bool,
    ) -> Self {
        Self {
            template,
            progress_chars,
            enabled,
            clear,
        }
    }

    /// Create a [`ProgressStyle`] based on the provided options.
    ///
    /// An invalid template falls back to the default bar template.
    pub fn to_progress_style(self) -> ProgressStyle {
        let mut style = ProgressStyle::default_bar();
        if let Some(template) = self.template {
            match ProgressStyle::default_bar().template(&template) {
                Ok(templated) => style = templated,
                Err(e) => tracing::warn!(template = %template, "Invalid progress template: {}", e),
            }
        }
        if let Some(progress_chars) = self.progress_chars {
            style = style.progress_chars(&progress_chars);
        }
        style
    }

    /// Create a [`ProgressBar`] based on the provided options.
    ///
    /// A `len` of `None` creates a bar of unknown length.
    pub fn to_progress_bar(self, len: Option<u64>) -> ProgressBar {
        // Return a hidden Progress bar if we disabled it.
        if !self.enabled {
            return ProgressBar::hidden();
        }

        // Otherwise returns a ProgressBar with the style.
        let style = self.to_progress_style();
        let pb = match len {
            Some(len) => ProgressBar::new(len),
            None => ProgressBar::no_length(),
        };
        pb.with_style(style)
    }

    /// Create a new [`ProgressBarOpts`] which looks like Python pip.
    pub fn with_pip_style() -> Self {
        Self {
            template: Some(ProgressBarOpts::TEMPLATE_PIP.into()),
            progress_chars: Some(ProgressBarOpts::CHARS_LINE.into()),
            enabled: true,
            clear: true,
        }
    }

    /// Create a new [`ProgressBarOpts`] for bodies of unknown length.
    pub fn spinner() -> Self {
        Self {
            template: Some(ProgressBarOpts::TEMPLATE_SPINNER.into()),
            progress_chars: None,
            enabled: true,
            clear: true,
        }
    }

    /// Whether the bar is drawn at all.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Set to `true` to clear the progress bar upon completion.
    pub fn set_clear(&mut self, clear: bool) {
        self.clear = clear;
    }

    /// Create a new [`ProgressBarOpts`] which hides the progress bars.
    pub fn hidden() -> Self {
        Self {
            enabled: false,
            ..ProgressBarOpts::default()
        }
    }
}
