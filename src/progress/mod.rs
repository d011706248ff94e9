//! Progress module containing progress bar functionality.
//!
//! This module provides progress bar styling and the per-download progress
//! display.
//!
//! - `style` - Progress bar styling options and templates
//! - `display` - Progress bar of a single download
//!
//! # Examples
//!
//! ## Using with Downloader
//!
//! ```rust
//! use downl::downloader::DownloaderBuilder;
//! use downl::progress::{ProgressBarOpts, StyleOptions};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = DownloaderBuilder::new()
//!     .style_options(StyleOptions::new(
//!         ProgressBarOpts::with_pip_style(),
//!         ProgressBarOpts::hidden(),
//!     ))
//!     .build()?;
//! # Ok(())
//! # }
//! ```

pub(crate) mod display;
pub(crate) mod style;

pub use display::DownloadProgress;
pub use style::{ProgressBarOpts, StyleOptions};
