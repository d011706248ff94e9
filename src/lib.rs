//! downl is a crate aiming at providing a simple way to download a file
//! via HTTP(S), save it under a sensible name and unpack it when it is an
//! archive.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use downl::{archive::ExtractOptions, download::DownloadRequest, DownloaderBuilder, Error};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! let reqwest_rs = "https://github.com/seanmonstar/reqwest/archive/refs/tags/v0.11.9.zip";
//! let downloader = DownloaderBuilder::new().build()?;
//!
//! // Save the archive as-is, under the name the server suggests.
//! let saved = downloader
//!     .download(DownloadRequest::try_from(reqwest_rs)?.destination("output"))
//!     .await?;
//!
//! // Or unpack it, dropping the top-level directory.
//! let unpacked = downloader
//!     .download(
//!         DownloadRequest::try_from(reqwest_rs)?
//!             .destination("vendor/reqwest")
//!             .extract(ExtractOptions::new().strip(1)),
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! The downl crate is organized into several modules:
//!
//! - [`archive`] - Archive detection and extraction (zip, tar, tar.gz)
//! - [`download`] - Requests, transport responses and materialized results
//! - [`downloader`] - The `Downloader`, its builder and the `InFlight` handle
//! - [`error`] - Centralized error handling with the `Error` enum
//! - [`filename`] - File name resolution, Content-Disposition parsing and sanitizing
//! - [`http`] - HTTP client functionality and utilities
//! - [`progress`] - Progress bar styling and display
//! - [`sniff`] - File type detection from magic numbers and MIME types
//! - [`utils`] - Shared utility functions

pub mod archive;
pub mod download;
pub mod downloader;
pub mod error;
pub mod filename;
pub mod http;
pub mod progress;
pub mod sniff;
pub mod utils;

pub use archive::{ArchiveEntry, ArchiveKind, EntryKind, ExtractOptions};
pub use download::{DownloadOptions, DownloadRequest, Materialized, TransportOptions, TransportResponse};
pub use downloader::{download, ByteStream, Completion, Downloader, DownloaderBuilder, InFlight};
pub use error::{Error, Result};
pub use filename::{parse_content_disposition, resolve_filename, sanitize_filename};
pub use http::{create_http_client, HttpClientConfig};
pub use progress::{ProgressBarOpts, StyleOptions};
pub use utils::content_length::{expected_length, parse_content_range_total};
