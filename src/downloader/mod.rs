//! Downloader module containing core downloader functionality, builder pattern, and configuration.
//!
//! This module provides the main [`Downloader`] struct and its associated builder pattern
//! for configuring and running downloads. Each download yields an [`InFlight`]
//! handle that is both a stream of body chunks and a future of the final result.
//!
//! # Overview
//!
//! The downloader module is organized into four main components:
//!
//! - `downloader` - Core Downloader struct with download orchestration logic
//! - `builder` - DownloaderBuilder for flexible configuration using the builder pattern
//! - `config` - Configuration structures and callback types
//! - `in_flight` - Handles on a running download
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use downl::downloader::DownloaderBuilder;
//! use downl::download::DownloadRequest;
//! use std::convert::TryFrom;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a downloader with default settings
//! let downloader = DownloaderBuilder::new().build()?;
//!
//! // Keep the payload in memory
//! let request = DownloadRequest::try_from("https://example.com/data.json")?;
//! let bytes = downloader.download(request).await?.into_bytes();
//! # Ok(())
//! # }
//! ```
//!
//! ## Advanced Configuration
//!
//! ```rust
//! use downl::downloader::DownloaderBuilder;
//! use std::time::Duration;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = DownloaderBuilder::new()
//!     .retries(3)
//!     .connect_timeout(Duration::from_secs(5))
//!     .on_complete(|result| {
//!         println!("Downloaded: {:?}", result.paths());
//!     })
//!     .build()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Hidden Progress Bars
//!
//! ```rust
//! use downl::downloader::DownloaderBuilder;
//!
//! // Create a downloader with hidden progress bars
//! let downloader = DownloaderBuilder::hidden().build();
//! ```

pub mod builder;
pub mod config;
pub mod downloader;
pub mod in_flight;

pub use builder::DownloaderBuilder;
pub use config::{DownloadCallback, DownloaderConfig};
pub use downloader::{download, Downloader};
pub use in_flight::{ByteStream, Completion, InFlight};
