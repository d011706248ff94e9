//! Download data model.
//!
//! - [`request`] - what to download and how ([`DownloadRequest`])
//! - [`response`] - what the transport answered ([`TransportResponse`])
//! - [`output`] - what the download turned into ([`Materialized`])
//!
//! # Examples
//!
//! ```rust
//! use downl::download::{DownloadRequest, Materialized};
//! use std::convert::TryFrom;
//!
//! let request = DownloadRequest::try_from("https://example.com/file.zip")?.filename("renamed.zip");
//! assert_eq!(request.filename.as_deref(), Some("renamed.zip"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod output;
pub mod request;
pub mod response;

pub use output::Materialized;
pub use request::{DownloadOptions, DownloadRequest, TransportOptions};
pub use response::TransportResponse;
