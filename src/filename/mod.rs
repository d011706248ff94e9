//! Filename resolution for saved downloads.
//!
//! - [`resolve`] - picks the name from the caller, the server or the URL
//! - [`content_disposition`] - `Content-Disposition` header parser
//! - [`sanitize`] - makes any candidate safe to use on disk
//!
//! # Examples
//!
//! ```rust
//! use downl::download::TransportResponse;
//! use downl::filename::resolve_filename;
//! use reqwest::{header::HeaderMap, Url};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let response = TransportResponse::new(Url::parse("https://example.com/latest")?, HeaderMap::new());
//! let zip_bytes = b"PK\x03\x04";
//! assert_eq!(resolve_filename(&response, zip_bytes, None), "latest.zip");
//! # Ok(())
//! # }
//! ```

pub mod content_disposition;
pub mod resolve;
pub mod sanitize;

pub use content_disposition::{parse_content_disposition, ContentDisposition};
pub use resolve::{resolve_filename, DEFAULT_FILENAME};
pub use sanitize::sanitize_filename;
