//! Download requests.
//!
//! A [`DownloadRequest`] describes one download: where to fetch from, where
//! (if anywhere) to save, under which name, whether to extract, and the
//! options forwarded to the HTTP transport.
//!
//! # Examples
//!
//! ```rust
//! use downl::archive::ExtractOptions;
//! use downl::download::DownloadRequest;
//! use std::convert::TryFrom;
//!
//! let request = DownloadRequest::try_from("https://example.com/release.zip")?
//!     .destination("downloads")
//!     .extract(ExtractOptions::new().strip(1));
//! assert!(request.destination.is_some());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::archive::ExtractOptions;
use crate::error::Error;

use reqwest::header::{HeaderMap, HeaderValue, IntoHeaderName};
use reqwest::Url;
use std::convert::TryFrom;
use std::path::PathBuf;
use std::time::Duration;

/// Options handed to the HTTP transport untouched.
#[derive(Debug, Clone, Default)]
pub struct TransportOptions {
    /// Extra request headers, merged over the client defaults.
    pub headers: HeaderMap,
    /// Query pairs appended to the URL.
    pub query: Vec<(String, String)>,
    /// Timeout for this request, overriding the client one.
    pub timeout: Option<Duration>,
}

/// Caller options for a download, everything but the URL and destination.
#[derive(Debug, Clone, Default)]
pub struct DownloadOptions {
    /// Extract the payload when it is a recognized archive.
    pub extract: Option<ExtractOptions>,
    /// Name of the saved file, overriding every inferred name.
    pub filename: Option<String>,
    /// Options forwarded to the transport.
    pub transport: TransportOptions,
}

/// Represents a resource to be downloaded.
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    /// URL of the resource.
    pub url: Url,
    /// Directory where the payload is saved or extracted.
    ///
    /// Without one, the payload is returned in memory.
    pub destination: Option<PathBuf>,
    /// Explicit file name.
    pub filename: Option<String>,
    /// Extraction options; `None` disables extraction.
    pub extract: Option<ExtractOptions>,
    /// Options forwarded to the transport.
    pub transport: TransportOptions,
}

impl DownloadRequest {
    /// Creates a new [`DownloadRequest`] returning the payload in memory.
    pub fn new(url: &Url) -> Self {
        Self {
            url: url.clone(),
            destination: None,
            filename: None,
            extract: None,
            transport: TransportOptions::default(),
        }
    }

    /// Creates a request from its parts.
    pub fn with_options(url: &Url, destination: Option<PathBuf>, options: DownloadOptions) -> Self {
        Self {
            url: url.clone(),
            destination,
            filename: options.filename,
            extract: options.extract,
            transport: options.transport,
        }
    }

    /// Save (or extract) into `destination`.
    pub fn destination(mut self, destination: impl Into<PathBuf>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    /// Save under `filename` instead of an inferred name.
    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Extract the payload if it turns out to be an archive.
    pub fn extract(mut self, options: ExtractOptions) -> Self {
        self.extract = Some(options);
        self
    }

    /// Add a request header.
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        self.transport.headers.insert(name, value);
        self
    }

    /// Append a query pair to the URL.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.transport.query.push((key.into(), value.into()));
        self
    }

    /// Set the timeout for this request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.transport.timeout = Some(timeout);
        self
    }
}

impl TryFrom<&Url> for DownloadRequest {
    type Error = crate::error::Error;

    fn try_from(value: &Url) -> Result<Self, Self::Error> {
        match value.scheme() {
            "http" | "https" => Ok(DownloadRequest::new(value)),
            scheme => Err(Error::InvalidUrl(format!(
                "The url \"{}\" has an unsupported scheme \"{}\"",
                value, scheme
            ))),
        }
    }
}

impl TryFrom<&str> for DownloadRequest {
    type Error = crate::error::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Url::parse(value)
            .map_err(|e| {
                Error::InvalidUrl(format!("The url \"{}\" cannot be parsed: {}", value, e))
            })
            .and_then(|u| DownloadRequest::try_from(&u))
    }
}
