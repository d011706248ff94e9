//! Builder pattern implementation for creating Downloader instances.
//!
//! This module provides the [`DownloaderBuilder`] struct that implements the builder
//! pattern for configuring and creating [`Downloader`] instances. It allows for
//! flexible configuration of HTTP settings, progress display and callback functions.
//!
//! # Examples
//!
//! ## Basic Builder Usage
//!
//! ```rust
//! use downl::downloader::DownloaderBuilder;
//! use std::time::Duration;
//!
//! # fn example() -> downl::Result<()> {
//! let downloader = DownloaderBuilder::new()
//!     .retries(3)
//!     .timeout(Duration::from_secs(60))
//!     .build()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Advanced Configuration with Callbacks
//!
//! ```rust
//! use downl::downloader::DownloaderBuilder;
//! use downl::download::Materialized;
//! use reqwest::header::{HeaderMap, ACCEPT};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut headers = HeaderMap::new();
//! headers.insert(ACCEPT, "*/*".parse()?);
//!
//! let downloader = DownloaderBuilder::new()
//!     .headers(headers)
//!     .user_agent("MyApp/1.0")
//!     .on_complete(|result| {
//!         if let Materialized::File(path) = result {
//!             println!("Saved {}", path.display());
//!         }
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
//! // Create a downloader with no visible progress bars
//! let downloader = DownloaderBuilder::hidden().build();
//! assert!(downloader.is_ok());
//! ```

use super::{config::DownloaderConfig, downloader::Downloader};
use crate::download::Materialized;
use crate::error::Result;
use crate::StyleOptions;

use reqwest::header::{HeaderMap, HeaderValue, IntoHeaderName};
use std::{sync::Arc, time::Duration};

/// A builder used to create a [`Downloader`].
///
/// ```rust
/// # fn main() -> downl::Result<()> {
/// use downl::downloader::DownloaderBuilder;
///
/// let d = DownloaderBuilder::new().retries(5).max_redirects(3).build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct DownloaderBuilder {
    config: DownloaderConfig,
}

impl DownloaderBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        DownloaderBuilder::default()
    }

    /// Convenience function to hide the progress bars.
    pub fn hidden() -> Self {
        let mut builder = DownloaderBuilder::default();
        builder.config.style_options = StyleOptions::hidden();
        builder
    }

    /// Set the number of retries per request.
    ///
    /// Only transient failures (connection errors, 5xx, 408, 429) are retried.
    pub fn retries(mut self, retries: u32) -> Self {
        self.config.retries = retries;
        self
    }

    /// Route every request through `proxy`.
    pub fn proxy(mut self, proxy: reqwest::Proxy) -> Self {
        self.config.proxy = Some(proxy);
        self
    }

    /// Set the `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Set the total time allowed for one request, body included.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Set the time allowed to establish a connection.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = Some(timeout);
        self
    }

    /// Set the maximum number of redirects followed before giving up.
    pub fn max_redirects(mut self, max_redirects: usize) -> Self {
        self.config.max_redirects = max_redirects;
        self
    }

    /// Set the downloader style options.
    pub fn style_options(mut self, style_options: StyleOptions) -> Self {
        self.config.style_options = style_options;
        self
    }

    /// Set callback for when each download completes.
    ///
    /// The callback is called from the download task once the result is
    /// materialized, before the result is handed to the caller. Failed
    /// downloads do not trigger it.
    ///
    /// # Example
    ///
    /// ```rust
    /// use downl::downloader::DownloaderBuilder;
    /// use downl::download::Materialized;
    ///
    /// let downloader = DownloaderBuilder::new()
    ///     .on_complete(|result| match result {
    ///         Materialized::Bytes(bytes) => println!("[Memory] {} bytes", bytes.len()),
    ///         Materialized::File(path) => println!("[File] {}", path.display()),
    ///         Materialized::Extracted(entries) => println!("[Archive] {} entries", entries.len()),
    ///     })
    ///     .build();
    /// ```
    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Materialized) + Send + Sync + 'static,
    {
        self.config.on_complete = Some(Arc::new(Box::new(callback)));
        self
    }

    /// Helper method to get or create a new HeaderMap.
    fn new_header(&self) -> HeaderMap {
        match self.config.headers {
            Some(ref h) => h.to_owned(),
            _ => HeaderMap::new(),
        }
    }

    /// Add the http headers.
    ///
    /// You need to pass in a `HeaderMap`, not a `HeaderName`.
    /// `HeaderMap` is a set of http headers.
    ///
    /// You can call `.headers()` multiple times and all `HeaderMap` will be merged into a single one.
    ///
    /// # Example
    ///
    /// ```
    /// use reqwest::header::{self, HeaderValue, HeaderMap};
    /// use downl::downloader::DownloaderBuilder;
    ///
    /// let accept = HeaderValue::from_static("application/zip");
    ///
    /// let builder = DownloaderBuilder::new()
    ///     .headers(HeaderMap::from_iter([(header::ACCEPT, accept)]))
    ///     .build();
    /// ```
    ///
    /// See also [`header()`].
    ///
    /// [`header()`]: DownloaderBuilder::header
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        let mut new = self.new_header();
        new.extend(headers);

        self.config.headers = Some(new);
        self
    }

    /// Add the http header
    ///
    /// # Example
    ///
    /// You can use the `.header()` chain to add multiple headers
    ///
    /// ```
    /// use reqwest::header::{self, HeaderValue};
    /// use downl::downloader::DownloaderBuilder;
    ///
    /// let auth = HeaderValue::from_str("Basic aGk6MTIzNDU2Cg==").expect("Invalid auth");
    ///
    /// let builder = DownloaderBuilder::new()
    ///     .header(header::AUTHORIZATION, auth)
    ///     .header(header::ACCEPT, HeaderValue::from_static("*/*"))
    ///     .build();
    /// ```
    ///
    /// If you need to pass in a `HeaderMap`, instead of calling `.header()` multiple times.
    /// See also [`headers()`].
    ///
    /// [`headers()`]: DownloaderBuilder::headers
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        let mut new = self.new_header();

        new.insert(name, value);

        self.config.headers = Some(new);
        self
    }

    /// Create the [`Downloader`] with the specified options.
    ///
    /// Fails when the HTTP client cannot be built, e.g. when no TLS backend
    /// can be initialized.
    pub fn build(self) -> Result<Downloader> {
        Downloader::new(self.config)
    }
}
