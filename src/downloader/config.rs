//! Configuration structures and defaults for the downloader.
//!
//! This module provides the configuration used by the [`Downloader`] and
//! [`DownloaderBuilder`]: HTTP client settings, progress styling and the
//! completion callback.
//!
//! [`Downloader`]: super::Downloader
//! [`DownloaderBuilder`]: super::DownloaderBuilder
//!
//! # Examples
//!
//! ## Using Callbacks
//!
//! ```rust
//! use downl::downloader::DownloadCallback;
//! use downl::download::Materialized;
//!
//! let callback: DownloadCallback = Box::new(|result: &Materialized| match result {
//!     Materialized::Bytes(bytes) => println!("✓ Received {} bytes", bytes.len()),
//!     Materialized::File(path) => println!("✓ Saved {}", path.display()),
//!     Materialized::Extracted(entries) => println!("✓ Extracted {} entries", entries.len()),
//! });
//! ```

use crate::download::Materialized;
use crate::http::{HttpClientConfig, DEFAULT_USER_AGENT};
use crate::StyleOptions;

use reqwest::header::HeaderMap;
use std::sync::Arc;
use std::time::Duration;

/// Callback type for download completion events
pub type DownloadCallback = Box<dyn Fn(&Materialized) + Send + Sync>;

/// Configuration structure for the downloader
#[derive(Clone)]
pub struct DownloaderConfig {
    /// Number of retries per request.
    pub retries: u32,
    /// Optional proxy configuration.
    pub proxy: Option<reqwest::Proxy>,
    /// Custom HTTP headers sent with every request.
    pub headers: Option<HeaderMap>,
    /// `User-Agent` header value.
    pub user_agent: String,
    /// Total time allowed for one request, body included.
    pub timeout: Option<Duration>,
    /// Time allowed to establish a connection.
    pub connect_timeout: Option<Duration>,
    /// Maximum number of redirects followed.
    pub max_redirects: usize,
    /// Downloader style options.
    pub style_options: StyleOptions,
    /// Callback for when each download completes.
    pub on_complete: Option<Arc<DownloadCallback>>,
}

impl DownloaderConfig {
    /// Settings for the HTTP client shared by every download.
    pub fn http_client_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            retries: self.retries,
            proxy: self.proxy.clone(),
            headers: self.headers.clone(),
            user_agent: self.user_agent.clone(),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            max_redirects: self.max_redirects,
        }
    }
}

impl std::fmt::Debug for DownloaderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloaderConfig")
            .field("retries", &self.retries)
            .field("proxy", &self.proxy)
            .field("headers", &self.headers)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("max_redirects", &self.max_redirects)
            .field("style_options", &self.style_options)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            retries: 2,
            proxy: None,
            headers: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
            connect_timeout: None,
            max_redirects: 10,
            style_options: StyleOptions::default(),
            on_complete: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_client_config_mirrors_downloader_config() {
        let config = DownloaderConfig {
            retries: 7,
            max_redirects: 3,
            timeout: Some(Duration::from_secs(1)),
            ..DownloaderConfig::default()
        };

        let http = config.http_client_config();
        assert_eq!(http.retries, 7);
        assert_eq!(http.max_redirects, 3);
        assert_eq!(http.timeout, Some(Duration::from_secs(1)));
        assert_eq!(http.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_debug_hides_callback() {
        let config = DownloaderConfig {
            on_complete: Some(Arc::new(Box::new(|_: &Materialized| {}))),
            ..DownloaderConfig::default()
        };
        let debug = format!("{:?}", config);
        assert!(debug.contains("on_complete: true"));
    }
}
