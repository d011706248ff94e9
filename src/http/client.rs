//! HTTP client setup and middleware configuration.
//!
//! The client is the transport every download goes through. It follows
//! redirects (including http to https) up to a limit, retries transient
//! failures with exponential backoff and traces every request.
//!
//! # Examples
//!
//! ```rust
//! use downl::http::{create_http_client, HttpClientConfig};
//! use reqwest::header::{HeaderMap, ACCEPT};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut headers = HeaderMap::new();
//! headers.insert(ACCEPT, "*/*".parse()?);
//!
//! let config = HttpClientConfig {
//!     retries: 5,
//!     headers: Some(headers),
//!     ..HttpClientConfig::default()
//! };
//!
//! let client = create_http_client(config)?;
//! # Ok(())
//! # }
//! ```

use crate::download::TransportOptions;

use reqwest::{header::HeaderMap, redirect, Proxy, Url};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, RequestBuilder};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use reqwest_tracing::TracingMiddleware;
use std::time::Duration;

/// Default `User-Agent` sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Configuration for HTTP client setup.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Number of retries for transient failures.
    pub retries: u32,
    /// Optional proxy configuration.
    pub proxy: Option<Proxy>,
    /// Default headers to include with all requests.
    pub headers: Option<HeaderMap>,
    /// `User-Agent` header value.
    pub user_agent: String,
    /// Total time allowed for a request, body included.
    pub timeout: Option<Duration>,
    /// Time allowed to establish a connection.
    pub connect_timeout: Option<Duration>,
    /// Maximum number of redirects followed.
    pub max_redirects: usize,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            retries: 2,
            proxy: None,
            headers: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
            connect_timeout: None,
            max_redirects: 10,
        }
    }
}

/// Creates an HTTP client with middleware configuration.
///
/// This function sets up a reqwest client with:
/// - Tracing middleware for request/response logging
/// - Retry middleware with exponential backoff
/// - A bounded redirect policy
/// - Optional proxy, default headers and timeouts
pub fn create_http_client(
    config: HttpClientConfig,
) -> Result<ClientWithMiddleware, reqwest::Error> {
    let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.retries);

    let mut inner_client_builder = reqwest::Client::builder()
        .user_agent(config.user_agent)
        .redirect(redirect::Policy::limited(config.max_redirects));

    if let Some(proxy) = config.proxy {
        inner_client_builder = inner_client_builder.proxy(proxy);
    }

    if let Some(headers) = config.headers {
        inner_client_builder = inner_client_builder.default_headers(headers);
    }

    if let Some(timeout) = config.timeout {
        inner_client_builder = inner_client_builder.timeout(timeout);
    }

    if let Some(connect_timeout) = config.connect_timeout {
        inner_client_builder = inner_client_builder.connect_timeout(connect_timeout);
    }

    let inner_client = inner_client_builder.build()?;

    let client = ClientBuilder::new(inner_client)
        // Trace HTTP requests. See the tracing crate to make use of these traces.
        .with(TracingMiddleware::default())
        // Retry failed requests.
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build();

    Ok(client)
}

/// Prepare a GET request for `url` carrying the per-request options.
pub fn build_request(
    client: &ClientWithMiddleware,
    url: &Url,
    options: &TransportOptions,
) -> RequestBuilder {
    let mut req = client.get(url.clone());
    if !options.headers.is_empty() {
        req = req.headers(options.headers.clone());
    }
    if !options.query.is_empty() {
        req = req.query(&options.query);
    }
    if let Some(timeout) = options.timeout {
        req = req.timeout(timeout);
    }
    req
}
