//! The parts of an HTTP response the core looks at.

use reqwest::header::HeaderMap;
use reqwest::{Response, Url};

/// Final URL and headers of a completed request.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// URL after every redirect was followed.
    pub final_url: Url,
    /// Response headers.
    pub headers: HeaderMap,
}

impl TransportResponse {
    /// Creates a [`TransportResponse`] from a final URL and its headers.
    pub fn new(final_url: Url, headers: HeaderMap) -> Self {
        Self { final_url, headers }
    }
}

impl From<&Response> for TransportResponse {
    fn from(response: &Response) -> Self {
        Self {
            final_url: response.url().clone(),
            headers: response.headers().clone(),
        }
    }
}
