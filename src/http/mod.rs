//! HTTP module containing HTTP client functionality.
//!
//! This module provides HTTP client setup and the request assembly used by
//! the downloader. It handles client creation with retry logic, tracing,
//! redirects and proxy support.
//!
//! - [`client`] - HTTP client creation and middleware configuration

pub mod client;

pub use client::{build_request, create_http_client, HttpClientConfig, DEFAULT_USER_AGENT};
