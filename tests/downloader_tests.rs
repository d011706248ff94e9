//! Tests for the downloader module functionality.
//!
//! This file contains all tests for the downloader module, including tests for:
//! - Core Downloader functionality
//! - DownloaderBuilder pattern
//! - DownloaderConfig

use downl::downloader::{DownloaderBuilder, DownloaderConfig};
use downl::http::DEFAULT_USER_AGENT;

use reqwest::header::{HeaderValue, USER_AGENT};
use std::time::Duration;

mod common;
use common::helpers::*;

#[test]
fn test_builder_defaults() {
    let downloader = DownloaderBuilder::new().build().unwrap();

    assert_eq!(downloader.retries(), 2);
    assert_eq!(downloader.max_redirects(), 10);
    assert_eq!(downloader.user_agent(), DEFAULT_USER_AGENT);
    assert!(downloader.headers().is_none());
}

#[test]
fn test_builder_configuration() {
    let downloader = DownloaderBuilder::new()
        .retries(5)
        .max_redirects(1)
        .user_agent("configured-agent")
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(3))
        .build()
        .unwrap();

    assert_eq!(downloader.retries(), 5);
    assert_eq!(downloader.max_redirects(), 1);
    assert_eq!(downloader.user_agent(), "configured-agent");
}

#[test]
fn test_builder_headers() {
    let headers = create_test_headers();
    let downloader = DownloaderBuilder::new()
        .headers(headers.clone())
        .build()
        .unwrap();

    assert!(downloader.headers().is_some());
    assert_eq!(
        downloader.headers().unwrap().get(USER_AGENT),
        Some(&HeaderValue::from_static(TEST_USER_AGENT))
    );
}

#[test]
fn test_builder_single_header() {
    let downloader = DownloaderBuilder::new()
        .header(USER_AGENT, HeaderValue::from_static("single-test-agent"))
        .build()
        .unwrap();

    assert_eq!(
        downloader.headers().unwrap().get(USER_AGENT),
        Some(&HeaderValue::from_static("single-test-agent"))
    );
}

#[test]
fn test_builder_headers_merge() {
    let downloader = DownloaderBuilder::new()
        .headers(create_test_headers_with_agent("first"))
        .header("x-extra", HeaderValue::from_static("1"))
        .build()
        .unwrap();

    let headers = downloader.headers().unwrap();
    assert_eq!(headers.get(USER_AGENT).unwrap(), "first");
    assert_eq!(headers.get("x-extra").unwrap(), "1");
}

#[test]
fn test_builder_hidden() {
    let downloader = DownloaderBuilder::hidden().build().unwrap();
    assert_eq!(downloader.retries(), 2);
}

#[test]
fn test_builder_proxy() {
    let proxy = reqwest::Proxy::all("http://127.0.0.1:3128").unwrap();
    assert!(DownloaderBuilder::new().proxy(proxy).build().is_ok());
}

#[test]
fn test_downloader_debug() {
    let downloader = DownloaderBuilder::new().build().unwrap();
    let debug_str = format!("{:?}", downloader);

    assert!(debug_str.contains("Downloader"));
    assert!(debug_str.contains("config"));
}

#[test]
fn test_downloader_clone() {
    let downloader = DownloaderBuilder::new().retries(4).build().unwrap();
    let cloned = downloader.clone();

    assert_eq!(downloader.retries(), cloned.retries());
    assert_eq!(downloader.max_redirects(), cloned.max_redirects());
}

#[test]
fn test_downloader_config_default() {
    let config = DownloaderConfig::default();

    assert_eq!(config.retries, 2);
    assert!(config.proxy.is_none());
    assert!(config.on_complete.is_none());
    assert!(config.style_options.is_enabled());
}

#[tokio::test]
async fn test_builder_user_agent_is_sent() {
    let server = wiremock::MockServer::start().await;
    wiremock::Mock::given(wiremock::matchers::header("user-agent", "configured-agent"))
        .respond_with(wiremock::ResponseTemplate::new(200).set_body_bytes(b"ok".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let downloader = DownloaderBuilder::hidden()
        .user_agent("configured-agent")
        .build()
        .unwrap();
    let request = downl::DownloadRequest::try_from(mock_url(&server, "/ua").as_str()).unwrap();

    let result = downloader.download(request).await.unwrap();
    assert!(result.bytes().is_some());
}
