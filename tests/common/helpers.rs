use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use downl::progress::{ProgressBarOpts, StyleOptions};
use downl::{Downloader, DownloaderBuilder, HttpClientConfig};
use flate2::{write::GzEncoder, Compression};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// Common test constants
pub const TEST_DOMAIN: &str = "http://domain.com/file.zip";
pub const TEST_USER_AGENT: &str = "downl-test-agent";

/// Surface library logs when `RUST_LOG` is set.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Creates a temporary directory for testing purposes
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Creates test file content of specified size
pub fn create_test_content(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 251) as u8).collect()
}

/// Asserts that a file exists at the given path
pub fn assert_file_exists(path: &Path) {
    assert!(path.exists(), "File should exist at path: {:?}", path);
}

/// Asserts that a file holds exactly the expected bytes
pub fn assert_file_content(path: &Path, expected: &[u8]) {
    let content = fs::read(path).expect("Failed to read file");
    assert_eq!(content, expected, "File content mismatch at path: {:?}", path);
}

/// File names directly inside `dir`, sorted
pub fn list_dir(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("Failed to read directory")
        .map(|e| e.expect("Failed to read entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

// === Mock Server Helpers ===

/// Starts a mock server answering `GET path_str` with `response`
pub async fn setup_mock(path_str: &str, response: ResponseTemplate) -> MockServer {
    let mock_server = MockServer::start().await;
    mount(&mock_server, path_str, response).await;
    mock_server
}

/// Starts a mock server serving `content` at `path_str`
pub async fn setup_mock_file(path_str: &str, content: &[u8]) -> MockServer {
    setup_mock(path_str, ResponseTemplate::new(200).set_body_bytes(content.to_vec())).await
}

/// Adds a `GET path_str` route to an existing server
pub async fn mount(server: &MockServer, path_str: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(path_str))
        .respond_with(response)
        .mount(server)
        .await;
}

/// Full URL of `path_str` on the mock server
pub fn mock_url(server: &MockServer, path_str: &str) -> String {
    format!("{}{}", server.uri(), path_str)
}

// === Archive Fixtures ===

/// Builds a zip archive; names ending in `/` become directories
pub fn zip_fixture(files: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, data) in files {
        if name.ends_with('/') {
            writer
                .add_directory(*name, zip::write::FileOptions::default())
                .expect("Failed to add zip directory");
        } else {
            writer
                .start_file(*name, zip::write::FileOptions::default())
                .expect("Failed to start zip entry");
            writer.write_all(data.as_bytes()).expect("Failed to write zip entry");
        }
    }
    writer.finish().expect("Failed to finish zip").into_inner()
}

/// Builds a tar archive of regular files
pub fn tar_fixture(files: &[(&str, &str)]) -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());
    for (name, data) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, name, data.as_bytes())
            .expect("Failed to append tar entry");
    }
    builder.into_inner().expect("Failed to finish tar")
}

/// Builds a gzip-compressed tar archive of regular files
pub fn tar_gz_fixture(files: &[(&str, &str)]) -> Vec<u8> {
    gzip(&tar_fixture(files))
}

/// Gzip-compresses `bytes`
pub fn gzip(bytes: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes).expect("Failed to gzip");
    encoder.finish().expect("Failed to finish gzip")
}

// === HTTP Configuration Helpers ===

/// Creates test headers with common user agent
pub fn create_test_headers() -> HeaderMap {
    create_test_headers_with_agent(TEST_USER_AGENT)
}

/// Creates test headers with custom user agent
pub fn create_test_headers_with_agent(agent: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_str(agent).expect("Invalid header value"));
    headers
}

/// Creates a test HTTP client configuration with custom retries
pub fn create_test_http_config_with_retries(retries: u32) -> HttpClientConfig {
    HttpClientConfig {
        retries,
        headers: Some(create_test_headers()),
        ..HttpClientConfig::default()
    }
}

// === Progress Bar Helpers ===

/// Creates default test progress bar options
pub fn create_test_progress_opts() -> ProgressBarOpts {
    ProgressBarOpts::new(None, None, true, false)
}

/// Creates custom progress bar options with template and chars
pub fn create_custom_progress_opts(template: &str, chars: &str) -> ProgressBarOpts {
    ProgressBarOpts::new(Some(template.to_string()), Some(chars.to_string()), true, false)
}

/// Creates default test style options
pub fn create_test_style_options() -> StyleOptions {
    StyleOptions::new(create_test_progress_opts(), ProgressBarOpts::spinner())
}

/// Asserts that progress bar options are configured correctly
pub fn assert_progress_opts_enabled(opts: &ProgressBarOpts) {
    assert!(opts.is_enabled(), "Progress bar should be enabled");
    let pb = opts.clone().to_progress_bar(Some(100));
    assert_eq!(pb.length(), Some(100));
}

/// Asserts that progress bar options are disabled
pub fn assert_progress_opts_disabled(opts: &ProgressBarOpts) {
    let pb = opts.clone().to_progress_bar(Some(100));
    assert!(pb.is_hidden(), "Progress bar should be disabled");
}

// === Downloader Helpers ===

/// A downloader that draws nothing and does not retry
pub fn hidden_downloader() -> Downloader {
    DownloaderBuilder::hidden()
        .retries(0)
        .build()
        .expect("Failed to build downloader")
}

/// Path of `name` inside the temporary directory
pub fn temp_path(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}
