//! Tests for utils module functionality.

use downl::utils::{expected_length, parse_content_range_total};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_LENGTH, CONTENT_RANGE};

mod common;
use common::helpers::*;

#[test]
fn test_parse_content_range_total() {
    let test_cases = [
        ("bytes 0-1023/2048", Some(2048)),
        ("bytes 200-1023/5000", Some(5000)),
        ("bytes 0-0/1", Some(1)),
        ("bytes */4096", Some(4096)),
        ("bytes 0-1023/*", None),
        ("invalid", None),
        ("bytes 0-1023", None),
        ("", None),
    ];
    for (header, expected) in test_cases {
        assert_eq!(parse_content_range_total(header), expected, "header: {header:?}");
    }
}

#[test]
fn test_expected_length_from_headers() {
    let mut headers = HeaderMap::new();
    assert_eq!(expected_length(&headers), None);

    headers.insert(CONTENT_LENGTH, HeaderValue::from_static("512"));
    assert_eq!(expected_length(&headers), Some(512));

    headers.insert(CONTENT_RANGE, HeaderValue::from_static("bytes 0-511/2048"));
    assert_eq!(expected_length(&headers), Some(2048));
}

#[tokio::test]
async fn test_expected_length_of_a_real_response() {
    let content = create_test_content(1024);
    let server = setup_mock_file("/sized", &content).await;

    let response = reqwest::get(mock_url(&server, "/sized")).await.unwrap();
    assert_eq!(expected_length(response.headers()), Some(1024));
}
