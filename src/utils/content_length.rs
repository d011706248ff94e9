//! Content length extraction utilities.
//!
//! This module provides utilities for working out how large a response body
//! is going to be, supporting both Content-Range and Content-Length headers.

use reqwest::header::{HeaderMap, CONTENT_LENGTH, CONTENT_RANGE};

/// Expected body length announced by the response headers.
///
/// The total of a `Content-Range` header wins over `Content-Length`, since a
/// partial response only announces the size of the part it carries.
///
/// # Example
///
/// ```rust
/// use downl::utils::expected_length;
/// use reqwest::header::{HeaderMap, HeaderValue, CONTENT_LENGTH};
///
/// let mut headers = HeaderMap::new();
/// headers.insert(CONTENT_LENGTH, HeaderValue::from_static("2048"));
/// assert_eq!(expected_length(&headers), Some(2048));
/// ```
pub fn expected_length(headers: &HeaderMap) -> Option<u64> {
    if let Some(total) = headers
        .get(CONTENT_RANGE)
        .and_then(|range| range.to_str().ok())
        .and_then(parse_content_range_total)
    {
        return Some(total);
    }

    headers
        .get(CONTENT_LENGTH)
        .and_then(|length| length.to_str().ok())
        .and_then(|length| length.trim().parse::<u64>().ok())
}

/// Parse Content-Range header to extract total size.
///
/// Content-Range header format: "bytes start-end/total"
/// This function extracts the total size from the header. An unknown total
/// (`*`) yields `None`.
///
/// # Example
///
/// ```rust
/// use downl::utils::parse_content_range_total;
///
/// let total = parse_content_range_total("bytes 0-1023/2048");
/// assert_eq!(total, Some(2048));
/// ```
pub fn parse_content_range_total(content_range: &str) -> Option<u64> {
    let (_, total) = content_range.rsplit_once('/')?;
    total.trim().parse::<u64>().ok()
}

/// Initial buffer capacity for a body of the given expected length.
///
/// Capped so that a lying header cannot make us reserve gigabytes up front.
pub(crate) fn buffer_capacity(expected: Option<u64>) -> usize {
    const MAX_PREALLOCATION: u64 = 64 * 1024 * 1024;
    const DEFAULT_CAPACITY: usize = 8 * 1024;

    match expected {
        Some(len) => usize::try_from(len.min(MAX_PREALLOCATION)).unwrap_or(DEFAULT_CAPACITY),
        None => DEFAULT_CAPACITY,
    }
}
