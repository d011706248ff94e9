//! Output filename resolution.

use super::content_disposition::parse_content_disposition;
use super::sanitize::sanitize_filename;
use crate::download::TransportResponse;
use crate::sniff::{extension_from_bytes, extension_from_mime};

use percent_encoding::percent_decode_str;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use std::path::Path;
use tracing::debug;

/// Name used when the URL path does not end with a segment.
pub const DEFAULT_FILENAME: &str = "download";

/// Decide the name a downloaded payload is saved under.
///
/// Sources are tried in order and the first that yields a name wins:
///
/// 1. `explicit`, the caller's choice;
/// 2. the `filename` of a `Content-Disposition` header;
/// 3. the last segment of the final (post-redirect) URL, completed with an
///    extension sniffed from `body` or, failing that, from `Content-Type`.
///
/// Whatever the source, the result is sanitized. This never fails; at worst
/// the name has no extension.
pub fn resolve_filename(
    response: &TransportResponse,
    body: &[u8],
    explicit: Option<&str>,
) -> String {
    let name = if let Some(explicit) = explicit {
        debug!(filename = explicit, "using explicit filename");
        explicit.to_string()
    } else if let Some(name) = filename_from_disposition(response) {
        debug!(filename = %name, "using Content-Disposition filename");
        name
    } else {
        filename_from_url(response, body)
    };

    let sanitized = sanitize_filename(&name);
    if sanitized.is_empty() {
        DEFAULT_FILENAME.to_string()
    } else {
        sanitized
    }
}

fn filename_from_disposition(response: &TransportResponse) -> Option<String> {
    let header = response.headers.get(CONTENT_DISPOSITION)?.to_str().ok()?;
    parse_content_disposition(header)
}

fn filename_from_url(response: &TransportResponse, body: &[u8]) -> String {
    let base = base_name(response);
    if Path::new(&base).extension().is_some() {
        debug!(filename = %base, "using URL filename");
        return base;
    }

    let ext = extension_from_bytes(body).or_else(|| {
        response
            .headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(extension_from_mime)
    });

    match ext {
        Some(ext) => {
            debug!(filename = %base, ext, "inferred extension");
            format!("{base}.{ext}")
        }
        None => {
            debug!(filename = %base, "no extension could be inferred");
            base
        }
    }
}

/// Last path segment of the final URL, percent-decoded.
fn base_name(response: &TransportResponse) -> String {
    response
        .final_url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty())
        .map(|segment| percent_decode_str(segment).decode_utf8_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_FILENAME.to_string())
}
