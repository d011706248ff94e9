//! Error handling for the downl library.
//!
//! Every failure surfaced by a download is one of the [`Error`] variants.
//! Transport, status, filesystem and extraction failures are propagated
//! as-is; nothing here is retried.

use reqwest::{StatusCode, Url};
use std::io;
use thiserror::Error;

/// Errors that can happen when using downl.
#[derive(Error, Debug)]
pub enum Error {
    /// Error from an underlying system.
    ///
    /// Raised when the background download task panicked or was aborted.
    #[error("Internal error: {0}")]
    Internal(String),

    /// Error from the underlying URL parser or the expected URL format.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// I/O Error.
    ///
    /// Directory creation, file writes and archive entry writes end up here.
    /// Nothing already written is rolled back.
    #[error("I/O error")]
    IOError {
        #[from]
        source: io::Error,
    },

    /// Error from the Reqwest library.
    ///
    /// Network failures (DNS, connection, timeouts) and body read errors.
    #[error("Reqwest Error")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },

    /// Error raised by the middleware stack wrapping the HTTP client.
    #[error("Request failed: {source}")]
    Middleware {
        #[from]
        source: reqwest_middleware::Error,
    },

    /// The server answered with a non-success status.
    ///
    /// The message mirrors the usual HTTP wording, e.g.
    /// `Response code 404 (Not Found)`.
    #[error("Response code {} ({}) for {url}", .status.as_u16(), .status.canonical_reason().unwrap_or("Unknown"))]
    Status { status: StatusCode, url: Url },

    /// The payload was sniffed as an archive but could not be decoded.
    #[error("Archive error: {message}")]
    Archive {
        message: String,
        #[source]
        cause: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The live byte stream ended because the download failed.
    ///
    /// The awaitable side of the download resolves to the original error.
    #[error("Download stream failed: {0}")]
    Stream(String),
}

impl Error {
    pub(crate) fn archive(message: impl Into<String>) -> Self {
        Error::Archive {
            message: message.into(),
            cause: None,
        }
    }

    pub(crate) fn archive_with<E>(message: impl Into<String>, cause: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Archive {
            message: message.into(),
            cause: Some(Box::new(cause)),
        }
    }

    /// The HTTP status attached to this error, if the server answered.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Status { status, .. } => Some(*status),
            Error::Reqwest { source } => source.status(),
            Error::Middleware { source } => source.status(),
            _ => None,
        }
    }
}

/// Result type alias for operations that can fail with a downl error.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_has_code_and_reason() {
        let err = Error::Status {
            status: StatusCode::NOT_FOUND,
            url: Url::parse("http://foo.bar/404").unwrap(),
        };
        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("Not Found"));
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }

    #[test]
    fn test_archive_error_keeps_cause() {
        let cause = io::Error::new(io::ErrorKind::InvalidData, "truncated");
        let err = Error::archive_with("bad zip", cause);
        assert_eq!(err.to_string(), "Archive error: bad zip");
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.status().is_none());
    }
}
