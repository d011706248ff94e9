//! Core downloader implementation with fetch logic.
//!
//! This module contains the main [`Downloader`] struct that runs a download
//! from request to materialized result: it issues the request, buffers the
//! body while forwarding its chunks, then either hands the buffer back,
//! writes it to disk or extracts it.
//!
//! # Examples
//!
//! ## Save to a Directory
//!
//! ```rust,no_run
//! use downl::downloader::DownloaderBuilder;
//! use downl::download::DownloadRequest;
//! use std::convert::TryFrom;
//!
//! # async fn example() -> downl::Result<()> {
//! let downloader = DownloaderBuilder::new().build()?;
//! let request = DownloadRequest::try_from("https://example.com/file1.zip")?.destination("downloads");
//!
//! let result = downloader.download(request).await?;
//! println!("Saved {:?}", result.file());
//! # Ok(())
//! # }
//! ```
//!
//! ## Extract an Archive
//!
//! ```rust,no_run
//! use downl::archive::ExtractOptions;
//! use downl::downloader::DownloaderBuilder;
//! use downl::download::DownloadRequest;
//! use std::convert::TryFrom;
//!
//! # async fn example() -> downl::Result<()> {
//! let downloader = DownloaderBuilder::hidden().build()?;
//! let request = DownloadRequest::try_from("https://example.com/release.tar.gz")?
//!     .destination("vendor")
//!     .extract(ExtractOptions::new().strip(1));
//!
//! for path in downloader.download(request).await?.paths() {
//!     println!("{}", path.display());
//! }
//! # Ok(())
//! # }
//! ```

use super::config::DownloaderConfig;
use super::in_flight::{ChunkSender, InFlight};
use super::DownloaderBuilder;
use crate::archive::{self, ArchiveEntry, ExtractOptions};
use crate::download::{DownloadOptions, DownloadRequest, Materialized, TransportResponse};
use crate::error::{Error, Result};
use crate::filename::resolve_filename;
use crate::http::{build_request, create_http_client};
use crate::progress::DownloadProgress;
use crate::utils::content_length::{buffer_capacity, expected_length};

use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use reqwest::header::HeaderMap;
use reqwest_middleware::ClientWithMiddleware;
use std::convert::TryFrom;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info};

/// Represents the download controller.
///
/// Holds the configuration and a pooled HTTP client; cloning is cheap and
/// clones share the connection pool.
///
/// A downloader can be created via its builder:
///
/// ```rust
/// # fn main() -> downl::Result<()> {
/// use downl::downloader::DownloaderBuilder;
///
/// let d = DownloaderBuilder::new().build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Downloader {
    config: Arc<DownloaderConfig>,
    client: ClientWithMiddleware,
}

impl fmt::Debug for Downloader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Downloader")
            .field("config", &self.config)
            .finish()
    }
}

impl Downloader {
    /// Creates a new Downloader with the given configuration.
    pub(crate) fn new(config: DownloaderConfig) -> Result<Self> {
        let client = create_http_client(config.http_client_config())?;
        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }

    /// Gets the number of retries per request.
    pub fn retries(&self) -> u32 {
        self.config.retries
    }

    /// Gets the custom headers.
    pub fn headers(&self) -> Option<&HeaderMap> {
        self.config.headers.as_ref()
    }

    /// Gets the `User-Agent` header value.
    pub fn user_agent(&self) -> &str {
        &self.config.user_agent
    }

    /// Gets the maximum number of redirects followed.
    pub fn max_redirects(&self) -> usize {
        self.config.max_redirects
    }

    /// Gets the underlying HTTP client.
    pub fn client(&self) -> &ClientWithMiddleware {
        &self.client
    }

    /// Starts a download.
    ///
    /// The returned [`InFlight`] can be awaited for the [`Materialized`]
    /// result, polled as a stream of body chunks, or split into both with
    /// [`InFlight::into_parts`].
    ///
    /// # Panics
    ///
    /// Panics when called outside of a tokio runtime.
    pub fn download(&self, request: DownloadRequest) -> InFlight {
        let client = self.client.clone();
        let config = Arc::clone(&self.config);

        InFlight::spawn(move |chunks| async move {
            let result = fetch(&client, &config, request, chunks).await?;

            if let Some(ref callback) = config.on_complete {
                callback(&result);
            }

            Ok(result)
        })
    }
}

/// Download `url`, saving or extracting into `destination` when given.
///
/// Uses a downloader with default settings and no progress output. Build a
/// [`Downloader`] once instead when downloading repeatedly, so connections
/// are reused.
///
/// ```rust,no_run
/// use downl::{download, DownloadOptions};
///
/// # async fn example() -> downl::Result<()> {
/// let bytes = download("https://example.com/data.json", None, DownloadOptions::default())?.await?;
/// # Ok(())
/// # }
/// ```
pub fn download(url: &str, destination: Option<&Path>, options: DownloadOptions) -> Result<InFlight> {
    let parsed = DownloadRequest::try_from(url)?;
    let request =
        DownloadRequest::with_options(&parsed.url, destination.map(Path::to_path_buf), options);

    let downloader = DownloaderBuilder::hidden().build()?;
    Ok(downloader.download(request))
}

/// Fetches the resource and materializes it.
async fn fetch(
    client: &ClientWithMiddleware,
    config: &DownloaderConfig,
    request: DownloadRequest,
    chunks: ChunkSender,
) -> Result<Materialized> {
    debug!(url = %request.url, "Fetching");
    let res = build_request(client, &request.url, &request.transport)
        .send()
        .await?;
    let response = TransportResponse::from(&res);

    // Check the status for errors.
    let status = res.status();
    if !status.is_success() {
        return Err(Error::Status {
            status,
            url: response.final_url,
        });
    }
    if response.final_url != request.url {
        debug!(final_url = %response.final_url, "Followed redirects");
    }

    let expected = expected_length(&response.headers);
    let progress = DownloadProgress::start(
        &config.style_options,
        expected,
        response.final_url.as_str(),
    );

    // Buffer the body chunk by chunk, forwarding every chunk as it arrives.
    debug!(?expected, "Retrieving chunks...");
    let mut body = BytesMut::with_capacity(buffer_capacity(expected));
    let mut stream = res.bytes_stream();
    while let Some(item) = stream.next().await {
        let chunk = match item {
            Ok(chunk) => chunk,
            Err(e) => {
                progress.abandon();
                return Err(e.into());
            }
        };
        progress.inc(chunk.len() as u64);
        body.extend_from_slice(&chunk);
        // Nobody may be listening.
        let _ = chunks.send(Ok(chunk));
    }
    progress.finish();

    let body = body.freeze();
    debug!(size = body.len(), "Body received");

    materialize(request, &response, body).await
}

/// Turns the buffered body into the result the request asked for.
async fn materialize(
    request: DownloadRequest,
    response: &TransportResponse,
    body: Bytes,
) -> Result<Materialized> {
    let kind = match request.extract {
        Some(_) => archive::sniff(&body),
        None => None,
    };

    match (request.destination, request.extract, kind) {
        (destination, Some(options), Some(kind)) => {
            info!(?kind, ?destination, "Extracting archive");
            let entries = extract(body, destination, options).await?;
            info!(count = entries.len(), "Archive extracted");
            Ok(Materialized::Extracted(entries))
        }
        (None, extract, _) => {
            if extract.is_some() {
                debug!("Payload is not an archive, returning it as-is");
            }
            Ok(Materialized::Bytes(body))
        }
        (Some(destination), extract, _) => {
            if extract.is_some() {
                debug!("Payload is not an archive, saving it as-is");
            }
            let filename = resolve_filename(response, &body, request.filename.as_deref());

            debug!("Creating destination directory {:?}", destination);
            fs::create_dir_all(&destination).await?;

            let path = destination.join(filename);
            debug!("Writing {:?}", path);
            fs::write(&path, &body).await?;

            info!(path = ?path, size = body.len(), "Download saved");
            Ok(Materialized::File(path))
        }
    }
}

/// Runs archive extraction on the blocking thread pool.
async fn extract(
    body: Bytes,
    destination: Option<PathBuf>,
    options: ExtractOptions,
) -> Result<Vec<ArchiveEntry>> {
    tokio::task::spawn_blocking(move || archive::extract(&body, destination.as_deref(), &options))
        .await
        .map_err(|e| Error::Internal(format!("extraction task failed: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderValue, CONTENT_DISPOSITION};
    use reqwest::Url;

    fn response(url: &str) -> TransportResponse {
        TransportResponse::new(Url::parse(url).unwrap(), HeaderMap::new())
    }

    fn zip_bytes() -> Bytes {
        let mut writer = ::zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
        writer
            .start_file("inner.txt", ::zip::write::FileOptions::default())
            .unwrap();
        std::io::Write::write_all(&mut writer, b"inner").unwrap();
        Bytes::from(writer.finish().unwrap().into_inner())
    }

    #[tokio::test]
    async fn test_materialize_in_memory() {
        let request = DownloadRequest::try_from("http://foo.bar/file").unwrap();
        let result = materialize(request, &response("http://foo.bar/file"), Bytes::from_static(b"x"))
            .await
            .unwrap();
        assert_eq!(result.into_bytes(), Some(Bytes::from_static(b"x")));
    }

    #[tokio::test]
    async fn test_materialize_extract_is_advisory() {
        let request = DownloadRequest::try_from("http://foo.bar/file")
            .unwrap()
            .extract(ExtractOptions::new());
        let result = materialize(request, &response("http://foo.bar/file"), Bytes::from_static(b"plain"))
            .await
            .unwrap();
        assert!(result.bytes().is_some());
    }

    #[tokio::test]
    async fn test_materialize_extract_in_memory() {
        let request = DownloadRequest::try_from("http://foo.bar/a.zip")
            .unwrap()
            .extract(ExtractOptions::new());
        let result = materialize(request, &response("http://foo.bar/a.zip"), zip_bytes())
            .await
            .unwrap();

        let entries = result.entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path, PathBuf::from("inner.txt"));
        assert_eq!(entries[0].data.as_ref(), b"inner");
    }

    #[tokio::test]
    async fn test_materialize_save_uses_resolved_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_DISPOSITION,
            HeaderValue::from_static("attachment; filename=\"named.txt\""),
        );
        let response = TransportResponse::new(Url::parse("http://foo.bar/file").unwrap(), headers);
        let request = DownloadRequest::try_from("http://foo.bar/file")
            .unwrap()
            .destination(dir.path().join("nested"));

        let result = materialize(request, &response, Bytes::from_static(b"content"))
            .await
            .unwrap();

        let path = result.file().unwrap();
        assert_eq!(path, dir.path().join("nested").join("named.txt"));
        assert_eq!(std::fs::read(path).unwrap(), b"content");
    }
}
