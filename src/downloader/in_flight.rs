//! Handles on a running download.
//!
//! Every download runs as one background task that issues the request,
//! buffers the body and materializes it. [`InFlight`] exposes that single
//! task two ways: as a [`Stream`] of the body chunks as they arrive, and as
//! a future of the final [`Materialized`] result. [`InFlight::into_parts`]
//! splits the two so they can be consumed from different tasks.
//!
//! # Examples
//!
//! ```rust,no_run
//! use downl::downloader::DownloaderBuilder;
//! use downl::download::DownloadRequest;
//! use futures::StreamExt;
//! use std::convert::TryFrom;
//!
//! # async fn example() -> downl::Result<()> {
//! let downloader = DownloaderBuilder::hidden().build()?;
//! let request = DownloadRequest::try_from("https://example.com/file.bin")?;
//!
//! let (mut chunks, completion) = downloader.download(request).into_parts();
//! let counter = tokio::spawn(async move {
//!     let mut received = 0;
//!     while let Some(Ok(chunk)) = chunks.next().await {
//!         received += chunk.len();
//!     }
//!     received
//! });
//!
//! let result = completion.await?;
//! let received = counter.await.unwrap_or_default();
//! assert_eq!(result.bytes().map(|b| b.len()), Some(received));
//! # Ok(())
//! # }
//! ```

use crate::download::Materialized;
use crate::error::{Error, Result};

use bytes::Bytes;
use futures::Stream;
use std::fmt;
use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};

/// Sending half of the live chunk channel.
pub(crate) type ChunkSender = mpsc::UnboundedSender<Result<Bytes>>;

/// A running download, both a chunk stream and a future of its result.
///
/// Awaiting it (through [`IntoFuture`]) discards the stream side; polling it
/// as a [`Stream`] yields every body chunk from the first one, however late
/// polling starts. Dropping an `InFlight` does not cancel the download; use
/// [`InFlight::abort`] for that.
pub struct InFlight {
    stream: ByteStream,
    completion: Completion,
}

impl InFlight {
    /// Spawn `task` on the tokio runtime, handing it the chunk sender.
    ///
    /// When the task fails, its error is also delivered to the stream as a
    /// final [`Error::Stream`] item.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a tokio runtime.
    pub(crate) fn spawn<F, Fut>(task: F) -> Self
    where
        F: FnOnce(ChunkSender) -> Fut,
        Fut: Future<Output = Result<Materialized>> + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let work = task(tx.clone());

        let handle = tokio::spawn(async move {
            let result = work.await;
            if let Err(e) = &result {
                // The stream side may be gone already.
                let _ = tx.send(Err(Error::Stream(e.to_string())));
            }
            result
        });

        Self {
            stream: ByteStream { rx },
            completion: Completion { handle },
        }
    }

    /// Split into the chunk stream and the awaitable result.
    pub fn into_parts(self) -> (ByteStream, Completion) {
        (self.stream, self.completion)
    }

    /// Cancel the download.
    ///
    /// Files already written are left in place. Awaiting the result
    /// afterwards yields [`Error::Internal`].
    pub fn abort(&self) {
        self.completion.abort();
    }

    /// Whether the download task has finished.
    pub fn is_finished(&self) -> bool {
        self.completion.is_finished()
    }
}

impl fmt::Debug for InFlight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InFlight")
            .field("finished", &self.is_finished())
            .finish()
    }
}

impl Stream for InFlight {
    type Item = Result<Bytes>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.stream).poll_next(cx)
    }
}

impl IntoFuture for InFlight {
    type Output = Result<Materialized>;
    type IntoFuture = Completion;

    fn into_future(self) -> Self::IntoFuture {
        self.completion
    }
}

/// The live body chunks of a download.
///
/// Ends once the download task finishes. A failed download ends with one
/// [`Error::Stream`] item.
#[derive(Debug)]
pub struct ByteStream {
    rx: mpsc::UnboundedReceiver<Result<Bytes>>,
}

impl Stream for ByteStream {
    type Item = Result<Bytes>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

/// The final result of a download.
#[derive(Debug)]
pub struct Completion {
    handle: JoinHandle<Result<Materialized>>,
}

impl Completion {
    /// Cancel the download.
    pub fn abort(&self) {
        self.handle.abort();
    }

    /// Whether the download task has finished.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Future for Completion {
    type Output = Result<Materialized>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.handle)
            .poll(cx)
            .map(|joined| joined.unwrap_or_else(|e| Err(join_error(e))))
    }
}

fn join_error(e: JoinError) -> Error {
    if e.is_cancelled() {
        Error::Internal("download was aborted".into())
    } else {
        Error::Internal(format!("download task panicked: {}", e))
    }
}
