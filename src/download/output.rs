//! Materialized download results.

use crate::archive::ArchiveEntry;

use bytes::Bytes;
use std::path::{Path, PathBuf};

/// The final form of a download.
///
/// Exactly one variant is produced per request.
#[derive(Debug, Clone)]
pub enum Materialized {
    /// No destination was given: the raw payload.
    Bytes(Bytes),
    /// The payload was written to this file.
    File(PathBuf),
    /// The payload was an archive and these entries were extracted.
    ///
    /// Entry paths are on-disk paths when a destination was given and
    /// archive-relative otherwise.
    Extracted(Vec<ArchiveEntry>),
}

impl Materialized {
    /// The in-memory payload, if nothing was written.
    pub fn bytes(&self) -> Option<&Bytes> {
        match self {
            Materialized::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// The written file, if the payload was saved as-is.
    pub fn file(&self) -> Option<&Path> {
        match self {
            Materialized::File(path) => Some(path),
            _ => None,
        }
    }

    /// The extracted entries, if the payload was an archive.
    pub fn entries(&self) -> Option<&[ArchiveEntry]> {
        match self {
            Materialized::Extracted(entries) => Some(entries),
            _ => None,
        }
    }

    /// Every path this download wrote to (empty for in-memory results).
    pub fn paths(&self) -> Vec<&Path> {
        match self {
            Materialized::Bytes(_) => Vec::new(),
            Materialized::File(path) => vec![path.as_path()],
            Materialized::Extracted(entries) => entries.iter().map(|e| e.path.as_path()).collect(),
        }
    }

    /// Consume the result, returning the raw payload if there is one.
    pub fn into_bytes(self) -> Option<Bytes> {
        match self {
            Materialized::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }
}
