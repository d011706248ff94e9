//! Archive detection and extraction.
//!
//! A downloaded buffer is only extracted when [`sniff`] recognizes it. The
//! supported formats are zip, tar and gzip-compressed tar. Extraction either
//! stays in memory or writes the entries below a destination directory.
//!
//! # Examples
//!
//! ```rust,no_run
//! use downl::archive::{extract, sniff, ExtractOptions};
//!
//! # fn example(bytes: &[u8]) -> downl::Result<()> {
//! if sniff(bytes).is_some() {
//!     let entries = extract(bytes, None, &ExtractOptions::new().strip(1))?;
//!     for entry in entries {
//!         println!("{} ({} bytes)", entry.path.display(), entry.data.len());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod entry;
pub mod tar;
pub mod zip;

pub use entry::{ArchiveEntry, EntryFilter, EntryKind, ExtractOptions};

use crate::error::{Error, Result};
use crate::sniff::file_type::{is_tar_header, matches_at};

use flate2::read::GzDecoder;
use std::io::{Cursor, Read};
use std::path::Path;
use tracing::{debug, warn};

const GZIP_MAGIC: &[u8] = b"\x1f\x8b\x08";
const TAR_HEADER_SIZE: usize = 512;

/// Archive formats that can be extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    Zip,
    Tar,
    TarGz,
}

/// Report which archive format `bytes` holds, if any.
///
/// Gzip streams only count when the compressed payload starts with a tar
/// header; a gzipped single file is not an archive.
pub fn sniff(bytes: &[u8]) -> Option<ArchiveKind> {
    if zip::is_zip(bytes) {
        return Some(ArchiveKind::Zip);
    }
    if is_tar_header(bytes) {
        return Some(ArchiveKind::Tar);
    }
    if matches_at(bytes, 0, GZIP_MAGIC) {
        let mut head = Vec::with_capacity(TAR_HEADER_SIZE);
        let read = GzDecoder::new(bytes)
            .take(TAR_HEADER_SIZE as u64)
            .read_to_end(&mut head);
        if read.is_ok() && is_tar_header(&head) {
            return Some(ArchiveKind::TarGz);
        }
    }
    None
}

/// Decode the archive in `bytes` and return its entries.
///
/// With a `destination`, the directory is created if needed, every kept
/// entry is written below it and the returned paths point to the written
/// files. Without one, paths are relative to the archive root.
///
/// Fails with [`Error::Archive`] when `bytes` is not a recognized archive or
/// is malformed, and with [`Error::IOError`] when writing fails.
pub fn extract(
    bytes: &[u8],
    destination: Option<&Path>,
    options: &ExtractOptions,
) -> Result<Vec<ArchiveEntry>> {
    let kind = sniff(bytes).ok_or_else(|| Error::archive("payload is not a recognized archive"))?;
    debug!(?kind, size = bytes.len(), "extracting archive");

    let entries = match kind {
        ArchiveKind::Zip => zip::read_entries(bytes)?,
        ArchiveKind::Tar => tar::read_entries(Cursor::new(bytes))?,
        ArchiveKind::TarGz => tar::read_entries(GzDecoder::new(bytes))?,
    };

    let mut entries: Vec<ArchiveEntry> = entries
        .into_iter()
        .filter_map(|entry| entry.strip(options.strip))
        .filter(|entry| options.accepts(entry))
        .collect();

    if let Some(destination) = destination {
        entries = write_entries(destination, entries)?;
    }

    debug!(count = entries.len(), "archive extracted");
    Ok(entries)
}

fn write_entries(destination: &Path, mut entries: Vec<ArchiveEntry>) -> Result<Vec<ArchiveEntry>> {
    std::fs::create_dir_all(destination)?;
    let root = destination.canonicalize()?;
    let mut refused = vec![false; entries.len()];

    // Links last, so no file is ever written through one.
    for links in [false, true] {
        for (entry, refused) in entries.iter_mut().zip(refused.iter_mut()) {
            if (entry.kind == EntryKind::Symlink) != links {
                continue;
            }
            let target = destination.join(&entry.path);
            if !parent_within(&root, &target) {
                warn!(path = ?entry.path, "skipping archive entry that resolves outside the destination");
                *refused = true;
                continue;
            }
            match entry.kind {
                EntryKind::Directory => std::fs::create_dir_all(&target)?,
                EntryKind::File => {
                    if let Some(parent) = target.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&target, &entry.data)?;
                    set_mode(&target, entry.mode)?;
                }
                EntryKind::Symlink => {
                    if let Some(parent) = target.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    create_symlink(&entry.data, &target)?;
                }
            }
            entry.path = target;
        }
    }

    let mut refused = refused.into_iter();
    entries.retain(|_| !refused.next().unwrap_or(false));
    Ok(entries)
}

/// Whether the parent directory of `target` resolves below `root`.
///
/// The closest ancestor that exists is canonicalized, so a symlink planted
/// by an earlier entry cannot redirect a later one. Missing components are
/// created as plain directories afterwards.
fn parent_within(root: &Path, target: &Path) -> bool {
    target
        .parent()
        .and_then(|parent| parent.ancestors().find(|p| p.symlink_metadata().is_ok()))
        .and_then(|existing| existing.canonicalize().ok())
        .is_some_and(|resolved| resolved.starts_with(root))
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: Option<u32>) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    if let Some(mode) = mode {
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode & 0o777))?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: Option<u32>) -> Result<()> {
    Ok(())
}

#[cfg(unix)]
fn create_symlink(link: &[u8], target: &Path) -> Result<()> {
    let link = String::from_utf8_lossy(link);
    if target.symlink_metadata().is_ok() {
        std::fs::remove_file(target)?;
    }
    std::os::unix::fs::symlink(link.as_ref(), target)?;
    Ok(())
}

#[cfg(not(unix))]
fn create_symlink(_link: &[u8], target: &Path) -> Result<()> {
    warn!(?target, "symbolic links are not supported on this platform, skipping");
    Ok(())
}
