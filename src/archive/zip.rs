//! ZIP extraction from an in-memory buffer.

use super::entry::{ArchiveEntry, EntryKind};
use crate::error::{Error, Result};
use crate::utils::content_length::buffer_capacity;
use crate::sniff::file_type::matches_at;

use bytes::Bytes;
use std::io::{Cursor, Read};
use tracing::warn;

const LOCAL_HEADER_SIGNATURE: &[u8; 4] = b"\x50\x4b\x03\x04";
const EOCD_SIGNATURE: &[u8; 4] = b"\x50\x4b\x05\x06";
const SPANNED_SIGNATURE: &[u8; 4] = b"\x50\x4b\x07\x08";

const S_IFMT: u32 = 0o170000;
const S_IFLNK: u32 = 0o120000;

/// Whether `bytes` starts like a ZIP archive (including an empty one).
pub fn is_zip(bytes: &[u8]) -> bool {
    [LOCAL_HEADER_SIGNATURE, EOCD_SIGNATURE, SPANNED_SIGNATURE]
        .iter()
        .any(|sig| matches_at(bytes, 0, *sig))
}

/// Read every entry of the ZIP archive held in `bytes`.
pub(crate) fn read_entries(bytes: &[u8]) -> Result<Vec<ArchiveEntry>> {
    let mut archive = ::zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| Error::archive_with("Failed to open ZIP archive", e))?;
    let mut entries = Vec::with_capacity(archive.len());

    for index in 0..archive.len() {
        let mut file = archive
            .by_index(index)
            .map_err(|e| Error::archive_with("Failed to read ZIP entry", e))?;

        let name = file.name().to_string();
        let Some(path) = file.enclosed_name().map(|p| p.to_path_buf()) else {
            warn!(name = %name, "skipping ZIP entry with unsafe path");
            continue;
        };

        let mode = file.unix_mode();
        let kind = if file.is_dir() {
            EntryKind::Directory
        } else if mode.is_some_and(|m| m & S_IFMT == S_IFLNK) {
            EntryKind::Symlink
        } else {
            EntryKind::File
        };

        let mut data = Vec::with_capacity(buffer_capacity(Some(file.size())));
        file.read_to_end(&mut data)
            .map_err(|e| Error::archive_with(format!("Failed to read ZIP entry {name}"), e))?;

        match ArchiveEntry::new(&path, kind, Bytes::from(data), mode) {
            Some(entry) => entries.push(entry),
            None => warn!(name = %name, "skipping ZIP entry with unsafe path"),
        }
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::Path;
    use ::zip::write::FileOptions;

    fn zip_bytes(files: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = ::zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, data) in files {
            if name.ends_with('/') {
                writer.add_directory(*name, FileOptions::default()).unwrap();
            } else {
                writer.start_file(*name, FileOptions::default()).unwrap();
                writer.write_all(data.as_bytes()).unwrap();
            }
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_is_zip() {
        assert!(is_zip(&zip_bytes(&[("file.txt", "x")])));
        assert!(is_zip(&zip_bytes(&[])));
        assert!(!is_zip(b"PK"));
        assert!(!is_zip(b"%PDF"));
    }

    #[test]
    fn test_read_entries() {
        let bytes = zip_bytes(&[("dir/", ""), ("dir/file.txt", "unicorn")]);
        let entries = read_entries(&bytes).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].kind, EntryKind::Directory);
        assert_eq!(entries[0].path, Path::new("dir"));
        assert_eq!(entries[1].kind, EntryKind::File);
        assert_eq!(entries[1].path, Path::new("dir/file.txt"));
        assert_eq!(&entries[1].data[..], b"unicorn");
    }

    #[test]
    fn test_corrupt_archive() {
        let mut bytes = zip_bytes(&[("file.txt", "content")]);
        bytes.truncate(20);
        assert!(is_zip(&bytes));
        assert!(matches!(read_entries(&bytes), Err(Error::Archive { .. })));
    }
}
