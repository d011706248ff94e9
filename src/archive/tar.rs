//! Tar (and gzip-compressed tar) extraction.

use super::entry::{ArchiveEntry, EntryKind};
use crate::error::{Error, Result};
use crate::utils::content_length::buffer_capacity;

use bytes::Bytes;
use std::io::Read;
use tracing::warn;

/// Read every file, directory and symlink entry of a tar stream.
///
/// Other entry types (hard links, devices, fifos) are skipped.
pub(crate) fn read_entries<R: Read>(reader: R) -> Result<Vec<ArchiveEntry>> {
    let mut archive = ::tar::Archive::new(reader);
    let mut entries = Vec::new();

    let iter = archive
        .entries()
        .map_err(|e| Error::archive_with("Failed to read tar archive", e))?;

    for entry in iter {
        let mut entry = entry.map_err(|e| Error::archive_with("Failed to read tar entry", e))?;
        let entry_type = entry.header().entry_type();

        let kind = if entry_type.is_dir() {
            EntryKind::Directory
        } else if entry_type.is_symlink() {
            EntryKind::Symlink
        } else if entry_type.is_file() {
            EntryKind::File
        } else {
            continue;
        };

        let path = entry
            .path()
            .map_err(|e| Error::archive_with("Invalid tar entry path", e))?
            .into_owned();
        let mode = entry.header().mode().ok();

        let data = match kind {
            EntryKind::Directory => Bytes::new(),
            EntryKind::Symlink => entry
                .link_name()
                .map_err(|e| Error::archive_with("Invalid tar link name", e))?
                .map(|link| Bytes::from(link.to_string_lossy().into_owned()))
                .unwrap_or_default(),
            EntryKind::File => {
                let size = entry.size();
                // The declared size is untrusted until the data is read.
                let mut data = Vec::with_capacity(buffer_capacity(Some(size)));
                entry.read_to_end(&mut data).map_err(|e| {
                    Error::archive_with(format!("Failed to read tar entry {}", path.display()), e)
                })?;
                if data.len() as u64 != size {
                    return Err(Error::archive(format!(
                        "Tar entry {} is truncated",
                        path.display()
                    )));
                }
                Bytes::from(data)
            }
        };

        match ArchiveEntry::new(&path, kind, data, mode) {
            Some(entry) => entries.push(entry),
            None => warn!(?path, "skipping tar entry with unsafe path"),
        }
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::path::Path;

    #[test]
    fn test_reads_directories_files_and_links() {
        let mut builder = ::tar::Builder::new(Vec::new());

        let mut dir = ::tar::Header::new_gnu();
        dir.set_entry_type(::tar::EntryType::Directory);
        dir.set_size(0);
        dir.set_mode(0o755);
        builder.append_data(&mut dir, "docs/", std::io::empty()).unwrap();

        let mut file = ::tar::Header::new_gnu();
        file.set_size(5);
        file.set_mode(0o600);
        builder.append_data(&mut file, "docs/a.md", &b"# doc"[..]).unwrap();

        let mut link = ::tar::Header::new_gnu();
        link.set_entry_type(::tar::EntryType::Symlink);
        link.set_size(0);
        builder.append_link(&mut link, "latest.md", "docs/a.md").unwrap();

        let bytes = builder.into_inner().unwrap();
        let entries = read_entries(Cursor::new(bytes)).unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].kind, EntryKind::Directory);
        assert_eq!(entries[0].path, Path::new("docs"));
        assert_eq!(entries[1].kind, EntryKind::File);
        assert_eq!(&entries[1].data[..], b"# doc");
        assert_eq!(entries[1].mode, Some(0o600));
        assert_eq!(entries[2].kind, EntryKind::Symlink);
        assert_eq!(&entries[2].data[..], b"docs/a.md");
    }

    #[test]
    fn test_truncated_archive_is_an_error() {
        let mut builder = ::tar::Builder::new(Vec::new());
        let mut file = ::tar::Header::new_gnu();
        file.set_size(1024);
        file.set_mode(0o644);
        builder
            .append_data(&mut file, "big.bin", &vec![7u8; 1024][..])
            .unwrap();
        let mut bytes = builder.into_inner().unwrap();
        bytes.truncate(700);

        assert!(read_entries(Cursor::new(bytes)).is_err());
    }

    #[test]
    fn test_huge_declared_size_is_an_error() {
        let mut header = ::tar::Header::new_gnu();
        header.set_path("huge.bin").unwrap();
        header.set_size(1 << 44);
        header.set_mode(0o644);
        header.set_cksum();

        let mut bytes = header.as_bytes().to_vec();
        bytes.extend_from_slice(&[0u8; 512]);
        assert_eq!(bytes.len(), 1024);

        let err = read_entries(Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, Error::Archive { .. }));
    }
}
