//! Archive entries and extraction options.

use bytes::Bytes;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Kind of an archive entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Symlink,
}

/// One entry of an extracted archive.
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    /// Path relative to the archive root, or the on-disk path once written.
    pub path: PathBuf,
    /// Entry kind.
    pub kind: EntryKind,
    /// File contents; the link target for symlinks; empty for directories.
    pub data: Bytes,
    /// Unix permission bits, when the archive records them.
    pub mode: Option<u32>,
}

impl ArchiveEntry {
    /// Build an entry, refusing paths that could escape the extraction root.
    pub(crate) fn new(
        path: &Path,
        kind: EntryKind,
        data: Bytes,
        mode: Option<u32>,
    ) -> Option<Self> {
        let path = normalize(path)?;
        if path.as_os_str().is_empty() {
            return None;
        }
        Some(Self {
            path,
            kind,
            data,
            mode,
        })
    }

    /// Drop `count` leading path components. `None` if nothing is left.
    pub(crate) fn strip(self, count: usize) -> Option<Self> {
        if count == 0 {
            return Some(self);
        }
        let path: PathBuf = self.path.components().skip(count).collect();
        if path.as_os_str().is_empty() {
            return None;
        }
        Some(Self { path, ..self })
    }
}

/// Remove `.` components; reject absolute paths and `..`.
fn normalize(path: &Path) -> Option<PathBuf> {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(out)
}

/// Predicate deciding whether an entry is kept.
pub type EntryFilter = Arc<dyn Fn(&ArchiveEntry) -> bool + Send + Sync>;

/// Options applied while extracting an archive.
#[derive(Clone, Default)]
pub struct ExtractOptions {
    /// Number of leading path components removed from every entry.
    pub strip: usize,
    /// Entries rejected by the filter are neither written nor returned.
    pub filter: Option<EntryFilter>,
}

impl fmt::Debug for ExtractOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractOptions")
            .field("strip", &self.strip)
            .field("filter", &self.filter.is_some())
            .finish()
    }
}

impl ExtractOptions {
    /// Extract everything, keeping paths as they are.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of leading path components to remove.
    pub fn strip(mut self, strip: usize) -> Self {
        self.strip = strip;
        self
    }

    /// Only keep entries accepted by `filter`.
    ///
    /// The filter sees paths after stripping.
    pub fn filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&ArchiveEntry) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Arc::new(filter));
        self
    }

    pub(crate) fn accepts(&self, entry: &ArchiveEntry) -> bool {
        self.filter.as_ref().map_or(true, |filter| filter(entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str) -> Option<ArchiveEntry> {
        ArchiveEntry::new(Path::new(path), EntryKind::File, Bytes::new(), None)
    }

    #[test]
    fn test_unsafe_paths_are_refused() {
        assert!(file("../evil").is_none());
        assert!(file("a/../../evil").is_none());
        assert!(file("/etc/passwd").is_none());
        assert!(file("").is_none());
        assert!(file("./").is_none());
    }

    #[test]
    fn test_current_dir_components_are_dropped() {
        assert_eq!(file("./a/./b.txt").unwrap().path, Path::new("a/b.txt"));
    }

    #[test]
    fn test_strip() {
        let entry = file("root/sub/file.txt").unwrap();
        assert_eq!(entry.clone().strip(0).unwrap().path, Path::new("root/sub/file.txt"));
        assert_eq!(entry.clone().strip(1).unwrap().path, Path::new("sub/file.txt"));
        assert!(entry.strip(3).is_none());
    }

    #[test]
    fn test_filter_defaults_to_accept() {
        let entry = file("x").unwrap();
        assert!(ExtractOptions::new().accepts(&entry));
        assert!(!ExtractOptions::new().filter(|_| false).accepts(&entry));
    }
}
