//! Driven (output) ports - implemented by infrastructure.
//!
//! The `vfsmigrate-adapters` crate provides implementations.

use std::io::{self, Read};
use std::path::Path;

/// A readable stream over one file's content. Dropping it closes it.
pub type ReadStream = Box<dyn Read + Send>;

/// Kind of a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    File,
    Directory,
}

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DirEntry {
    /// Bare entry name, without any parent path.
    pub name: String,
    pub kind: EntryKind,
}

impl DirEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
        }
    }

    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Directory,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Port for a read-only virtual filesystem.
///
/// Implemented by:
/// - `vfsmigrate_adapters::filesystem::MemoryFilesystem` (in-memory tree)
/// - `vfsmigrate_adapters::filesystem::EmbeddedFilesystem` (static table)
/// - `vfsmigrate_adapters::filesystem::LocalFilesystem` (directory on disk)
///
/// ## Design Notes
///
/// - Paths are relative to the filesystem root; `.` names the root itself
/// - Errors are plain `io::Error` so callers see the backend's own failure
/// - Implementations must be safe to share across threads
#[cfg_attr(test, mockall::automock)]
pub trait ReadOnlyFilesystem: Send + Sync {
    /// List the immediate children of a directory.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>>;

    /// Open a file for reading.
    fn open(&self, path: &Path) -> io::Result<ReadStream>;
}
