//! Local filesystem adapter using std::fs.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use vfsmigrate_core::application::ports::{DirEntry, ReadOnlyFilesystem, ReadStream};

/// Read-only view of a directory on disk.
///
/// Paths handed to the port are joined onto `root`.
#[derive(Debug, Clone)]
pub struct LocalFilesystem {
    root: PathBuf,
}

impl LocalFilesystem {
    /// Create a new local filesystem adapter rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path == Path::new(".") {
            self.root.clone()
        } else {
            self.root.join(path)
        }
    }
}

impl ReadOnlyFilesystem for LocalFilesystem {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let dir = self.resolve(path);
        let mut entries = Vec::new();

        for entry in fs::read_dir(&dir).map_err(|e| map_io_error(&dir, e, "read directory"))? {
            let entry = entry.map_err(|e| map_io_error(&dir, e, "read directory entry"))?;
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    debug!(name = ?raw, "skipping non UTF-8 entry");
                    continue;
                }
            };

            // Follows symlinks, so a linked directory is still a directory.
            let is_dir = fs::metadata(entry.path())
                .map(|m| m.is_dir())
                .unwrap_or(false);

            entries.push(if is_dir {
                DirEntry::directory(name)
            } else {
                DirEntry::file(name)
            });
        }

        Ok(entries)
    }

    fn open(&self, path: &Path) -> io::Result<ReadStream> {
        let full = self.resolve(path);
        let file = File::open(&full).map_err(|e| map_io_error(&full, e, "open file"))?;
        Ok(Box::new(file))
    }
}

/// Keep the kind, add the path the OS error omits.
fn map_io_error(path: &Path, e: io::Error, operation: &str) -> io::Error {
    io::Error::new(
        e.kind(),
        format!("Failed to {} {}: {}", operation, path.display(), e),
    )
}
