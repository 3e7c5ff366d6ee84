//! In-memory filesystem adapter.

use std::{
    collections::{BTreeMap, BTreeSet},
    io::{self, Cursor},
    path::{Component, Path, PathBuf},
    sync::{Arc, RwLock},
};

use vfsmigrate_core::application::ports::{DirEntry, ReadOnlyFilesystem, ReadStream};

/// In-memory filesystem.
///
/// Clones share the same tree, so a test can keep a handle and change files
/// after a source has listed them.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, Arc<[u8]>>,
    directories: BTreeSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert_file`](Self::insert_file).
    pub fn with_file(self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) -> Self {
        self.insert_file(path, content);
        self
    }

    /// Add or replace a file. Parent directories are created implicitly.
    pub fn insert_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        let path = normalize(path.as_ref());
        let content: Vec<u8> = content.into();
        let mut inner = self.write();
        for parent in path.ancestors().skip(1) {
            if !parent.as_os_str().is_empty() {
                inner.directories.insert(parent.to_path_buf());
            }
        }
        inner.files.insert(path, Arc::from(content));
    }

    /// Create an empty directory (and its parents).
    pub fn create_dir(&self, path: impl AsRef<Path>) {
        let path = normalize(path.as_ref());
        let mut inner = self.write();
        for dir in path.ancestors() {
            if !dir.as_os_str().is_empty() {
                inner.directories.insert(dir.to_path_buf());
            }
        }
    }

    /// Remove a file, returning whether it existed.
    pub fn remove_file(&self, path: impl AsRef<Path>) -> bool {
        let path = normalize(path.as_ref());
        self.write().files.remove(&path).is_some()
    }

    /// Number of files at any depth.
    pub fn len(&self) -> usize {
        self.read().files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Every mutation is a single map insert or remove; a poisoned lock still
    // guards a consistent tree.
    fn read(&self) -> std::sync::RwLockReadGuard<'_, MemoryFilesystemInner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, MemoryFilesystemInner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl ReadOnlyFilesystem for MemoryFilesystem {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let dir = normalize(path);
        let inner = self.read();

        if !dir.as_os_str().is_empty() && !inner.directories.contains(&dir) {
            return Err(not_found(path));
        }

        let mut entries: Vec<DirEntry> = inner
            .directories
            .iter()
            .filter(|d| d.parent() == Some(dir.as_path()))
            .filter_map(|d| file_name(d).map(DirEntry::directory))
            .collect();

        entries.extend(
            inner
                .files
                .keys()
                .filter(|f| f.parent() == Some(dir.as_path()))
                .filter_map(|f| file_name(f).map(DirEntry::file)),
        );

        Ok(entries)
    }

    fn open(&self, path: &Path) -> io::Result<ReadStream> {
        let inner = self.read();
        let content = inner
            .files
            .get(&normalize(path))
            .cloned()
            .ok_or_else(|| not_found(path))?;

        Ok(Box::new(Cursor::new(content)))
    }
}

/// Keep only normal components: `./a`, `/a`, `../a` and `a` name the same
/// file, and nothing escapes the root.
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .collect()
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("{}: no such file or directory", path.display()),
    )
}
