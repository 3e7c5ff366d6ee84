//! Embedded filesystem adapter over a static file table.
//!
//! Migrations are compiled into the binary with `include_str!`:
//!
//! ```rust,ignore
//! static MIGRATIONS: EmbeddedFilesystem = EmbeddedFilesystem::new(&[
//!     ("1_init.up.sql", include_str!("../migrations/1_init.up.sql").as_bytes()),
//!     ("1_init.down.sql", include_str!("../migrations/1_init.down.sql").as_bytes()),
//! ]);
//! ```

use std::collections::BTreeSet;
use std::io::{self, Cursor};
use std::path::{Component, Path, PathBuf};

use vfsmigrate_core::application::ports::{DirEntry, ReadOnlyFilesystem, ReadStream};

/// Immutable filesystem backed by `'static` data.
///
/// Entries are `(path, bytes)` pairs. Paths use `/` separators and are
/// relative to the root; `include_bytes!(..).as_slice()` works as well as
/// `include_str!(..).as_bytes()` for the content.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedFilesystem {
    files: &'static [(&'static str, &'static [u8])],
}

impl EmbeddedFilesystem {
    pub const fn new(files: &'static [(&'static str, &'static [u8])]) -> Self {
        Self { files }
    }

    /// Paths in table order.
    pub fn paths(&self) -> impl Iterator<Item = &'static str> {
        self.files.iter().map(|(p, _)| *p)
    }

    fn lookup(&self, path: &Path) -> Option<&'static [u8]> {
        let wanted = normalize(path);
        self.files
            .iter()
            .find(|(p, _)| normalize(Path::new(p)) == wanted)
            .map(|(_, content)| *content)
    }
}

impl ReadOnlyFilesystem for EmbeddedFilesystem {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let dir = normalize(path);
        let mut dirs = BTreeSet::new();
        let mut files = Vec::new();
        let mut found = dir.as_os_str().is_empty();

        for (raw, _) in self.files {
            let file = normalize(Path::new(raw));
            let Ok(rest) = file.strip_prefix(&dir) else {
                continue;
            };

            let mut parts = rest.components();
            match (parts.next(), parts.next()) {
                (Some(name), None) => {
                    files.push(DirEntry::file(lossy(name)));
                    found = true;
                }
                (Some(name), Some(_)) => {
                    dirs.insert(lossy(name));
                    found = true;
                }
                // `path` names a file, not a directory
                _ => {}
            }
        }

        if !found {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{}: no such directory", path.display()),
            ));
        }

        Ok(dirs
            .into_iter()
            .map(DirEntry::directory)
            .chain(files)
            .collect())
    }

    fn open(&self, path: &Path) -> io::Result<ReadStream> {
        let content = self.lookup(path).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{}: no such file", path.display()),
            )
        })?;
        Ok(Box::new(Cursor::new(content)))
    }
}

fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .collect()
}

fn lossy(component: Component<'_>) -> String {
    component.as_os_str().to_string_lossy().into_owned()
}
