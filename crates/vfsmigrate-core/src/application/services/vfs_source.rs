//! VfsSource - migrations served from a read-only virtual filesystem.
//!
//! The root of the filesystem is listed once, at construction. Every file
//! whose name follows the migration convention is registered; everything
//! else (subdirectories, READMEs, stray files) is skipped. After that the
//! source only navigates its registry and opens files on demand.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Instance, ReadOnlyFilesystem, ReadStream, SourceDriver},
    },
    domain::{Direction, Migration, Migrations, Version},
    error::SourceResult,
};

/// Label used in error messages when the caller does not name the source.
pub const DEFAULT_LABEL: &str = "<vfs>";

const ROOT: &str = ".";

/// Migration source over any [`ReadOnlyFilesystem`].
///
/// The filesystem handle is shared with the caller; closing the source does
/// not close it.
pub struct VfsSource {
    label: String,
    fs: Arc<dyn ReadOnlyFilesystem>,
    migrations: Migrations,
}

impl VfsSource {
    /// Build a source from a filesystem handle.
    pub fn new(fs: Arc<dyn ReadOnlyFilesystem>) -> SourceResult<Self> {
        Self::with_label(fs, DEFAULT_LABEL)
    }

    /// Build a source whose errors name it `label`.
    #[instrument(level = "debug", skip_all, fields(label = tracing::field::Empty))]
    pub fn with_label(
        fs: Arc<dyn ReadOnlyFilesystem>,
        label: impl Into<String>,
    ) -> SourceResult<Self> {
        let label = label.into();
        tracing::Span::current().record("label", label.as_str());

        let entries = fs
            .read_dir(Path::new(ROOT))
            .map_err(|e| ApplicationError::Listing {
                path: label.clone(),
                source: Arc::new(e),
            })?;

        let mut migrations = Migrations::new();
        let mut skipped = 0usize;

        for entry in entries {
            // Only the root is scanned; nested directories are never migrations.
            if entry.is_dir() {
                debug!(name = %entry.name, "skipping directory");
                skipped += 1;
                continue;
            }

            let migration = match Migration::parse(&entry.name) {
                Ok(m) => m,
                Err(e) => {
                    debug!(name = %entry.name, reason = %e, "ignoring non-migration file");
                    skipped += 1;
                    continue;
                }
            };

            migrations.append(migration)?;
        }

        info!(
            label = %label,
            migrations = migrations.len(),
            skipped,
            "migration source ready"
        );

        Ok(Self {
            label,
            fs,
            migrations,
        })
    }

    /// Build a source from an opaque handle.
    ///
    /// The handle must be an `Arc<dyn ReadOnlyFilesystem>`; anything else is
    /// rejected with `InvalidInput`.
    pub fn with_instance(instance: Instance) -> SourceResult<Self> {
        let fs = instance
            .downcast::<Arc<dyn ReadOnlyFilesystem>>()
            .map_err(|_| ApplicationError::InvalidInput {
                expected: "Arc<dyn ReadOnlyFilesystem>",
            })?;
        Self::new(*fs)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// The registry built at construction.
    pub fn migrations(&self) -> &Migrations {
        &self.migrations
    }

    #[instrument(level = "debug", skip(self), fields(label = %self.label))]
    fn read(&self, version: Version, direction: Direction) -> SourceResult<(ReadStream, String)> {
        let op = format!("read {direction} version {version}");

        let migration = self
            .migrations
            .get(version, direction)
            .ok_or_else(|| {
                ApplicationError::not_found(op.as_str(), Some(version), &self.label)
            })?;

        // The file was listed at construction but may have vanished since.
        let stream = self.fs.open(Path::new(migration.raw())).map_err(|e| {
            warn!(file = migration.raw(), error = %e, "failed to open migration");
            ApplicationError::io(op.as_str(), version, migration.raw(), e)
        })?;

        Ok((stream, migration.identifier().to_string()))
    }
}

impl SourceDriver for VfsSource {
    fn first(&self) -> SourceResult<Version> {
        self.migrations
            .first()
            .ok_or_else(|| ApplicationError::not_found("first", None, &self.label).into())
    }

    fn prev(&self, version: Version) -> SourceResult<Version> {
        self.migrations.prev(version).ok_or_else(|| {
            ApplicationError::not_found(
                format!("prev for version {version}"),
                Some(version),
                &self.label,
            )
            .into()
        })
    }

    fn next(&self, version: Version) -> SourceResult<Version> {
        self.migrations.next(version).ok_or_else(|| {
            ApplicationError::not_found(
                format!("next for version {version}"),
                Some(version),
                &self.label,
            )
            .into()
        })
    }

    fn read_up(&self, version: Version) -> SourceResult<(ReadStream, String)> {
        self.read(version, Direction::Up)
    }

    fn read_down(&self, version: Version) -> SourceResult<(ReadStream, String)> {
        self.read(version, Direction::Down)
    }

    fn close(&mut self) -> SourceResult<()> {
        // nothing to release: the filesystem handle belongs to the caller
        Ok(())
    }
}

impl fmt::Debug for VfsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VfsSource")
            .field("label", &self.label)
            .field("migrations", &self.migrations.len())
            .finish_non_exhaustive()
    }
}
