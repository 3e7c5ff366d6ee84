//! Driver factories for the built-in schemes.
//!
//! | Scheme | Open by locator                     | Open by handle                         |
//! |--------|-------------------------------------|----------------------------------------|
//! | `vfs`  | unsupported                         | filesystem handle (memory, embedded..) |
//! | `file` | `file:///abs/dir`, `file://rel/dir` | `PathBuf` of the directory             |
//!
//! Hosts opt in with [`register_builtin`]; nothing is registered implicitly.

use std::path::PathBuf;
use std::sync::Arc;

use percent_encoding::percent_decode_str;
use tracing::debug;
use url::Url;
use vfsmigrate_core::{
    application::{
        ApplicationError, DriverFactory, DriverRegistry, Instance, ReadOnlyFilesystem,
        SourceDriver, VfsSource,
    },
    error::SourceResult,
};

use crate::filesystem::{EmbeddedFilesystem, LocalFilesystem, MemoryFilesystem};

pub const VFS_SCHEME: &str = "vfs";
pub const FILE_SCHEME: &str = "file";

/// Register the `vfs` and `file` factories.
pub fn register_builtin(registry: &mut DriverRegistry) -> SourceResult<()> {
    registry.register(VFS_SCHEME, Box::new(VfsDriverFactory))?;
    registry.register(FILE_SCHEME, Box::new(FileDriverFactory))?;
    Ok(())
}

/// Factory for sources over an injected virtual filesystem.
///
/// Accepts a [`MemoryFilesystem`], an [`EmbeddedFilesystem`], or any
/// `Arc<dyn ReadOnlyFilesystem>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct VfsDriverFactory;

impl DriverFactory for VfsDriverFactory {
    fn open(&self, _locator: &str) -> SourceResult<Box<dyn SourceDriver>> {
        // A virtual filesystem lives in the host's memory; there is nothing
        // a locator string could point at.
        Err(ApplicationError::Unsupported {
            scheme: VFS_SCHEME.to_string(),
            operation: "open by locator",
        }
        .into())
    }

    fn with_instance(&self, instance: Instance) -> SourceResult<Box<dyn SourceDriver>> {
        let fs: Arc<dyn ReadOnlyFilesystem> = match instance.downcast::<MemoryFilesystem>() {
            Ok(memory) => Arc::new(*memory),
            Err(instance) => match instance.downcast::<EmbeddedFilesystem>() {
                Ok(embedded) => Arc::new(*embedded),
                Err(instance) => return Ok(Box::new(VfsSource::with_instance(instance)?)),
            },
        };

        Ok(Box::new(VfsSource::new(fs)?))
    }
}

/// Factory for sources over a directory on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileDriverFactory;

impl FileDriverFactory {
    fn source_for(dir: PathBuf) -> SourceResult<Box<dyn SourceDriver>> {
        let fs = LocalFilesystem::new(dir);
        let label = fs.root().display().to_string();
        debug!(dir = %label, "opening directory migration source");
        Ok(Box::new(VfsSource::with_label(Arc::new(fs), label)?))
    }
}

impl DriverFactory for FileDriverFactory {
    fn open(&self, locator: &str) -> SourceResult<Box<dyn SourceDriver>> {
        Self::source_for(parse_file_locator(locator)?)
    }

    fn with_instance(&self, instance: Instance) -> SourceResult<Box<dyn SourceDriver>> {
        let dir = instance
            .downcast::<PathBuf>()
            .map_err(|_| ApplicationError::InvalidInput { expected: "PathBuf" })?;
        Self::source_for(*dir)
    }
}

/// Resolve `file://` locators.
///
/// `file:///srv/migrations` is absolute; `file://migrations` is taken
/// relative to the working directory.
fn parse_file_locator(locator: &str) -> SourceResult<PathBuf> {
    let invalid = |reason: String| ApplicationError::InvalidLocator {
        locator: locator.to_string(),
        reason,
    };

    let url = Url::parse(locator).map_err(|e| invalid(e.to_string()))?;
    if url.scheme() != FILE_SCHEME {
        let reason = format!("expected scheme '{FILE_SCHEME}', got '{}'", url.scheme());
        return Err(invalid(reason).into());
    }

    match url.host_str() {
        Some(host) if !host.is_empty() && host != "localhost" => {
            // `Url::path` stays percent-encoded; `to_file_path` below decodes.
            let path = percent_decode_str(url.path())
                .decode_utf8()
                .map_err(|e| invalid(e.to_string()))?;
            Ok(PathBuf::from(format!("{host}{path}")))
        }
        _ => url
            .to_file_path()
            .map_err(|()| invalid("not a local path".to_string()).into()),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use vfsmigrate_core::error::SourceError;

    #[test]
    fn absolute_file_locator() {
        assert_eq!(
            parse_file_locator("file:///srv/migrations").unwrap(),
            PathBuf::from("/srv/migrations")
        );
    }

    #[test]
    fn relative_file_locator() {
        let path = parse_file_locator("file://migrations/v2").unwrap();
        assert_eq!(path, PathBuf::from("migrations/v2"));
    }

    #[test]
    fn relative_file_locator_is_percent_decoded() {
        let path = parse_file_locator("file://migrations/my%20dir").unwrap();
        assert_eq!(path, PathBuf::from("migrations/my dir"));
    }

    #[test]
    fn absolute_and_relative_locators_decode_alike() {
        assert_eq!(
            parse_file_locator("file:///srv/my%20dir").unwrap(),
            PathBuf::from("/srv/my dir")
        );
    }

    #[test]
    fn relative_locator_with_invalid_utf8_is_rejected() {
        let err = parse_file_locator("file://migrations/%FF").unwrap_err();
        assert!(matches!(
            err,
            SourceError::Application(ApplicationError::InvalidLocator { .. })
        ));
    }

    #[test]
    fn wrong_scheme_is_invalid_locator() {
        let err = parse_file_locator("s3://bucket/x").unwrap_err();
        assert!(matches!(
            err,
            SourceError::Application(ApplicationError::InvalidLocator { .. })
        ));
    }

    #[test]
    fn vfs_open_by_locator_is_unsupported() {
        let err = VfsDriverFactory.open("vfs://anything").err().unwrap();
        assert!(matches!(
            err,
            SourceError::Application(ApplicationError::Unsupported { .. })
        ));
    }

    #[test]
    fn vfs_accepts_memory_filesystem_instance() {
        let fs = MemoryFilesystem::new().with_file("3_c.up.sql", "SELECT 1;");
        let driver = VfsDriverFactory.with_instance(Box::new(fs)).unwrap();
        assert_eq!(driver.first().unwrap(), 3);
    }

    #[test]
    fn vfs_accepts_embedded_filesystem_instance() {
        static TABLE: EmbeddedFilesystem =
            EmbeddedFilesystem::new(&[("8_h.down.sql", "DROP TABLE h;".as_bytes())]);
        let driver = VfsDriverFactory.with_instance(Box::new(TABLE)).unwrap();
        assert_eq!(driver.first().unwrap(), 8);
        assert!(driver.read_up(8).err().unwrap().is_not_found());
    }

    #[test]
    fn vfs_accepts_trait_object_instance() {
        let fs: Arc<dyn ReadOnlyFilesystem> =
            Arc::new(MemoryFilesystem::new().with_file("4_d.up.sql", ""));
        let driver = VfsDriverFactory.with_instance(Box::new(fs)).unwrap();
        assert_eq!(driver.first().unwrap(), 4);
    }

    #[test]
    fn vfs_rejects_unrelated_instance() {
        let err = VfsDriverFactory.with_instance(Box::new(17u32)).err().unwrap();
        assert!(matches!(
            err,
            SourceError::Application(ApplicationError::InvalidInput { .. })
        ));
    }

    #[test]
    fn file_factory_opens_directory_by_path_instance() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("1_a.up.sql"), "CREATE TABLE a();").unwrap();

        let driver = FileDriverFactory
            .with_instance(Box::new(dir.path().to_path_buf()))
            .unwrap();
        assert_eq!(driver.first().unwrap(), 1);

        // Errors name the directory the source was opened on.
        let message = driver.next(1).unwrap_err().to_string();
        assert!(message.contains(&dir.path().display().to_string()));
    }

    #[test]
    fn builtin_registration_is_explicit() {
        let mut registry = DriverRegistry::new();
        assert_eq!(registry.schemes().count(), 0);

        register_builtin(&mut registry).unwrap();
        assert_eq!(registry.schemes().collect::<Vec<_>>(), vec!["file", "vfs"]);

        // A second call collides with the first.
        assert!(register_builtin(&mut registry).is_err());
    }
}
