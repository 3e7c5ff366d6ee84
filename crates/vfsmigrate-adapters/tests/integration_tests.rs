//! Integration tests: sources over real adapters.

use std::fs;
use std::io::Read;
use std::sync::Arc;
use std::thread;

use vfsmigrate_adapters::{MemoryFilesystem, SourceSettings, register_builtin};
use vfsmigrate_core::{
    application::{ApplicationError, DriverRegistry, ReadStream, SourceDriver, VfsSource},
    domain::DomainError,
    error::SourceError,
};

fn read_all(mut stream: ReadStream) -> Vec<u8> {
    let mut buf = Vec::new();
    stream.read_to_end(&mut buf).unwrap();
    buf
}

fn example_fs() -> MemoryFilesystem {
    MemoryFilesystem::new()
        .with_file("1_init.up.sql", "CREATE TABLE users (id int);")
        .with_file("1_init.down.sql", "DROP TABLE users;")
        .with_file("2_add_col.up.sql", "ALTER TABLE users ADD email text;")
}

#[test]
fn test_worked_example() -> anyhow::Result<()> {
    let source = VfsSource::new(Arc::new(example_fs()))?;

    assert_eq!(source.first()?, 1);
    assert_eq!(source.next(1)?, 2);
    assert!(source.next(2).unwrap_err().is_not_found());
    assert!(source.read_down(2).err().unwrap().is_not_found());
    Ok(())
}

#[test]
fn test_badly_named_and_nested_files_are_ignored() -> anyhow::Result<()> {
    let fs = example_fs()
        .with_file("README.md", "# migrations")
        .with_file("3_no_direction.sql", "")
        .with_file("abc_init.up.sql", "")
        .with_file("archive/4_old.up.sql", "SELECT 1;");

    let source = VfsSource::new(Arc::new(fs))?;
    assert_eq!(source.migrations().len(), 3);
    assert_eq!(source.migrations().versions().collect::<Vec<_>>(), vec![1, 2]);
    Ok(())
}

#[test]
fn test_duplicate_version_fails_construction() {
    let fs = example_fs().with_file("2_other_name.up.sql", "");

    let err = VfsSource::new(Arc::new(fs)).unwrap_err();
    assert!(err.is_duplicate_version());
    match err {
        SourceError::Domain(DomainError::DuplicateMigration {
            version,
            existing,
            rejected,
            ..
        }) => {
            assert_eq!(version, 2);
            // Listing order decides which file is seen first.
            let mut names = vec![existing, rejected];
            names.sort();
            assert_eq!(names, vec!["2_add_col.up.sql", "2_other_name.up.sql"]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_next_and_prev_walk_the_whole_sequence() -> anyhow::Result<()> {
    let fs = MemoryFilesystem::new();
    for v in [3u64, 1, 10, 7] {
        fs.insert_file(format!("{v}_step.up.sql"), format!("-- {v}"));
    }
    let source = VfsSource::new(Arc::new(fs))?;

    let mut forward = vec![source.first()?];
    while let Ok(v) = source.next(*forward.last().unwrap()) {
        forward.push(v);
    }
    assert_eq!(forward, vec![1, 3, 7, 10]);

    for pair in forward.windows(2) {
        assert_eq!(source.prev(pair[1])?, pair[0]);
    }
    assert!(source.prev(1).unwrap_err().is_not_found());
    Ok(())
}

#[test]
fn test_read_returns_exact_bytes_and_identifier() -> anyhow::Result<()> {
    let payload: Vec<u8> = (0u8..=255).collect();
    let fs = example_fs().with_file("5_binary_blob.up.sql", payload.clone());
    let source = VfsSource::new(Arc::new(fs))?;

    let (stream, identifier) = source.read_up(5)?;
    assert_eq!(identifier, "binary_blob");
    assert_eq!(read_all(stream), payload);

    let (stream, identifier) = source.read_down(1)?;
    assert_eq!(identifier, "init");
    assert_eq!(read_all(stream), b"DROP TABLE users;");
    Ok(())
}

#[test]
fn test_unregistered_versions_are_not_found() -> anyhow::Result<()> {
    let source = VfsSource::new(Arc::new(example_fs()))?;
    for v in [0, 3, u64::MAX] {
        assert!(source.read_up(v).err().unwrap().is_not_found());
        assert!(source.read_down(v).err().unwrap().is_not_found());
    }
    Ok(())
}

#[test]
fn test_empty_filesystem_has_no_first_version() -> anyhow::Result<()> {
    let source = VfsSource::new(Arc::new(MemoryFilesystem::new()))?;
    assert!(source.first().unwrap_err().is_not_found());
    assert!(source.migrations().is_empty());
    Ok(())
}

#[test]
fn test_file_removed_after_listing_surfaces_io_error() -> anyhow::Result<()> {
    let fs = example_fs();
    let source = VfsSource::new(Arc::new(fs.clone()))?;
    fs.remove_file("2_add_col.up.sql");

    let err = source.read_up(2).err().unwrap();
    assert!(!err.is_not_found());
    assert!(matches!(
        err,
        SourceError::Application(ApplicationError::Io { .. })
    ));
    // Navigation still reflects the listing taken at construction.
    assert_eq!(source.next(1)?, 2);
    Ok(())
}

#[test]
fn test_concurrent_reads_share_one_source() -> anyhow::Result<()> {
    let source = Arc::new(VfsSource::new(Arc::new(example_fs()))?);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let source = Arc::clone(&source);
            thread::spawn(move || {
                let version = if i % 2 == 0 { 1 } else { 2 };
                let (stream, _) = source.read_up(version).unwrap();
                read_all(stream)
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let bytes = handle.join().unwrap();
        let expected: &[u8] = if i % 2 == 0 {
            b"CREATE TABLE users (id int);"
        } else {
            b"ALTER TABLE users ADD email text;"
        };
        assert_eq!(bytes, expected);
    }
    Ok(())
}

#[test]
fn test_registry_opens_directory_by_file_locator() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("1_init.up.sql"), "CREATE TABLE a();")?;
    fs::write(dir.path().join("1_init.down.sql"), "DROP TABLE a;")?;
    fs::create_dir(dir.path().join("2_nested.up.sql"))?;

    let mut registry = DriverRegistry::new();
    register_builtin(&mut registry)?;

    let mut driver = registry.open(&format!("file://{}", dir.path().display()))?;
    assert_eq!(driver.first()?, 1);
    assert!(driver.next(1).unwrap_err().is_not_found());

    let (stream, identifier) = driver.read_down(1)?;
    assert_eq!(identifier, "init");
    assert_eq!(read_all(stream), b"DROP TABLE a;");

    driver.close()?;
    Ok(())
}

#[test]
fn test_registry_injects_memory_filesystem_under_vfs_scheme() -> anyhow::Result<()> {
    let mut registry = DriverRegistry::new();
    register_builtin(&mut registry)?;

    let driver = registry.with_instance("vfs", Box::new(example_fs()))?;
    assert_eq!(driver.first()?, 1);

    let err = registry.open("vfs://bundled").err().unwrap();
    assert!(matches!(
        err,
        SourceError::Application(ApplicationError::Unsupported { .. })
    ));
    Ok(())
}

#[test]
fn test_settings_file_selects_the_source() -> anyhow::Result<()> {
    let migrations = tempfile::tempdir()?;
    fs::write(migrations.path().join("42_answer.up.sql"), "SELECT 42;")?;

    let cfg_dir = tempfile::tempdir()?;
    let cfg_path = cfg_dir.path().join("vfsmigrate.toml");
    fs::write(
        &cfg_path,
        format!(
            "locator = \"file://{}\"\nlabel = \"app\"\nlog_level = \"debug\"\n",
            migrations.path().display()
        ),
    )?;

    let settings = SourceSettings::load(Some(&cfg_path))?;
    assert_eq!(settings.label, "app");
    assert_eq!(settings.log_level, "debug");

    let mut registry = DriverRegistry::new();
    register_builtin(&mut registry)?;
    let driver = settings.open(&registry)?;
    assert_eq!(driver.first()?, 42);
    Ok(())
}

#[test]
fn test_missing_settings_file_is_a_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = SourceSettings::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
    assert!(matches!(err, SourceError::Configuration { .. }));
}
