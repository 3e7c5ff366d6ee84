//! Application layer for vfsmigrate.
//!
//! This layer contains:
//! - **Services**: `VfsSource` (the migration source) and `DriverRegistry`
//! - **Ports**: the filesystem capability the source needs and the driver
//!   contract it offers
//! - **Errors**: Application-specific error types
//!
//! Filename rules and ordering live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{DEFAULT_LABEL, DriverRegistry, VfsSource};

// Re-export port traits (for adapter implementation)
pub use ports::{
    DirEntry, DriverFactory, EntryKind, Instance, ReadOnlyFilesystem, ReadStream, SourceDriver,
};

pub use error::ApplicationError;
