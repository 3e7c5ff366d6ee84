//! Infrastructure adapters for vfsmigrate.
//!
//! This crate implements the ports defined in `vfsmigrate-core::application::ports`.
//! It contains all I/O: filesystems, driver factories, settings and
//! subscriber setup.

pub mod config;
pub mod drivers;
pub mod filesystem;
pub mod logging;

// Re-export commonly used adapters
pub use crate::config::SourceSettings;
pub use crate::drivers::{FileDriverFactory, VfsDriverFactory, register_builtin};
pub use crate::filesystem::{EmbeddedFilesystem, LocalFilesystem, MemoryFilesystem};
pub use crate::logging::init_logging;
