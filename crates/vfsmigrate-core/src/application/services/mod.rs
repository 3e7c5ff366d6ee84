//! Application services.

pub mod driver_registry;
pub mod vfs_source;

pub use driver_registry::DriverRegistry;
pub use vfs_source::{DEFAULT_LABEL, VfsSource};
