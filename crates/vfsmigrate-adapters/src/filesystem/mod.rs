//! Filesystem adapters.

mod embedded;
mod local;
mod memory;

pub use embedded::EmbeddedFilesystem;
pub use local::LocalFilesystem;
pub use memory::MemoryFilesystem;
