//! vfsmigrate Core - Hexagonal Architecture Implementation
//!
//! Serves ordered database migrations out of a read-only virtual filesystem
//! through the same driver contract every migration source implements.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          Migration runner (host)         │
//! │     (Drives the SourceDriver port)       │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │      (VfsSource, DriverRegistry)        │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │      (Driven: ReadOnlyFilesystem)       │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    vfsmigrate-adapters (Infrastructure) │
//! │ (MemoryFilesystem, LocalFilesystem, ...)│
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (Migration, Migrations, Direction)      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vfsmigrate_core::prelude::*;
//!
//! # fn run(fs: Arc<dyn ReadOnlyFilesystem>) -> SourceResult<()> {
//! let source = VfsSource::new(fs)?;
//! let mut version = source.first()?;
//! loop {
//!     let (_script, identifier) = source.read_up(version)?;
//!     println!("{version} {identifier}");
//!     match source.next(version) {
//!         Ok(v) => version = v,
//!         Err(e) if e.is_not_found() => break,
//!         Err(e) => return Err(e),
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        DirEntry, DriverFactory, DriverRegistry, EntryKind, Instance, ReadOnlyFilesystem,
        ReadStream, SourceDriver, VfsSource,
    };
    pub use crate::domain::{Direction, Migration, Migrations, Version};
    pub use crate::error::{SourceError, SourceResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
