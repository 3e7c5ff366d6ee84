//! Core domain layer for vfsmigrate.
//!
//! Pure logic with no I/O: the migration descriptor, the filename convention
//! that produces it, and the ordered registry the driver navigates.
//!
//! - **No I/O**: listing and reading happen behind ports in `crate::application`
//! - **Immutable descriptors**: a `Migration` never changes after parsing
//! - **Synchronous**: nothing here blocks or suspends
pub mod entities;
pub mod error;
pub mod value_objects;

pub use entities::{Migration, Migrations};
pub use error::{DomainError, ErrorCategory};
pub use value_objects::{Direction, Version};
