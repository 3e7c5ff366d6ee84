//! Application ports (traits) for external dependencies.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by the source, implemented by infrastructure
//!   - `ReadOnlyFilesystem`: root listing and file opening
//!
//! - **Driving (Input) Ports**: Called by a migration runner, implemented here
//!   - `SourceDriver`: first / prev / next / read-up / read-down / close
//!   - `DriverFactory`: open by locator string or by injected handle

pub mod input;
pub mod output;

pub use input::{DriverFactory, Instance, SourceDriver};
pub use output::{DirEntry, EntryKind, ReadOnlyFilesystem, ReadStream};
