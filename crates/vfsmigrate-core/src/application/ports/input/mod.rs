//! Driving (input) ports - called by a migration runner.
//!
//! Every migration source exposes the same [`SourceDriver`] contract, so a
//! runner can swap an in-memory source for a directory on disk without
//! noticing.

use std::any::Any;

use crate::application::ports::output::ReadStream;
use crate::domain::Version;
use crate::error::SourceResult;

/// An opaque, pre-existing handle injected by the host application.
pub type Instance = Box<dyn Any + Send + Sync>;

/// Navigation and read contract a migration runner drives.
///
/// Navigation errors for versions past either end of the sequence are
/// `NotFound` (see [`crate::error::SourceError::is_not_found`]).
pub trait SourceDriver: Send + Sync {
    /// Lowest available version.
    fn first(&self) -> SourceResult<Version>;

    /// Highest available version strictly below `version`.
    fn prev(&self, version: Version) -> SourceResult<Version>;

    /// Lowest available version strictly above `version`.
    fn next(&self, version: Version) -> SourceResult<Version>;

    /// Stream the up script for `version`, with its identifier.
    fn read_up(&self, version: Version) -> SourceResult<(ReadStream, String)>;

    /// Stream the down script for `version`, with its identifier.
    fn read_down(&self, version: Version) -> SourceResult<(ReadStream, String)>;

    /// Release driver-owned resources.
    fn close(&mut self) -> SourceResult<()>;
}

/// Builds drivers for one locator scheme.
///
/// The two construction paths are kept apart: a driver may legitimately
/// refuse `open` and only accept injected handles.
pub trait DriverFactory: Send + Sync {
    /// Open by locator string, e.g. `file:///srv/migrations`.
    fn open(&self, locator: &str) -> SourceResult<Box<dyn SourceDriver>>;

    /// Open from a handle the host already holds.
    fn with_instance(&self, instance: Instance) -> SourceResult<Box<dyn SourceDriver>>;
}
