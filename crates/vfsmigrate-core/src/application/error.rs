//! Application layer errors.
//!
//! These errors represent failures while listing, navigating, reading, or
//! dispatching sources. Filename and registry rule violations are
//! `DomainError` from `crate::domain`.

use std::io;
use std::sync::Arc;

use thiserror::Error;

use crate::domain::Version;
use crate::error::ErrorCategory;

/// Errors that occur while serving migrations.
///
/// I/O errors are kept behind an `Arc` so the whole enum stays `Clone`;
/// the original `io::Error` is reachable through `source()`.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The supplied handle is not the capability this source needs.
    #[error("invalid input: expected {expected}")]
    InvalidInput { expected: &'static str },

    /// The filesystem root could not be enumerated.
    #[error("unable to list migrations in {path}: {source}")]
    Listing {
        path: String,
        #[source]
        source: Arc<io::Error>,
    },

    /// Navigation or read requested for something that is not registered.
    #[error("{op} {path}: file does not exist")]
    NotFound {
        op: String,
        version: Option<Version>,
        path: String,
    },

    /// The filesystem failed to open a listed migration file.
    #[error("{op} {path}: {source}")]
    Io {
        op: String,
        version: Option<Version>,
        path: String,
        #[source]
        source: Arc<io::Error>,
    },

    /// The driver does not implement this construction path.
    #[error("{scheme} driver does not support {operation}")]
    Unsupported {
        scheme: String,
        operation: &'static str,
    },

    /// No factory is registered for the locator's scheme.
    #[error("unknown source driver '{scheme}' (forgotten register?)")]
    UnknownScheme { scheme: String },

    /// A factory is already registered under this scheme.
    #[error("source driver '{scheme}' registered twice")]
    DuplicateScheme { scheme: String },

    /// The locator string could not be interpreted.
    #[error("invalid source locator '{locator}': {reason}")]
    InvalidLocator { locator: String, reason: String },
}

impl ApplicationError {
    pub(crate) fn not_found(op: impl Into<String>, version: Option<Version>, path: &str) -> Self {
        Self::NotFound {
            op: op.into(),
            version,
            path: path.to_string(),
        }
    }

    pub(crate) fn io(
        op: impl Into<String>,
        version: Version,
        path: &str,
        source: io::Error,
    ) -> Self {
        Self::Io {
            op: op.into(),
            version: Some(version),
            path: path.to_string(),
            source: Arc::new(source),
        }
    }

    /// The version a navigation or read error refers to, when known.
    pub fn version(&self) -> Option<Version> {
        match self {
            Self::NotFound { version, .. } | Self::Io { version, .. } => *version,
            _ => None,
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } | Self::InvalidLocator { .. } => ErrorCategory::Validation,
            Self::NotFound { .. } | Self::UnknownScheme { .. } => ErrorCategory::NotFound,
            Self::Listing { .. } | Self::Io { .. } => ErrorCategory::Io,
            Self::DuplicateScheme { .. } => ErrorCategory::Conflict,
            Self::Unsupported { .. } => ErrorCategory::Configuration,
        }
    }
}
