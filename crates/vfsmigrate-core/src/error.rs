//! Unified error handling for vfsmigrate.
//!
//! This module provides a unified error type that wraps domain and
//! application errors, so callers of a migration source deal with one type.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for migration source operations.
#[derive(Debug, Error, Clone)]
pub enum SourceError {
    /// Filename or registry rule violations.
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Listing, navigation, read and dispatch failures.
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Source settings could not be loaded or are incomplete.
    #[error("configuration error: {message}")]
    Configuration { message: String },
}

impl SourceError {
    /// Get error category for display and dispatch.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Conflict => ErrorCategory::Conflict,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
        }
    }

    /// True when a navigation or read ran past what is registered.
    ///
    /// Migration runners use this to detect the end of the sequence.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Application(ApplicationError::NotFound { .. }))
    }

    /// True when two files claim the same version and direction.
    pub fn is_duplicate_version(&self) -> bool {
        matches!(self, Self::Domain(DomainError::DuplicateMigration { .. }))
    }
}

/// Error categories for display and dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    NotFound,
    Io,
    Configuration,
}

/// Convenient result type alias.
pub type SourceResult<T> = Result<T, SourceError>;
