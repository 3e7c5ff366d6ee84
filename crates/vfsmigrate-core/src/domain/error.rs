// ============================================================================
// domain/error.rs - MIGRATION DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

use crate::domain::value_objects::{Direction, Version};

/// Root domain error type.
///
/// Raised by the filename parser and the migration registry. Neither does
/// any I/O, so every variant is cheap to clone and compare.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Parse Errors
    // ========================================================================
    #[error("'{filename}' is not a migration filename: {reason}")]
    UnparseableFilename { filename: String, reason: String },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error(
        "duplicate {direction} migration for version {version}: '{rejected}' conflicts with '{existing}'"
    )]
    DuplicateMigration {
        version: Version,
        direction: Direction,
        existing: String,
        rejected: String,
    },
}

impl DomainError {
    /// Error category for display and dispatch.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnparseableFilename { .. } => ErrorCategory::Validation,
            Self::DuplicateMigration { .. } => ErrorCategory::Conflict,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
}
