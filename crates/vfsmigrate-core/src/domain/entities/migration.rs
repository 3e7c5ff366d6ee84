//! Migration descriptor and the filename convention that produces it.
//!
//! A migration file is named `{version}_{identifier}.{up|down}.{ext}`:
//!
//! ```text
//! 1_init.up.sql
//! 1_init.down.sql
//! 20240131120000_add_users_email.up.sql
//! ```
//!
//! The version is an unsigned decimal integer, the identifier is everything
//! between the first `_` and the direction suffix, and the extension is free
//! (`sql` by convention).

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::{
    error::DomainError,
    value_objects::{Direction, Version},
};

static FILENAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]+)_(.*)\.(down|up)\.(.*)$").expect("migration filename pattern is valid")
});

/// A single migration script, as described by its filename.
///
/// Immutable once parsed. Equality covers every field, so two descriptors
/// for the same version but different files are distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Migration {
    version: Version,
    direction: Direction,
    identifier: String,
    raw: String,
}

impl Migration {
    /// Build a descriptor from its parts.
    ///
    /// `raw` is the filename the descriptor will be read from; it is not
    /// re-validated against the other fields.
    pub fn new(
        version: Version,
        direction: Direction,
        identifier: impl Into<String>,
        raw: impl Into<String>,
    ) -> Self {
        Self {
            version,
            direction,
            identifier: identifier.into(),
            raw: raw.into(),
        }
    }

    /// Parse a bare filename (no directory components).
    pub fn parse(filename: &str) -> Result<Self, DomainError> {
        let caps =
            FILENAME_PATTERN
                .captures(filename)
                .ok_or_else(|| DomainError::UnparseableFilename {
                    filename: filename.to_string(),
                    reason: "expected {version}_{identifier}.{up|down}.{ext}".into(),
                })?;

        let version = caps[1]
            .parse::<Version>()
            .map_err(|e| DomainError::UnparseableFilename {
                filename: filename.to_string(),
                reason: format!("version '{}' is out of range: {e}", &caps[1]),
            })?;

        let direction = caps[3]
            .parse::<Direction>()
            .map_err(|_| DomainError::UnparseableFilename {
                filename: filename.to_string(),
                reason: format!("unknown direction '{}'", &caps[3]),
            })?;

        Ok(Self {
            version,
            direction,
            identifier: caps[2].to_string(),
            raw: filename.to_string(),
        })
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Human-readable label, e.g. `add_col` for `2_add_col.up.sql`.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The filename this migration was parsed from.
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for Migration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{} ({})", self.version, self.identifier, self.direction)
    }
}
