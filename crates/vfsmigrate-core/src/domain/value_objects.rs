//! Domain value objects: Version and Direction.
//!
//! Pure value types, `Copy` and compared by value. `Direction` knows its
//! textual form because that form is part of the filename convention.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Migration version number. Ordering of versions is numeric.
pub type Version = u64;

// ── Direction ────────────────────────────────────────────────────────────────

/// Which way a migration script moves the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = DomainError;

    // Case-sensitive: `1_init.UP.sql` is not a migration file.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            other => Err(DomainError::UnparseableFilename {
                filename: other.to_string(),
                reason: "direction must be 'up' or 'down'".into(),
            }),
        }
    }
}
