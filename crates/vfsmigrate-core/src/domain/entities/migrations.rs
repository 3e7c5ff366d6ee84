//! Ordered registry of migration descriptors.
//!
//! Each version owns two slots, one per [`Direction`]. A version is
//! registered as soon as either slot is filled, so navigation (`first`,
//! `prev`, `next`) walks every version that has an up or a down script.

use std::collections::BTreeMap;

use crate::domain::{
    entities::migration::Migration,
    error::DomainError,
    value_objects::{Direction, Version},
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Slots {
    up: Option<Migration>,
    down: Option<Migration>,
}

impl Slots {
    fn slot_mut(&mut self, direction: Direction) -> &mut Option<Migration> {
        match direction {
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
        }
    }
}

/// Migrations keyed by version, in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Migrations {
    by_version: BTreeMap<Version, Slots>,
}

impl Migrations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a migration.
    ///
    /// Fails if the version already has a migration in the same direction.
    /// An up and a down migration for one version coexist.
    pub fn append(&mut self, migration: Migration) -> Result<(), DomainError> {
        let slots = self.by_version.entry(migration.version()).or_default();
        let slot = slots.slot_mut(migration.direction());

        if let Some(existing) = slot {
            return Err(DomainError::DuplicateMigration {
                version: migration.version(),
                direction: migration.direction(),
                existing: existing.raw().to_string(),
                rejected: migration.raw().to_string(),
            });
        }

        *slot = Some(migration);
        Ok(())
    }

    /// Lowest registered version.
    pub fn first(&self) -> Option<Version> {
        self.by_version.keys().next().copied()
    }

    /// Highest registered version strictly below `version`.
    pub fn prev(&self, version: Version) -> Option<Version> {
        self.by_version.range(..version).next_back().map(|(v, _)| *v)
    }

    /// Lowest registered version strictly above `version`.
    pub fn next(&self, version: Version) -> Option<Version> {
        self.by_version
            .range((std::ops::Bound::Excluded(version), std::ops::Bound::Unbounded))
            .next()
            .map(|(v, _)| *v)
    }

    pub fn up(&self, version: Version) -> Option<&Migration> {
        self.by_version.get(&version).and_then(|s| s.up.as_ref())
    }

    pub fn down(&self, version: Version) -> Option<&Migration> {
        self.by_version.get(&version).and_then(|s| s.down.as_ref())
    }

    /// Look up a migration by version and direction.
    pub fn get(&self, version: Version, direction: Direction) -> Option<&Migration> {
        match direction {
            Direction::Up => self.up(version),
            Direction::Down => self.down(version),
        }
    }

    /// Registered versions in ascending order.
    pub fn versions(&self) -> impl Iterator<Item = Version> + '_ {
        self.by_version.keys().copied()
    }

    /// Every descriptor, ordered by version with `up` before `down`.
    pub fn iter(&self) -> impl Iterator<Item = &Migration> + '_ {
        self.by_version
            .values()
            .flat_map(|s| s.up.iter().chain(s.down.iter()))
    }

    /// Number of descriptors (not versions).
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.by_version.is_empty()
    }
}
