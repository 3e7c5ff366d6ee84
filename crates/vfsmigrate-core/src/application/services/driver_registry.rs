//! Driver Registry - explicit scheme-to-factory dispatch.
//!
//! The host application builds one registry at startup, registers the
//! factories it wants, and hands the registry to whatever opens sources.
//! Nothing registers itself behind the host's back.

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;
use url::Url;

use crate::{
    application::{
        ApplicationError,
        ports::{DriverFactory, Instance, SourceDriver},
    },
    error::SourceResult,
};

/// Maps locator schemes (`file`, `vfs`, ...) to driver factories.
#[derive(Default)]
pub struct DriverRegistry {
    factories: BTreeMap<String, Box<dyn DriverFactory>>,
}

impl DriverRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under `scheme` (case-insensitive).
    pub fn register(
        &mut self,
        scheme: impl Into<String>,
        factory: Box<dyn DriverFactory>,
    ) -> SourceResult<()> {
        let scheme = scheme.into().to_ascii_lowercase();
        if self.factories.contains_key(&scheme) {
            return Err(ApplicationError::DuplicateScheme { scheme }.into());
        }

        debug!(%scheme, "registered source driver");
        self.factories.insert(scheme, factory);
        Ok(())
    }

    /// Registered schemes, sorted.
    pub fn schemes(&self) -> impl Iterator<Item = &str> + '_ {
        self.factories.keys().map(String::as_str)
    }

    pub fn contains(&self, scheme: &str) -> bool {
        self.factories.contains_key(&scheme.to_ascii_lowercase())
    }

    /// Open a source by locator, dispatching on the locator's scheme.
    pub fn open(&self, locator: &str) -> SourceResult<Box<dyn SourceDriver>> {
        let url = Url::parse(locator).map_err(|e| ApplicationError::InvalidLocator {
            locator: locator.to_string(),
            reason: e.to_string(),
        })?;

        self.factory(url.scheme())?.open(locator)
    }

    /// Open a source from a handle the host already holds.
    pub fn with_instance(
        &self,
        scheme: &str,
        instance: Instance,
    ) -> SourceResult<Box<dyn SourceDriver>> {
        self.factory(&scheme.to_ascii_lowercase())?
            .with_instance(instance)
    }

    fn factory(&self, scheme: &str) -> SourceResult<&dyn DriverFactory> {
        self.factories
            .get(scheme)
            .map(|factory| factory.as_ref())
            .ok_or_else(|| {
                ApplicationError::UnknownScheme {
                    scheme: scheme.to_string(),
                }
                .into()
            })
    }
}

impl fmt::Debug for DriverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DriverRegistry")
            .field("schemes", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}
