//! Source settings.
//!
//! [`SourceSettings`] is loaded once by the host at startup and passed down
//! by value. The core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. Environment variables (`VFSMIGRATE_LOCATOR`, `VFSMIGRATE_LABEL`, ...)
//! 2. Config file passed to [`SourceSettings::load`]
//! 3. Built-in defaults (always present)

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use vfsmigrate_core::{
    application::{DEFAULT_LABEL, DriverRegistry, ReadOnlyFilesystem, SourceDriver, VfsSource},
    error::{SourceError, SourceResult},
};

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "VFSMIGRATE";

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Where migrations come from and how the source reports itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    /// Locator opened through a [`DriverRegistry`], e.g. `file:///srv/migrations`.
    pub locator: Option<String>,
    /// Name used in error messages for injected filesystems.
    pub label: String,
    /// Default tracing level when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            locator: None,
            label: DEFAULT_LABEL.to_string(),
            log_level: "warn".into(),
        }
    }
}

impl SourceSettings {
    /// Load settings: defaults, then `config_file` (if any), then environment.
    pub fn load(config_file: Option<&Path>) -> SourceResult<Self> {
        let defaults = Self::default();
        let mut builder = config::Config::builder()
            .set_default("label", defaults.label)
            .and_then(|b| b.set_default("log_level", defaults.log_level))
            .map_err(config_error)?;

        if let Some(path) = config_file {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let settings: Self = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(config_error)?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> SourceResult<()> {
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(SourceError::Configuration {
                message: format!(
                    "log_level '{}' is not one of {}",
                    self.log_level,
                    LOG_LEVELS.join(", ")
                ),
            });
        }
        if self.label.trim().is_empty() {
            return Err(SourceError::Configuration {
                message: "label must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Open the configured locator through `registry`.
    pub fn open(&self, registry: &DriverRegistry) -> SourceResult<Box<dyn SourceDriver>> {
        let locator = self
            .locator
            .as_deref()
            .ok_or_else(|| SourceError::Configuration {
                message: "no migration source locator configured".into(),
            })?;
        registry.open(locator)
    }

    /// Build a source over an injected filesystem, named by `label`.
    pub fn open_filesystem(&self, fs: Arc<dyn ReadOnlyFilesystem>) -> SourceResult<VfsSource> {
        VfsSource::with_label(fs, self.label.as_str())
    }
}

fn config_error(e: config::ConfigError) -> SourceError {
    SourceError::Configuration {
        message: e.to_string(),
    }
}
