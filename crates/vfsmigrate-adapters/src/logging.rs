//! Tracing subscriber initialisation.
//!
//! Only the host application should call [`init_logging`];
//! `vfsmigrate-core` and the adapters only *emit* spans and events.
//!
//! `RUST_LOG` overrides the configured level if set.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use vfsmigrate_core::error::{SourceError, SourceResult};

use crate::config::SourceSettings;

/// Initialise the global tracing subscriber.
///
/// Returns an error if a subscriber is already set; hosts that may call this
/// twice (tests) can ignore it.
pub fn init_logging(settings: &SourceSettings) -> SourceResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&settings.log_level)));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| SourceError::Configuration {
            message: format!("failed to initialise tracing: {e}"),
        })
}

/// Same level for every vfsmigrate crate.
fn default_directives(level: &str) -> String {
    format!("vfsmigrate_core={level},vfsmigrate_adapters={level}")
}
