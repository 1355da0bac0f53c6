//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;
use crate::constants::{DEFAULT_LOG_FILTER, LOG_ENV_VAR};

static INIT: Once = Once::new();

/// Initialize the Quarry tracing/logging system with defaults.
///
/// Reads the `QUARRY_LOG` environment variable for per-crate log levels.
/// Format: `QUARRY_LOG=quarry_storage=debug,quarry_core=warn`
///
/// Falls back to `quarry_core=info,quarry_storage=info` if `QUARRY_LOG` is
/// not set or is invalid. Calling it more than once is a no-op.
pub fn init_tracing() {
    init_tracing_with(&LoggingConfig::default());
}

/// Initialize tracing, using `config.filter` when `QUARRY_LOG` is unset.
pub fn init_tracing_with(config: &LoggingConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .or_else(|_| match config.filter.as_deref() {
                Some(directives) => EnvFilter::try_new(directives),
                None => EnvFilter::try_new(DEFAULT_LOG_FILTER),
            })
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        // try_init: another subscriber may already be installed by the host.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(config.thread_ids.unwrap_or(false))
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
