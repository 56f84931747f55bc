//! Global `tracing` subscriber set up.

use tracing_subscriber::EnvFilter;

use crate::server::config::LogFormat;

static DEFAULT_FILTER: &str = "info";

/// Installs the global subscriber for the given output format.
///
/// The level filter comes from `RUST_LOG` and falls back to `info`. Calling this more
/// than once keeps the first subscriber.
pub fn start_logger(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let result = match format {
        LogFormat::Default => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(true)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .try_init(),
        LogFormat::Cloud => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_target(false)
            .without_time()
            .compact()
            .try_init(),
    };

    match result {
        Ok(()) => tracing::info!("Logger initialized"),
        Err(_) => tracing::debug!("Logger was already initialized, keeping existing subscriber"),
    }
}
