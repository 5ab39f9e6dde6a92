//! Tracing subscriber setup.
//!
//! Host binaries call [`init_logging`] once at startup, before any other
//! GateHub component is constructed.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Install the global tracing subscriber.
///
/// The `RUST_LOG` environment variable, when set, overrides the
/// configured level. Calling this twice is a no-op: the second install
/// fails quietly rather than panicking inside a host that already set
/// up its own subscriber.
pub fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let result = match config.format.as_str() {
        "json" => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .try_init(),
        _ => tracing_subscriber::fmt().with_env_filter(filter).try_init(),
    };

    if result.is_err() {
        tracing::debug!("Global tracing subscriber already installed");
    }
}
