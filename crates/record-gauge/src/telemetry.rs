//! Subscriber installation for the crate's diagnostic events.
//!
//! The library itself only emits `tracing` events (collision warnings,
//! coercion failures, registry activity). Applications that do not install a
//! subscriber of their own can call [`init_logging`] once at startup.
//!
//! ```ignore
//! use record_gauge::{LoggingConfig, LogFormat};
//!
//! record_gauge::telemetry::init_logging(
//!     &LoggingConfig::new().filter("record_gauge=debug").format(LogFormat::Json),
//! )?;
//! ```

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{LogFormat, LoggingConfig};
use crate::error::{GaugeError, Result};

/// Install a global subscriber configured by `config`.
///
/// # Errors
///
/// Returns [`GaugeError::Config`] if the filter directive is invalid or a
/// global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = env_filter(config)?;

    match config.format {
        LogFormat::Plain => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_level(true);

            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .try_init()
                .map_err(|_| GaugeError::config("tracing subscriber already installed"))?;
        }
        LogFormat::Json => {
            let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .try_init()
                .map_err(|_| GaugeError::config("tracing subscriber already installed"))?;
        }
    }

    tracing::debug!(filter = %config.filter, format = ?config.format, "logging initialized");
    Ok(())
}

fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    EnvFilter::try_new(&config.filter)
        .map_err(|e| GaugeError::config(format!("invalid log filter {:?}: {e}", config.filter)))
}
