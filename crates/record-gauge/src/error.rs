//! Error types for record-gauge.
//!
//! Only a handful of operations can fail hard: creating metric objects with
//! names the `prometheus` crate rejects, loading configuration, and coercing a
//! single value. Everything the walker and setters tolerate is reported as a
//! [`Diagnostic`](crate::Diagnostic) instead.

use thiserror::Error;

/// The main error type for record-gauge operations.
#[derive(Debug, Error)]
pub enum GaugeError {
    /// A field value cannot be represented as an `f64`.
    #[error("cannot convert value of type {type_name} to f64")]
    Conversion {
        /// Name of the offending type.
        type_name: &'static str,
    },

    /// The metrics backend rejected a metric or registration.
    #[error("prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),

    /// Configuration error.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A TOML configuration document failed to parse.
    #[error("invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// A JSON configuration document failed to parse.
    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for record-gauge operations.
pub type Result<T> = std::result::Result<T, GaugeError>;

impl GaugeError {
    /// Create a conversion error for the given type name.
    #[must_use]
    pub const fn conversion(type_name: &'static str) -> Self {
        Self::Conversion { type_name }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Check if this is a conversion error.
    #[must_use]
    pub const fn is_conversion(&self) -> bool {
        matches!(self, Self::Conversion { .. })
    }

    /// Check if this error came from the metrics backend.
    #[must_use]
    pub const fn is_prometheus(&self) -> bool {
        matches!(self, Self::Prometheus(_))
    }

    /// Check if this is a configuration error of any kind.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(
            self,
            Self::Config { .. } | Self::Toml(_) | Self::Json(_) | Self::Io(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_message_names_type() {
        let err = GaugeError::conversion("Vec<u8>");
        assert!(err.is_conversion());
        assert_eq!(err.to_string(), "cannot convert value of type Vec<u8> to f64");
    }

    #[test]
    fn config_helper() {
        let err = GaugeError::config("missing namespace");
        assert!(err.is_config());
        assert!(!err.is_conversion());
        assert_eq!(err.to_string(), "configuration error: missing namespace");
    }

    #[test]
    fn prometheus_from() {
        let err: GaugeError = prometheus::Error::Msg("bad name".into()).into();
        assert!(err.is_prometheus());
    }
}
