//! Configuration types for record-gauge.
//!
//! All naming inputs (namespace, constant labels, label names, build version)
//! are carried in a [`GaugeConfig`] value handed to whatever needs them. It can
//! be built in code, parsed from TOML or JSON, or read from environment
//! variables.
//!
//! ```rust
//! use record_gauge::GaugeConfig;
//!
//! let config = GaugeConfig::from_toml_str(r#"
//!     namespace = "miner"
//!     version = "1.4.0"
//!     labels = ["worker"]
//!
//!     [const_labels]
//!     site = "lab"
//! "#).unwrap();
//!
//! assert_eq!(config.namespace, "miner");
//! assert_eq!(config.metric_const_labels().len(), 2);
//! ```

mod env;
mod file;

pub use env::{DEFAULT_PREFIX, EnvConfig, vars};
pub use file::{ConfigFormat, parse_config};

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{GaugeError, Result};
use crate::gauge::Labels;

/// Constant label that carries [`GaugeConfig::version`].
pub const VERSION_LABEL: &str = "version";

/// Default tracing filter directive.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Naming configuration for gauge maps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GaugeConfig {
    /// Prefix of every metric name.
    pub namespace: String,

    /// Labels with fixed values attached to every metric.
    pub const_labels: BTreeMap<String, String>,

    /// Free label names for gauge vector maps.
    pub labels: Vec<String>,

    /// Build version, exported as the `version` constant label when set.
    pub version: Option<String>,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl GaugeConfig {
    /// Create a configuration with the given namespace.
    #[must_use]
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..Default::default()
        }
    }

    /// Add a constant label.
    #[must_use]
    pub fn const_label(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.const_labels.insert(name.into(), value.into());
        self
    }

    /// Add a free label name.
    #[must_use]
    pub fn label(mut self, name: impl Into<String>) -> Self {
        self.labels.push(name.into());
        self
    }

    /// Set the build version.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the logging configuration.
    #[must_use]
    pub fn logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = logging;
        self
    }

    /// Constant labels to attach to metrics, including the version label.
    #[must_use]
    pub fn metric_const_labels(&self) -> Labels {
        let mut labels: Labels = self
            .const_labels
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        if let Some(version) = self.version.as_ref().filter(|v| !v.is_empty()) {
            labels.insert(VERSION_LABEL.to_string(), version.clone());
        }
        labels
    }

    /// Free label names as string slices.
    #[must_use]
    pub fn label_names(&self) -> Vec<&str> {
        self.labels.iter().map(String::as_str).collect()
    }

    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        parse_config(content, ConfigFormat::Toml)
    }

    /// Parse a JSON document.
    pub fn from_json_str(content: &str) -> Result<Self> {
        parse_config(content, ConfigFormat::Json)
    }

    /// Load a configuration file, choosing the format by extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path).ok_or_else(|| {
            GaugeError::config(format!("unknown config format: {}", path.display()))
        })?;
        let content = std::fs::read_to_string(path)?;
        parse_config(&content, format)
    }

    /// Read a configuration from `{PREFIX}_*` environment variables.
    ///
    /// See [`vars`] for the recognized names.
    #[must_use]
    pub fn from_env(prefix: &str) -> Self {
        Self::from_env_config(&EnvConfig::new(prefix))
    }

    /// Read a configuration from an environment snapshot.
    #[must_use]
    pub fn from_env_config(env: &EnvConfig) -> Self {
        let mut logging = LoggingConfig::default();
        if let Some(filter) = env.get(vars::LOG_FILTER) {
            logging.filter = filter;
        }
        if let Some(format) = env.get(vars::LOG_FORMAT).as_deref().and_then(LogFormat::parse) {
            logging.format = format;
        }

        Self {
            namespace: env.get_or(vars::NAMESPACE, ""),
            const_labels: env.pairs(vars::CONST_LABELS).into_iter().collect(),
            labels: env.list(vars::LABELS),
            version: env.get(vars::VERSION),
            logging,
        }
    }
}

/// Configuration for diagnostic logging.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `"record_gauge=debug"`.
    pub filter: String,

    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
            format: LogFormat::default(),
        }
    }
}

impl LoggingConfig {
    /// Create a new logging configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the filter directive.
    #[must_use]
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Set the log format.
    #[must_use]
    pub const fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }
}

/// Log format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Plain,

    /// Newline-delimited JSON.
    Json,
}

impl LogFormat {
    /// Parse a format name, ignoring case.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "plain" | "text" => Some(Self::Plain),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}
