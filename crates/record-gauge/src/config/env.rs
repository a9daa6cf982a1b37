//! Environment-based configuration.

use std::collections::HashMap;
use std::ffi::OsString;

/// Environment configuration prefix.
pub const DEFAULT_PREFIX: &str = "GAUGE";

/// Snapshot of prefixed environment variables.
#[derive(Debug, Clone)]
pub struct EnvConfig {
    /// Prefix for environment variables.
    prefix: String,
    /// Captured values keyed by full variable name.
    vars: HashMap<String, String>,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl EnvConfig {
    /// Capture the process environment.
    ///
    /// Variables whose name or value is not valid Unicode are left out.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::from_vars(prefix, unicode_vars(std::env::vars_os()))
    }

    /// Build from explicit `(name, value)` pairs instead of the process
    /// environment.
    #[must_use]
    pub fn from_vars<I, K, V>(prefix: impl Into<String>, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            prefix: prefix.into(),
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Build the full environment variable name.
    fn var_name(&self, name: &str) -> String {
        if self.prefix.is_empty() {
            name.to_uppercase()
        } else {
            format!("{}_{}", self.prefix, name.to_uppercase())
        }
    }

    /// Get a string value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<String> {
        self.vars.get(&self.var_name(name)).cloned()
    }

    /// Get a string value with default.
    #[must_use]
    pub fn get_or(&self, name: &str, default: &str) -> String {
        self.get(name).unwrap_or_else(|| default.to_string())
    }

    /// Get a comma-separated list, skipping empty items.
    #[must_use]
    pub fn list(&self, name: &str) -> Vec<String> {
        self.get(name)
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get comma-separated `key=value` pairs, skipping malformed items.
    #[must_use]
    pub fn pairs(&self, name: &str) -> Vec<(String, String)> {
        self.list(name)
            .iter()
            .filter_map(|item| {
                let (k, v) = item.split_once('=')?;
                let k = k.trim();
                if k.is_empty() {
                    tracing::warn!(item = %item, "ignoring label without a name");
                    return None;
                }
                Some((k.to_string(), v.trim().to_string()))
            })
            .collect()
    }

    /// Check if a variable is set.
    #[must_use]
    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

/// Keep the `(name, value)` pairs that are valid Unicode.
fn unicode_vars<I>(vars: I) -> impl Iterator<Item = (String, String)>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    vars.into_iter().filter_map(|(name, value)| {
        match (name.into_string(), value.into_string()) {
            (Ok(name), Ok(value)) => Some((name, value)),
            (name, _) => {
                tracing::debug!(name = ?name, "ignoring non-unicode environment variable");
                None
            }
        }
    })
}

/// Recognized variable names, without prefix.
pub mod vars {
    /// Metric namespace.
    pub const NAMESPACE: &str = "NAMESPACE";
    /// Build version.
    pub const VERSION: &str = "VERSION";
    /// Free label names, comma-separated.
    pub const LABELS: &str = "LABELS";
    /// Constant labels, `k=v` comma-separated.
    pub const CONST_LABELS: &str = "CONST_LABELS";
    /// Log filter directive.
    pub const LOG_FILTER: &str = "LOG_FILTER";
    /// Log format, `plain` or `json`.
    pub const LOG_FORMAT: &str = "LOG_FORMAT";
}
