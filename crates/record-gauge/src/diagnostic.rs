//! Non-fatal conditions raised while walking records and setting values.
//!
//! Each diagnostic is both logged through `tracing` at the point it happens
//! and returned to the caller, who decides whether to surface it further.

use thiserror::Error;

use crate::value::FieldValue;

/// A structured warning.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Diagnostic {
    /// Two fields flattened to the same key; the later value replaced the earlier.
    #[error("key {key} exists already, replacing with value {value}")]
    KeyCollision {
        /// The flattened key.
        key: String,
        /// The value that won.
        value: FieldValue,
    },

    /// A field value could not be coerced to `f64`; its gauge was left untouched.
    #[error("cannot set {key}: value of type {type_name} is not numeric")]
    Coercion {
        /// The flattened key.
        key: String,
        /// Name of the offending type.
        type_name: &'static str,
    },

    /// Label values did not match a gauge vector's label names.
    #[error("cannot set {key}: {message}")]
    Labels {
        /// The flattened key.
        key: String,
        /// Error reported by the metrics backend.
        message: String,
    },

    /// The metrics backend rejected the name derived for an entry; no gauge
    /// was built for it.
    #[error("no gauge for {key}: {message}")]
    InvalidName {
        /// The flattened key.
        key: String,
        /// Error reported by the metrics backend.
        message: String,
    },
}

impl Diagnostic {
    /// The flattened key this diagnostic is about.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::KeyCollision { key, .. }
            | Self::Coercion { key, .. }
            | Self::Labels { key, .. }
            | Self::InvalidName { key, .. } => key,
        }
    }

    /// Check if this is a key collision.
    #[must_use]
    pub const fn is_collision(&self) -> bool {
        matches!(self, Self::KeyCollision { .. })
    }

    /// Check if this is a coercion failure.
    #[must_use]
    pub const fn is_coercion(&self) -> bool {
        matches!(self, Self::Coercion { .. })
    }

    /// Check if this is a rejected metric name.
    #[must_use]
    pub const fn is_invalid_name(&self) -> bool {
        matches!(self, Self::InvalidName { .. })
    }
}
