//! Field values and their coercion to `f64`.
//!
//! [`FieldValue`] is the closed set of shapes a leaf field can take. Coercion
//! is an exhaustive match over it: booleans map to `0.0`/`1.0`, a few status
//! words map to the same, numbers are cast, and everything else is an error.

use std::fmt;

use crate::error::{GaugeError, Result};

/// Text tokens that coerce to `1.0`, compared case-insensitively.
const TRUTHY_TOKENS: &[&str] = &["y", "yes", "alive"];

/// Text tokens that coerce to `0.0`, compared case-insensitively.
const FALSY_TOKENS: &[&str] = &["n", "no"];

/// The runtime value of a leaf field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Boolean value.
    Bool(bool),
    /// Signed integer value.
    Int(i64),
    /// Unsigned integer value.
    UInt(u64),
    /// Floating-point value.
    Float(f64),
    /// Text value.
    Text(String),
    /// A value with no numeric meaning, carrying its type name.
    Other(&'static str),
}

impl FieldValue {
    /// Build an [`Other`](Self::Other) value named after `T`.
    #[must_use]
    pub fn other<T: ?Sized>() -> Self {
        Self::Other(std::any::type_name::<T>())
    }

    /// Name of the value's type, as used in conversion errors.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "i64",
            Self::UInt(_) => "u64",
            Self::Float(_) => "f64",
            Self::Text(_) => "String",
            Self::Other(name) => *name,
        }
    }

    /// Coerce the value to an `f64`.
    ///
    /// Text is matched against `y`, `yes`, `alive` (→ `1.0`) and `n`, `no`
    /// (→ `0.0`) ignoring case and surrounding whitespace; any other text must
    /// parse as a number.
    pub fn to_f64(&self) -> Result<f64> {
        match self {
            Self::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Self::Int(i) => Ok(*i as f64),
            Self::UInt(u) => Ok(*u as f64),
            Self::Float(f) => Ok(*f),
            Self::Text(text) => coerce_text(text),
            Self::Other(name) => Err(GaugeError::conversion(*name)),
        }
    }
}

fn coerce_text(text: &str) -> Result<f64> {
    let token = text.trim();
    if TRUTHY_TOKENS.iter().any(|t| token.eq_ignore_ascii_case(t)) {
        return Ok(1.0);
    }
    if FALSY_TOKENS.iter().any(|t| token.eq_ignore_ascii_case(t)) {
        return Ok(0.0);
    }
    token
        .parse::<f64>()
        .map_err(|_| GaugeError::conversion("String"))
}

/// Coerce a field value to an `f64`.
///
/// Shorthand for [`FieldValue::to_f64`].
pub fn to_float(value: &FieldValue) -> Result<f64> {
    value.to_f64()
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::UInt(u) => write!(f, "{u}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Other(name) => write!(f, "<{name}>"),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! from_signed {
    ($($t:ty),*) => {
        $(
            impl From<$t> for FieldValue {
                fn from(value: $t) -> Self {
                    Self::Int(value as i64)
                }
            }
        )*
    };
}

macro_rules! from_unsigned {
    ($($t:ty),*) => {
        $(
            impl From<$t> for FieldValue {
                fn from(value: $t) -> Self {
                    Self::UInt(value as u64)
                }
            }
        )*
    };
}

from_signed!(i8, i16, i32, i64, isize);
from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for FieldValue {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}
