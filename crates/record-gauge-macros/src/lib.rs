//! record-gauge-macros: Procedural macros for record-gauge
//!
//! This crate provides the [`Record`](macro@Record) derive, which generates the
//! field-enumeration contract used by the record-gauge metadata walker.
//!
//! # Example
//!
//! ```ignore
//! use record_gauge::Record;
//! use std::collections::HashMap;
//!
//! #[derive(Record)]
//! struct DevCommon {
//!     #[gauge(tag = "Name,string")]
//!     name: String,
//!     #[gauge(tag = "This is a big name")]
//!     big_name: i32,
//! }
//!
//! #[derive(Record)]
//! #[gauge(name = "ChipStat")]
//! struct ChipStat {
//!     common: DevCommon,
//!     accept: HashMap<String, i64>,
//!     #[gauge(tag = "Funny")]
//!     funny: i64,
//! }
//! ```

// In proc-macro crates, passing parsed input by value is idiomatic
#![allow(clippy::needless_pass_by_value)]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod record;

/// Derive `Record` and `GaugeField` for a struct with named fields.
///
/// Every field type must implement `record_gauge::GaugeField`. Fields whose
/// type itself derives `Record` are flattened into the parent.
///
/// # Attributes
///
/// - `#[gauge(name = "TypeName")]` on the struct overrides the type name used
///   as the metric prefix (defaults to the struct identifier).
/// - `#[gauge(tag = "Display Name,opts")]` on a field sets its annotation. Only
///   the first comma-separated segment becomes the tag.
/// - `#[gauge(rename = "Key")]` on a field overrides its key in the flattened
///   table (defaults to the field identifier).
///
/// # Examples
///
/// ```ignore
/// #[derive(Record)]
/// struct PoolData {
///     #[gauge(tag = "Workers %")]
///     workers: f64,
///     #[gauge(rename = "User")]
///     user: String,
/// }
/// ```
#[proc_macro_derive(Record, attributes(gauge))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::expand(input).into()
}
