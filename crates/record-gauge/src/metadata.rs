//! Flattening of nested records into a single table.
//!
//! [`walk`] follows a record's fields in declaration order. Nested records are
//! recursed into with the same accumulator, map fields contribute one entry per
//! map key, and every other field contributes one entry under its own key. When
//! two leaves flatten to the same key the last one wins and a
//! [`Diagnostic::KeyCollision`] is recorded.
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use record_gauge::{Metadata, Record};
//!
//! #[derive(Record)]
//! struct Sample {
//!     #[gauge(tag = "Name", rename = "Name")]
//!     name: String,
//!     #[gauge(rename = "Count")]
//!     count: i64,
//!     extra: HashMap<String, i64>,
//! }
//!
//! let sample = Sample {
//!     name: "a".into(),
//!     count: 3,
//!     extra: HashMap::from([("A".to_string(), 1), ("B".to_string(), 2)]),
//! };
//!
//! let meta = Metadata::from_record(&sample);
//! assert_eq!(meta.name(), "Sample");
//! assert_eq!(meta.len(), 4);
//! assert_eq!(meta.get("A").unwrap().tag, "");
//! ```

use std::collections::HashMap;

use crate::diagnostic::Diagnostic;
use crate::record::{FieldKind, GaugeField, Record};
use crate::value::FieldValue;

/// One leaf field discovered by the walker.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldEntry {
    /// Declared display tag, may be empty.
    pub tag: String,
    /// Current value.
    pub value: FieldValue,
}

impl FieldEntry {
    /// Create an entry.
    pub fn new(tag: impl Into<String>, value: FieldValue) -> Self {
        Self {
            tag: tag.into(),
            value,
        }
    }
}

/// The flattened result of one walk.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    name: String,
    entries: HashMap<String, FieldEntry>,
    diagnostics: Vec<Diagnostic>,
}

impl Metadata {
    /// Create an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk `record` into a fresh accumulator.
    #[must_use]
    pub fn from_record(record: &dyn Record) -> Self {
        let mut metadata = Self::new();
        walk(record, &mut metadata);
        metadata
    }

    /// Type name of the outermost record walked, empty before the first walk.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Flattened entries keyed by field key or map key.
    #[must_use]
    pub const fn entries(&self) -> &HashMap<String, FieldEntry> {
        &self.entries
    }

    /// Look up one entry.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldEntry> {
        self.entries.get(key)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no entries were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Warnings raised while walking.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Iterate over entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn insert(&mut self, key: String, entry: FieldEntry) {
        if self.entries.contains_key(&key) {
            tracing::warn!(
                key = %key,
                value = %entry.value,
                "key exists already, replacing"
            );
            self.diagnostics.push(Diagnostic::KeyCollision {
                key: key.clone(),
                value: entry.value.clone(),
            });
        }
        self.entries.insert(key, entry);
    }
}

impl<'a> IntoIterator for &'a Metadata {
    type Item = (&'a String, &'a FieldEntry);
    type IntoIter = std::collections::hash_map::Iter<'a, String, FieldEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Flatten `record` into `metadata`.
///
/// The first call on an unnamed accumulator names it after the record type and
/// clears its entries; recursive calls for nested records keep that name.
pub fn walk(record: &dyn Record, metadata: &mut Metadata) {
    if metadata.name.is_empty() {
        metadata.name = record.type_name().to_string();
        metadata.entries.clear();
        metadata.diagnostics.clear();
    }

    for field in record.fields() {
        let tag = field.tag();
        match field.kind {
            FieldKind::Record(nested) => walk(nested, metadata),
            FieldKind::Map(pairs) => {
                for (key, value) in pairs {
                    metadata.insert(key, FieldEntry::new(tag, value));
                }
            }
            FieldKind::Value(value) => {
                metadata.insert(field.name.to_string(), FieldEntry::new(tag, value));
            }
        }
    }
}

/// Flatten any field value into `metadata`.
///
/// Only records are walked. A top-level map or leaf value has no type name to
/// anchor its metrics and is skipped without touching `metadata`.
pub fn walk_value(value: &dyn GaugeField, metadata: &mut Metadata) {
    match value.field_kind() {
        FieldKind::Record(record) => walk(record, metadata),
        FieldKind::Map(_) | FieldKind::Value(_) => {
            tracing::debug!("skipping non-record value at top level");
        }
    }
}

/// Snapshot of a record's own leaf fields keyed by field name.
///
/// Unlike [`walk`], nested records and map fields are not expanded.
#[must_use]
pub fn field_map(record: &dyn Record) -> HashMap<&'static str, FieldValue> {
    record
        .fields()
        .into_iter()
        .filter_map(|field| match field.kind {
            FieldKind::Value(value) => Some((field.name, value)),
            FieldKind::Record(_) | FieldKind::Map(_) => None,
        })
        .collect()
}
