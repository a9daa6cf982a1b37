//! The field-enumeration contract.
//!
//! A [`Record`] lists its fields as `(key, annotation, kind)` triples in
//! declaration order. A field's [`FieldKind`] comes from its type through
//! [`GaugeField`]: nested records, string-keyed maps, or leaf values.
//! `#[derive(Record)]` implements both traits for a struct.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use std::hash::BuildHasher;

use crate::value::FieldValue;

/// A structured value whose fields can be flattened into gauges.
pub trait Record {
    /// Name of the record type, used as the metric prefix.
    fn type_name(&self) -> &'static str;

    /// The record's fields in declaration order.
    fn fields(&self) -> Vec<Field<'_>>;
}

/// How a field's value participates in flattening.
pub trait GaugeField {
    /// Describe the current value.
    fn field_kind(&self) -> FieldKind<'_>;
}

/// One field of a record.
pub struct Field<'a> {
    /// Field key in the flattened table.
    pub name: &'static str,
    /// Caller-declared annotation, e.g. `"Name,string"`.
    pub annotation: &'static str,
    /// The field's current value.
    pub kind: FieldKind<'a>,
}

impl<'a> Field<'a> {
    /// Create a field.
    #[must_use]
    pub const fn new(name: &'static str, annotation: &'static str, kind: FieldKind<'a>) -> Self {
        Self {
            name,
            annotation,
            kind,
        }
    }

    /// The display tag: the annotation's first comma-separated segment.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        parse_tag(self.annotation)
    }
}

/// Shape of a field value.
pub enum FieldKind<'a> {
    /// A nested record, flattened into the parent.
    Record(&'a dyn Record),
    /// A mapping whose keys become field keys.
    Map(Vec<(String, FieldValue)>),
    /// A leaf value.
    Value(FieldValue),
}

impl FieldKind<'_> {
    /// Check if this is a nested record.
    #[must_use]
    pub const fn is_record(&self) -> bool {
        matches!(self, Self::Record(_))
    }

    /// Check if this is a mapping.
    #[must_use]
    pub const fn is_map(&self) -> bool {
        matches!(self, Self::Map(_))
    }
}

/// Extract the display tag from an annotation string.
///
/// `"Name,string"` yields `"Name"`; an empty annotation yields `""`.
#[must_use]
pub fn parse_tag(annotation: &str) -> &str {
    annotation.split(',').next().unwrap_or_default()
}

macro_rules! leaf_field {
    ($($t:ty),*) => {
        $(
            impl GaugeField for $t {
                fn field_kind(&self) -> FieldKind<'_> {
                    FieldKind::Value(FieldValue::from(*self))
                }
            }
        )*
    };
}

leaf_field!(bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl GaugeField for String {
    fn field_kind(&self) -> FieldKind<'_> {
        FieldKind::Value(FieldValue::Text(self.clone()))
    }
}

impl GaugeField for &str {
    fn field_kind(&self) -> FieldKind<'_> {
        FieldKind::Value(FieldValue::from(*self))
    }
}

impl<T> GaugeField for Vec<T> {
    fn field_kind(&self) -> FieldKind<'_> {
        FieldKind::Value(FieldValue::other::<Self>())
    }
}

impl<K, V, S> GaugeField for HashMap<K, V, S>
where
    K: Display,
    V: Clone + Into<FieldValue>,
    S: BuildHasher,
{
    fn field_kind(&self) -> FieldKind<'_> {
        FieldKind::Map(
            self.iter()
                .map(|(k, v)| (k.to_string(), v.clone().into()))
                .collect(),
        )
    }
}

impl<K, V> GaugeField for BTreeMap<K, V>
where
    K: Display,
    V: Clone + Into<FieldValue>,
{
    fn field_kind(&self) -> FieldKind<'_> {
        FieldKind::Map(
            self.iter()
                .map(|(k, v)| (k.to_string(), v.clone().into()))
                .collect(),
        )
    }
}
