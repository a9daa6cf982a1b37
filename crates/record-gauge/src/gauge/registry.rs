//! Gauge maps for several record types.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use super::{GaugeMap, Labels};
use crate::config::GaugeConfig;
use crate::diagnostic::Diagnostic;
use crate::error::Result;
use crate::metadata::Metadata;
use crate::record::Record;

/// Gauge maps of distinct record types, keyed by type name.
///
/// The first record seen for a type decides its gauges; later records of the
/// same type are not built again.
#[derive(Debug, Clone, Default)]
pub struct RecordRegistry {
    namespace: String,
    const_labels: Labels,
    maps: BTreeMap<String, GaugeMap>,
}

impl RecordRegistry {
    /// Create an empty registry.
    pub fn new(namespace: impl Into<String>, const_labels: Labels) -> Self {
        Self {
            namespace: namespace.into(),
            const_labels,
            maps: BTreeMap::new(),
        }
    }

    /// Build gauge maps for `records` using the namespace and constant labels
    /// from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the namespace or a constant label is rejected.
    pub fn build(records: &[&dyn Record], config: &GaugeConfig) -> Result<Self> {
        let mut registry = Self::new(config.namespace.clone(), config.metric_const_labels());
        for record in records {
            registry.add(*record)?;
        }
        Ok(registry)
    }

    /// Walk `record` and build its gauge map unless its type is present.
    ///
    /// Returns `false` when the type was already registered. Entries whose
    /// derived names are rejected are skipped and show up in
    /// [`diagnostics`](Self::diagnostics).
    ///
    /// # Errors
    ///
    /// Returns an error if the namespace or a constant label is rejected.
    pub fn add(&mut self, record: &dyn Record) -> Result<bool> {
        let metadata = Metadata::from_record(record);
        match self.maps.entry(metadata.name().to_string()) {
            Entry::Occupied(_) => {
                tracing::debug!(record = metadata.name(), "record type already registered");
                Ok(false)
            }
            Entry::Vacant(slot) => {
                slot.insert(GaugeMap::build(
                    &metadata,
                    &self.namespace,
                    &self.const_labels,
                )?);
                Ok(true)
            }
        }
    }

    /// Refresh the gauges of every record in `records`.
    ///
    /// Records whose type was never registered are ignored.
    pub fn set_values(&self, records: &[&dyn Record]) -> Vec<Diagnostic> {
        records
            .iter()
            .flat_map(|record| self.set_record(*record))
            .collect()
    }

    /// Refresh the gauges of one record.
    ///
    /// The returned diagnostics include collisions found while walking.
    pub fn set_record(&self, record: &dyn Record) -> Vec<Diagnostic> {
        let metadata = Metadata::from_record(record);
        let Some(map) = self.maps.get(metadata.name()) else {
            tracing::trace!(record = metadata.name(), "record type not registered");
            return Vec::new();
        };

        let mut diagnostics = metadata.diagnostics().to_vec();
        diagnostics.extend(map.set_values(&metadata, &self.namespace));
        diagnostics
    }

    /// Entries of every registered type that got no gauge when built.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.maps
            .values()
            .flat_map(|map| map.diagnostics().iter().cloned())
            .collect()
    }

    /// Namespace prefixed to every metric.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Gauge map of one record type.
    #[must_use]
    pub fn get(&self, type_name: &str) -> Option<&GaugeMap> {
        self.maps.get(type_name)
    }

    /// Number of record types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.maps.len()
    }

    /// Check if no record types are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    /// Iterate over `(type name, gauge map)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &GaugeMap)> {
        self.maps.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Field, GaugeField};

    struct Fan {
        rpm: u32,
    }

    impl Record for Fan {
        fn type_name(&self) -> &'static str {
            "Fan"
        }

        fn fields(&self) -> Vec<Field<'_>> {
            vec![Field::new("RPM", "", self.rpm.field_kind())]
        }
    }

    struct Psu {
        watts: f64,
        state: &'static str,
    }

    impl Record for Psu {
        fn type_name(&self) -> &'static str {
            "Psu"
        }

        fn fields(&self) -> Vec<Field<'_>> {
            vec![
                Field::new("Watts", "", self.watts.field_kind()),
                Field::new("State", "", self.state.field_kind()),
            ]
        }
    }

    #[test]
    fn groups_by_type_name() {
        let fan = Fan { rpm: 1200 };
        let psu = Psu {
            watts: 450.0,
            state: "alive",
        };
        let config = GaugeConfig::new("rack");

        let registry = RecordRegistry::build(&[&fan, &psu], &config).unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.get("Fan").unwrap().contains("rack_fan_rpm"));
        assert!(registry.get("Psu").unwrap().contains("rack_psu_watts"));
    }

    #[test]
    fn first_seen_type_wins() {
        let mut registry = RecordRegistry::new("rack", Labels::new());
        assert!(registry.add(&Fan { rpm: 1 }).unwrap());
        assert!(!registry.add(&Fan { rpm: 2 }).unwrap());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn refreshes_registered_types_only() {
        let fan = Fan { rpm: 1200 };
        let psu = Psu {
            watts: 450.0,
            state: "dead",
        };
        let registry = RecordRegistry::build(&[&fan], &GaugeConfig::new("rack")).unwrap();

        let diagnostics = registry.set_values(&[&Fan { rpm: 900 }, &psu]);

        assert!(diagnostics.is_empty());
        let rpm = registry.get("Fan").unwrap().get("rack_fan_rpm").unwrap();
        assert_eq!(rpm.get(), 900.0);
        assert!(registry.get("Psu").is_none());
    }

    #[test]
    fn reports_coercion_failures() {
        let psu = Psu {
            watts: 450.0,
            state: "dead",
        };
        let registry = RecordRegistry::build(&[&psu], &GaugeConfig::new("rack")).unwrap();

        let diagnostics = registry.set_record(&psu);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].key(), "State");
        let watts = registry.get("Psu").unwrap().get("rack_psu_watts").unwrap();
        assert_eq!(watts.get(), 450.0);
    }

    struct Nic {
        up: bool,
        rx: BTreeMap<String, u64>,
    }

    impl Record for Nic {
        fn type_name(&self) -> &'static str {
            "Net"
        }

        fn fields(&self) -> Vec<Field<'_>> {
            vec![
                Field::new("Up", "", self.up.field_kind()),
                Field::new("Rx", "", self.rx.field_kind()),
            ]
        }
    }

    #[test]
    fn malformed_map_key_spares_the_rest() {
        let nic = Nic {
            up: true,
            rx: BTreeMap::from([("eth0".to_string(), 5), ("eth0.100".to_string(), 7)]),
        };
        let registry = RecordRegistry::build(&[&nic], &GaugeConfig::new("host")).unwrap();

        let map = registry.get("Net").unwrap();
        assert!(map.contains("host_net_up"));
        assert!(map.contains("host_net_eth0"));
        assert_eq!(map.len(), 2);

        let diagnostics = registry.diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].is_invalid_name());
        assert_eq!(diagnostics[0].key(), "eth0.100");

        assert!(registry.set_record(&nic).is_empty());
        assert_eq!(map.get("host_net_eth0").unwrap().get(), 5.0);
    }
}
