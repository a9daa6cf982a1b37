//! Plain gauge maps.

use std::collections::BTreeMap;

use prometheus::{Gauge, Opts};

use super::{Labels, check_shared};
use crate::diagnostic::Diagnostic;
use crate::error::Result;
use crate::metadata::Metadata;
use crate::naming::{gauge_description, gauge_name, qualified_name};

/// One gauge per flattened entry, keyed by fully qualified name.
#[derive(Debug, Clone, Default)]
pub struct GaugeMap {
    gauges: BTreeMap<String, Gauge>,
    diagnostics: Vec<Diagnostic>,
}

impl GaugeMap {
    /// Build a gauge for every entry of `metadata`.
    ///
    /// Entries are never skipped here, whether or not their values are numeric.
    /// Two entries that derive the same name share the later gauge. An entry
    /// whose derived name the backend rejects gets no gauge and is reported
    /// through [`diagnostics`](Self::diagnostics).
    ///
    /// # Errors
    ///
    /// Returns an error if the namespace or a constant label is rejected,
    /// since no entry could be exported then.
    pub fn build(metadata: &Metadata, namespace: &str, const_labels: &Labels) -> Result<Self> {
        check_shared(namespace, &[], const_labels)?;

        let mut gauges = BTreeMap::new();
        let mut diagnostics = Vec::new();

        for (key, entry) in metadata {
            let name = gauge_name(metadata.name(), key, entry);
            let opts = Opts::new(name.clone(), gauge_description(metadata.name(), key))
                .namespace(namespace)
                .const_labels(const_labels.clone());

            match Gauge::with_opts(opts) {
                Ok(gauge) => {
                    gauges.insert(qualified_name(namespace, &name), gauge);
                }
                Err(err) => {
                    tracing::warn!(key = %key, name = %name, error = %err, "skipping invalid gauge");
                    diagnostics.push(Diagnostic::InvalidName {
                        key: key.clone(),
                        message: err.to_string(),
                    });
                }
            }
        }

        tracing::debug!(
            record = metadata.name(),
            namespace,
            gauges = gauges.len(),
            skipped = diagnostics.len(),
            "built gauge map"
        );

        Ok(Self {
            gauges,
            diagnostics,
        })
    }

    /// Entries that got no gauge when the map was built.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Push the current values of `metadata` into the gauges.
    ///
    /// Values that cannot be coerced leave their gauge untouched and are
    /// reported; entries without a gauge are ignored.
    pub fn set_values(&self, metadata: &Metadata, namespace: &str) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for (key, entry) in metadata {
            let value = match entry.value.to_f64() {
                Ok(value) => value,
                Err(err) => {
                    tracing::warn!(key = %key, error = %err, "skipping non-numeric field");
                    diagnostics.push(Diagnostic::Coercion {
                        key: key.clone(),
                        type_name: entry.value.type_name(),
                    });
                    continue;
                }
            };

            let name = qualified_name(namespace, &gauge_name(metadata.name(), key, entry));
            match self.gauges.get(&name) {
                Some(gauge) => gauge.set(value),
                None => tracing::trace!(name = %name, "no gauge registered"),
            }
        }

        diagnostics
    }

    /// Look up a gauge by fully qualified name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Gauge> {
        self.gauges.get(name)
    }

    /// Check if a gauge exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.gauges.contains_key(name)
    }

    /// Number of gauges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.gauges.len()
    }

    /// Check if the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.gauges.is_empty()
    }

    /// Fully qualified names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.gauges.keys().map(String::as_str)
    }

    /// Iterate over `(name, gauge)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Gauge)> {
        self.gauges.iter().map(|(k, v)| (k.as_str(), v))
    }
}
