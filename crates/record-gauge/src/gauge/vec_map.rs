//! Label-parameterized gauge maps.

use std::collections::BTreeMap;

use prometheus::{GaugeVec, Opts};

use super::{Labels, check_shared};
use crate::diagnostic::Diagnostic;
use crate::error::Result;
use crate::metadata::Metadata;
use crate::naming::{gauge_description, gauge_name, qualified_name};

/// One gauge vector per flattened entry, keyed by fully qualified name.
#[derive(Debug, Clone, Default)]
pub struct GaugeVecMap {
    labels: Vec<String>,
    gauges: BTreeMap<String, GaugeVec>,
    diagnostics: Vec<Diagnostic>,
}

impl GaugeVecMap {
    /// Build a gauge vector with the free label names `labels` for every entry
    /// of `metadata`.
    ///
    /// An entry whose derived name the backend rejects gets no vector and is
    /// reported through [`diagnostics`](Self::diagnostics).
    ///
    /// # Errors
    ///
    /// Returns an error if the namespace, a label name or a constant label is
    /// rejected, since no entry could be exported then.
    pub fn build(
        metadata: &Metadata,
        namespace: &str,
        labels: &[&str],
        const_labels: &Labels,
    ) -> Result<Self> {
        check_shared(namespace, labels, const_labels)?;

        let mut gauges = BTreeMap::new();
        let mut diagnostics = Vec::new();

        for (key, entry) in metadata {
            let name = gauge_name(metadata.name(), key, entry);
            let opts = Opts::new(name.clone(), gauge_description(metadata.name(), key))
                .namespace(namespace)
                .const_labels(const_labels.clone());

            match GaugeVec::new(opts, labels) {
                Ok(gauge) => {
                    gauges.insert(qualified_name(namespace, &name), gauge);
                }
                Err(err) => {
                    tracing::warn!(key = %key, name = %name, error = %err, "skipping invalid gauge vector");
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
            labels = ?labels,
            "built gauge vector map"
        );

        Ok(Self {
            labels: labels.iter().map(ToString::to_string).collect(),
            gauges,
            diagnostics,
        })
    }

    /// Entries that got no vector when the map was built.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Push the current values of `metadata` into the sub-gauges selected by
    /// `label_values`.
    ///
    /// Values that cannot be coerced, or label values that do not fit the
    /// vectors, leave the gauge untouched and are reported.
    pub fn set_values(
        &self,
        metadata: &Metadata,
        namespace: &str,
        label_values: &[&str],
    ) -> Vec<Diagnostic> {
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
            let Some(vec) = self.gauges.get(&name) else {
                tracing::trace!(name = %name, "no gauge vector registered");
                continue;
            };

            match vec.get_metric_with_label_values(label_values) {
                Ok(gauge) => gauge.set(value),
                Err(err) => {
                    tracing::warn!(key = %key, error = %err, "label values do not match");
                    diagnostics.push(Diagnostic::Labels {
                        key: key.clone(),
                        message: err.to_string(),
                    });
                }
            }
        }

        diagnostics
    }

    /// Free label names shared by every vector.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Look up a gauge vector by fully qualified name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&GaugeVec> {
        self.gauges.get(name)
    }

    /// Check if a gauge vector exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.gauges.contains_key(name)
    }

    /// Number of gauge vectors.
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

    /// Iterate over `(name, vector)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &GaugeVec)> {
        self.gauges.iter().map(|(k, v)| (k.as_str(), v))
    }
}
