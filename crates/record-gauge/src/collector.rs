//! Bridge between gauge maps and the Prometheus collector protocol.
//!
//! [`GaugeMap`], [`GaugeVecMap`] and [`RecordRegistry`] implement
//! [`Collector`], so they can be registered with any `prometheus::Registry`
//! as a unit. Describe streams every handle's descriptors; collect streams
//! every handle's current samples.
//!
//! # HTTP Server Integration
//!
//! ```rust,ignore
//! use record_gauge::collector::gather_text;
//!
//! // In your HTTP handler for /metrics endpoint:
//! fn metrics_handler(registry: &prometheus::Registry) -> String {
//!     gather_text(registry).unwrap_or_default()
//! }
//! ```

use prometheus::core::{Collector, Desc};
use prometheus::proto::MetricFamily;
use prometheus::{Encoder, Registry, TextEncoder};

use crate::error::Result;
use crate::gauge::{GaugeMap, GaugeVecMap, RecordRegistry};

impl Collector for GaugeMap {
    fn desc(&self) -> Vec<&Desc> {
        self.iter().flat_map(|(_, gauge)| gauge.desc()).collect()
    }

    fn collect(&self) -> Vec<MetricFamily> {
        self.iter().flat_map(|(_, gauge)| gauge.collect()).collect()
    }
}

impl Collector for GaugeVecMap {
    fn desc(&self) -> Vec<&Desc> {
        self.iter().flat_map(|(_, vec)| vec.desc()).collect()
    }

    fn collect(&self) -> Vec<MetricFamily> {
        self.iter().flat_map(|(_, vec)| vec.collect()).collect()
    }
}

impl Collector for RecordRegistry {
    fn desc(&self) -> Vec<&Desc> {
        self.iter().flat_map(|(_, map)| map.desc()).collect()
    }

    fn collect(&self) -> Vec<MetricFamily> {
        self.iter().flat_map(|(_, map)| map.collect()).collect()
    }
}

/// Register a clone of `collector` with `registry`.
///
/// The clone shares its metric handles with `collector`, so values set
/// through `collector` show up in the registry.
///
/// # Errors
///
/// Returns an error if a metric with the same descriptor is already registered.
pub fn register<C>(registry: &Registry, collector: &C) -> Result<()>
where
    C: Collector + Clone + 'static,
{
    registry.register(Box::new(collector.clone()))?;
    Ok(())
}

/// Gather every metric of `registry` in the Prometheus text exposition format.
///
/// # Errors
///
/// Returns an error if encoding fails.
pub fn gather_text(registry: &Registry) -> Result<String> {
    let encoder = TextEncoder::new();
    let metric_families = registry.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()).into())
}
