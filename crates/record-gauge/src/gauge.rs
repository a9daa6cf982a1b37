//! Gauge maps built from flattened metadata.
//!
//! A map is built once from a [`Metadata`](crate::Metadata) snapshot and keeps
//! one metric object per entry under `namespace_typename_fieldname`. Later
//! refreshes only change the values inside those objects.
//!
//! - [`GaugeMap`] holds plain gauges.
//! - [`GaugeVecMap`] holds gauge vectors parameterized by label names.
//! - [`RecordRegistry`] groups the gauge maps of several record types.
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use record_gauge::{GaugeMap, Metadata, Record};
//!
//! #[derive(Record)]
//! struct Pool {
//!     #[gauge(tag = "Hashrate %")]
//!     hashrate: f64,
//!     alive: String,
//! }
//!
//! let pool = Pool { hashrate: 97.5, alive: "Alive".into() };
//! let meta = Metadata::from_record(&pool);
//!
//! let gauges = GaugeMap::build(&meta, "miner", &HashMap::new()).unwrap();
//! assert!(gauges.get("miner_pool_hashrate_percent").is_some());
//!
//! let diagnostics = gauges.set_values(&meta, "miner");
//! assert!(diagnostics.is_empty());
//! assert_eq!(gauges.get("miner_pool_alive").unwrap().get(), 1.0);
//! ```

mod map;
mod registry;
mod vec_map;

pub use map::GaugeMap;
pub use registry::RecordRegistry;
pub use vec_map::GaugeVecMap;

use std::collections::HashMap;

use prometheus::core::Desc;

use crate::error::Result;
use crate::naming::qualified_name;

/// Constant labels attached to every metric of a map.
pub type Labels = HashMap<String, String>;

/// Validate the descriptor parts every gauge of a map shares: the namespace,
/// the free label names and the constant labels.
fn check_shared(namespace: &str, labels: &[&str], const_labels: &Labels) -> Result<()> {
    Desc::new(
        qualified_name(namespace, "up"),
        "shared descriptor parts".to_string(),
        labels.iter().map(ToString::to_string).collect(),
        const_labels.clone(),
    )?;
    Ok(())
}
