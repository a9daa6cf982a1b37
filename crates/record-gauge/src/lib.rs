//! record-gauge: flatten nested records into Prometheus gauges
//!
//! This crate turns the fields of plain data records into named, documented
//! gauges without per-field boilerplate. A record is walked depth-first into a
//! flat [`Metadata`] map; a [`GaugeMap`] (or [`GaugeVecMap`] for labelled
//! metrics) derives one gauge per entry, and later walks of fresh records push
//! new values into the same gauges.
//!
//! # Features
//!
//! - **`#[derive(Record)]`** with `#[gauge(tag = "...")]` display tags
//! - **Nested records** flattened into one namespace, last write wins
//! - **Boolean and liveness strings** coerced to `0.0` / `1.0`
//! - **Collector bridge** for registration with a `prometheus::Registry`
//! - **Config** from code, TOML, JSON, or environment variables
//! - **Logging** subscriber installation (feature: `logging`)
//!
//! # Example
//!
//! ```rust
//! use record_gauge::{GaugeMap, Labels, Metadata, Record};
//!
//! #[derive(Record)]
//! struct Pool {
//!     #[gauge(tag = "Hashrate %")]
//!     hashrate: f64,
//!     status: String,
//! }
//!
//! let pool = Pool { hashrate: 97.5, status: "Alive".into() };
//! let meta = Metadata::from_record(&pool);
//! let gauges = GaugeMap::build(&meta, "miner", &Labels::new()).unwrap();
//!
//! assert!(gauges.set_values(&meta, "miner").is_empty());
//! assert_eq!(gauges.get("miner_pool_status").unwrap().get(), 1.0);
//! ```

extern crate self as record_gauge;

pub use record_gauge_macros::Record;

pub mod collector;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod gauge;
pub mod metadata;
pub mod naming;
pub mod prelude;
pub mod record;
pub mod value;

/// Subscriber installation for diagnostic events.
#[cfg(feature = "logging")]
pub mod telemetry;

pub use collector::{gather_text, register};
pub use config::{GaugeConfig, LogFormat, LoggingConfig};
pub use diagnostic::Diagnostic;
pub use error::{GaugeError, Result};
pub use gauge::{GaugeMap, GaugeVecMap, Labels, RecordRegistry};
pub use metadata::{FieldEntry, Metadata, field_map, walk, walk_value};
pub use record::{Field, FieldKind, GaugeField, Record, parse_tag};
pub use value::{FieldValue, to_float};
