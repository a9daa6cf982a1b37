//! Convenient re-exports for common record-gauge usage.
//!
//! ```rust
//! use record_gauge::prelude::*;
//!
//! #[derive(Record)]
//! struct Fan {
//!     rpm: u32,
//! }
//!
//! let registry = RecordRegistry::build(&[&Fan { rpm: 900 }], &GaugeConfig::new("rack")).unwrap();
//! assert_eq!(registry.len(), 1);
//! ```

pub use crate::Record;
pub use crate::config::GaugeConfig;
pub use crate::diagnostic::Diagnostic;
pub use crate::error::{GaugeError, Result};
pub use crate::gauge::{GaugeMap, GaugeVecMap, Labels, RecordRegistry};
pub use crate::metadata::Metadata;
pub use crate::record::{FieldKind, GaugeField};
pub use crate::value::FieldValue;
