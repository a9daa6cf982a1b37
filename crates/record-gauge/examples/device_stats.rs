//! Device statistics export example.
//!
//! This example derives nested records for a mining device, builds gauges for
//! them once, and refreshes the gauges from later snapshots.
//!
//! Run with: `cargo run --example device_stats --features logging`

use std::collections::HashMap;

use prometheus::Registry;
use record_gauge::prelude::*;
use record_gauge::telemetry::init_logging;
use record_gauge::{gather_text, register};

#[derive(Record)]
struct DevCommon {
    #[gauge(tag = "Name,string", rename = "Name")]
    name: String,
    #[gauge(tag = "Temperature", rename = "Temp")]
    temp: f64,
    #[gauge(tag = "Fan speed %", rename = "Fan")]
    fan: u32,
}

#[derive(Record)]
#[gauge(name = "ChipStat")]
struct ChipStat {
    common: DevCommon,
    accept: HashMap<String, i64>,
    #[gauge(tag = "Status")]
    status: String,
}

fn snapshot(tick: i64) -> ChipStat {
    ChipStat {
        common: DevCommon {
            name: "ttsy1".into(),
            temp: 58.0 + tick as f64,
            fan: 40 + u32::try_from(tick).unwrap_or(0),
        },
        accept: HashMap::from([
            ("chip0".to_string(), 100 * tick),
            ("chip1".to_string(), 90 * tick),
        ]),
        status: if tick % 2 == 0 { "Alive" } else { "no" }.into(),
    }
}

fn main() -> Result<()> {
    let mut config = GaugeConfig::from_env(record_gauge::config::DEFAULT_PREFIX);
    if config.namespace.is_empty() {
        config.namespace = "miner".into();
    }
    init_logging(&config.logging)?;

    println!("record-gauge Device Stats Example");
    println!("=================================\n");

    let first = snapshot(0);
    let records = RecordRegistry::build(&[&first], &config)?;

    let registry = Registry::new();
    register(&registry, &records)?;

    for tick in 1..=3 {
        let stat = snapshot(tick);
        for diagnostic in records.set_values(&[&stat]) {
            println!("   diagnostic: {diagnostic}");
        }
    }

    println!("{}", gather_text(&registry)?);
    Ok(())
}
