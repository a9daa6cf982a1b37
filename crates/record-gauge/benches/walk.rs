//! Flatten, build and refresh benchmarks.
#![allow(missing_docs)]

use std::collections::HashMap;
use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use record_gauge::{GaugeMap, GaugeVecMap, Labels, Metadata, Record, naming};

#[derive(Record)]
struct Board {
    #[gauge(tag = "Temp %")]
    temp: f64,
    #[gauge(tag = "Status,string")]
    status: String,
    errors: u64,
}

#[derive(Record)]
struct Miner {
    board: Board,
    accepted: HashMap<String, i64>,
    uptime: u64,
}

fn miner(keys: usize) -> Miner {
    Miner {
        board: Board {
            temp: 61.5,
            status: "alive".into(),
            errors: 3,
        },
        accepted: (0..keys).map(|i| (format!("chip_{i}"), i as i64)).collect(),
        uptime: 86_400,
    }
}

fn bench_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("walk");

    for keys in [4, 64, 512] {
        let record = miner(keys);
        group.bench_with_input(BenchmarkId::from_parameter(keys), &record, |b, record| {
            b.iter(|| Metadata::from_record(black_box(record)));
        });
    }

    group.finish();
}

fn bench_build(c: &mut Criterion) {
    let meta = Metadata::from_record(&miner(64));
    let labels = Labels::new();

    c.bench_function("build_gauge_map", |b| {
        b.iter(|| GaugeMap::build(black_box(&meta), "bench", &labels));
    });

    c.bench_function("build_gauge_vec_map", |b| {
        b.iter(|| GaugeVecMap::build(black_box(&meta), "bench", &["worker"], &labels));
    });
}

fn bench_set_values(c: &mut Criterion) {
    let meta = Metadata::from_record(&miner(64));
    let gauges = GaugeMap::build(&meta, "bench", &Labels::new()).unwrap();
    let vectors = GaugeVecMap::build(&meta, "bench", &["worker"], &Labels::new()).unwrap();

    c.bench_function("set_gauge_map", |b| {
        b.iter(|| gauges.set_values(black_box(&meta), "bench"));
    });

    c.bench_function("set_gauge_vec_map", |b| {
        b.iter(|| vectors.set_values(black_box(&meta), "bench", &["w0"]));
    });
}

fn bench_sanitize(c: &mut Criterion) {
    c.bench_function("sanitize", |b| {
        b.iter(|| naming::sanitize(black_box("Hash rate % of pool %total")));
    });
}

criterion_group!(
    benches,
    bench_walk,
    bench_build,
    bench_set_values,
    bench_sanitize
);
criterion_main!(benches);
