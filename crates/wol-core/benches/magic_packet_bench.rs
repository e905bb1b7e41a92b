//! Criterion benchmarks for magic packet construction.
//!
//! Run with:
//! ```bash
//! cargo bench --package wol-core --bench magic_packet_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wol_core::{MacAddress, MagicPacket};

fn bench_parse_mac(c: &mut Criterion) {
    c.bench_function("parse_mac", |b| {
        b.iter(|| MacAddress::parse(black_box("e0:d5:5e:6e:30:c9")))
    });
}

fn bench_build_and_serialize(c: &mut Criterion) {
    c.bench_function("build_and_serialize", |b| {
        b.iter(|| {
            MagicPacket::build(black_box("E0-D5-5E-6E-30-C9"))
                .map(|packet| packet.to_bytes())
        })
    });
}

fn bench_serialize_only(c: &mut Criterion) {
    let packet = MagicPacket::build("e0:d5:5e:6e:30:c9").expect("valid mac");
    c.bench_function("serialize_only", |b| b.iter(|| black_box(&packet).to_bytes()));
}

criterion_group!(
    benches,
    bench_parse_mac,
    bench_build_and_serialize,
    bench_serialize_only
);
criterion_main!(benches);
