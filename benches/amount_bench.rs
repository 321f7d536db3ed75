//! Amount Codec Benchmarks — Input Path Performance
//!
//! Benchmarks the conversions that run on every submitted action and
//! every displayed dataset.
//!
//! Run with: cargo bench --bench amount_bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use alloy::primitives::{address, U256};

use dataset_marketplace_client::domain::amount::{format_ether, parse_ether};
use dataset_marketplace_client::domain::dataset::{parse_dataset_id, Dataset, DatasetView};

/// Benchmark parsing a typical user-entered price.
fn bench_parse_ether(c: &mut Criterion) {
    c.bench_function("parse_ether_fractional", |b| {
        b.iter(|| {
            let _wei = parse_ether(black_box("1234.567890123456789"));
        });
    });
}

/// Benchmark formatting a wei amount for display.
fn bench_format_ether(c: &mut Criterion) {
    let wei = U256::from(1_234_567_890_123_456_789_000u128);

    c.bench_function("format_ether", |b| {
        b.iter(|| {
            let _text = format_ether(black_box(wei));
        });
    });
}

/// Benchmark dataset id parsing in both accepted spellings.
fn bench_parse_dataset_id(c: &mut Criterion) {
    c.bench_function("parse_dataset_id_decimal", |b| {
        b.iter(|| {
            let _id = parse_dataset_id(black_box("421337"));
        });
    });

    c.bench_function("parse_dataset_id_hex", |b| {
        b.iter(|| {
            let _id = parse_dataset_id(black_box("0x66e19"));
        });
    });
}

/// Benchmark building the display projection of a dataset record.
fn bench_dataset_view(c: &mut Criterion) {
    let dataset = Dataset {
        id: U256::from(7),
        ipfs_hash: "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG".to_string(),
        owner: address!("70997970c51812dc3a010c7d01b50e0d17dc79c8"),
        price: U256::from(250_000_000_000_000_000u64),
        is_for_sale: true,
    };

    c.bench_function("dataset_view_new", |b| {
        b.iter(|| {
            let _view = DatasetView::new(black_box(&dataset), "ETH");
        });
    });
}

criterion_group!(
    benches,
    bench_parse_ether,
    bench_format_ether,
    bench_parse_dataset_id,
    bench_dataset_view,
);
criterion_main!(benches);
