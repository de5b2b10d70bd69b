//! Benchmarks for tscolumns store operations

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use tscolumns::{ColumnStore, Value};

const ROWS: i64 = 10_000;
const KEYS: [&str; 2] = ["time", "price"];

/// Deterministic scatter of index values in 0..ROWS
fn scattered(i: i64) -> i64 {
    (i * 7_919) % ROWS
}

fn build(rows: i64, order: fn(i64) -> i64) -> ColumnStore {
    ColumnStore::from_rows(
        &KEYS,
        "time",
        (0..rows).map(|i| vec![Value::Int(order(i)), Value::Float(i as f64)]),
    )
    .expect("valid rows")
}

fn store_benchmarks(c: &mut Criterion) {
    c.bench_function("add_row_sequential", |b| {
        b.iter(|| black_box(build(ROWS, |i| i)))
    });

    c.bench_function("add_row_scattered", |b| {
        b.iter(|| black_box(build(ROWS, scattered)))
    });

    let store = build(ROWS, scattered);

    c.bench_function("loc_range", |b| {
        b.iter(|| {
            black_box(
                store
                    .loc()
                    .range(Some(&Value::Int(2_000)), Some(&Value::Int(2_500))),
            )
        })
    });

    c.bench_function("iloc_tail", |b| b.iter(|| black_box(store.iloc().slice(-8..))));

    c.bench_function("merge", |b| {
        let other = build(ROWS, |i| scattered(i) + 1);
        b.iter_batched(
            || store.clone(),
            |mut target| {
                target.merge(&other).expect("same columns");
                target
            },
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, store_benchmarks);
criterion_main!(benches);
