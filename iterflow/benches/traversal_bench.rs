//! Benchmarks comparing each traversal protocol to a plain loop.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use iterflow::prelude::*;
use iterflow::testing::Universe;

fn drain<C: Continuation>(start: Option<C>) {
    let mut next = start;
    while let Some(cursor) = next {
        let (item, rest) = cursor.next();
        black_box(item);
        next = rest;
    }
}

fn sequence_benchmark(c: &mut Criterion) {
    let universe = Universe::standard();
    let sequence = universe.sequence();
    let mut group = c.benchmark_group("sequence");

    group.bench_function("loop", |b| {
        b.iter(|| {
            for item in sequence.as_slice() {
                black_box(item);
            }
        })
    });
    group.bench_function("continuation", |b| b.iter(|| drain(continuation::start(sequence))));
    group.bench_function("visitor", |b| {
        b.iter(|| visitor::for_each(sequence, |item| {
            black_box(item);
        }))
    });
    group.bench_function("channel", |b| {
        b.iter(|| {
            for item in channel::stream(sequence.clone(), None).unwrap() {
                black_box(item);
            }
        })
    });
    group.bench_function("channel_cancellable", |b| {
        b.iter(|| {
            let items = channel::stream(sequence.clone(), Some(CancellationToken::new())).unwrap();
            for item in items {
                black_box(item);
            }
        })
    });
    group.finish();
}

fn keys_benchmark(c: &mut Criterion) {
    let universe = Universe::standard();
    let keys = universe.keys();
    let mut group = c.benchmark_group("keys");

    group.bench_function("loop", |b| {
        b.iter(|| {
            for item in keys.iter() {
                black_box(item);
            }
        })
    });
    group.bench_function("continuation", |b| {
        b.iter(|| drain(continuation::start_keys(keys).unwrap()))
    });
    group.bench_function("visitor", |b| {
        b.iter(|| visitor::for_each(keys, |item| {
            black_box(item);
        }))
    });
    group.bench_function("channel", |b| {
        b.iter(|| {
            for item in channel::stream(keys.clone(), None).unwrap() {
                black_box(item);
            }
        })
    });
    group.finish();
}

criterion_group!(benches, sequence_benchmark, keys_benchmark);
criterion_main!(benches);
