//! Benchmarks for tag reconciliation
//!
//! Measures performance of:
//! - Tag set comparison at growing set sizes
//! - Classification of a single node
//! - Candidate selection over many nearby nodes

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use waymark_core::{classify, compare, select_for_waypoint, CandidateNode, Schema, TagSet};

fn tags(n: usize, offset: usize) -> TagSet {
    (0..n)
        .map(|i| (format!("key{}", i), format!("value{}", (i + offset) % 3)))
        .collect()
}

/// Benchmark comparison with partial overlap
fn bench_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare");

    for &size in &[1usize, 4, 16, 64, 256] {
        let observed = tags(size, 0);
        let expected = tags(size, 1);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| compare(black_box(&observed), black_box(&expected)))
        });
    }
    group.finish();
}

/// Benchmark classification of typical bus stop tagging
fn bench_classify(c: &mut Criterion) {
    let expected = TagSet::from([
        ("public_transport", "platform"),
        ("bench", "yes"),
        ("shelter", "yes"),
        ("bus", "yes"),
    ]);
    let partial = TagSet::from([
        ("public_transport", "platform"),
        ("bench", "yes"),
        ("shelter", "yes"),
    ]);

    c.bench_function("classify_info", |b| {
        b.iter(|| classify(black_box(&expected), black_box(&expected)))
    });
    c.bench_function("classify_edit", |b| {
        b.iter(|| classify(black_box(&partial), black_box(&expected)))
    });
}

/// Benchmark selection where the only matching node comes last
fn bench_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_for_waypoint");
    let expected = TagSet::from([("highway", "bus_stop"), ("shelter", "yes")]);
    let schema = Schema::new(None, [("parada", expected.clone())]);

    for &count in &[1usize, 10, 100, 1000] {
        let mut nodes: Vec<_> = (0..count as i64 - 1)
            .map(|id| CandidateNode::new(id, TagSet::from([("amenity", "bench")])))
            .collect();
        nodes.push(CandidateNode::new(count as i64, expected.clone()));

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &nodes, |b, nodes| {
            b.iter(|| select_for_waypoint(black_box("parada"), &schema, nodes))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_compare, bench_classify, bench_select);
criterion_main!(benches);
