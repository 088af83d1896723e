// Criterion benchmarks for expression parsing

use boolex_parser::{parse, Registry, VarType};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::time::Duration;

/// Registry with one variable of every type plus `count` filler booleans
fn create_registry(count: usize) -> Registry {
    let mut registry = Registry::new();
    registry.declare("on", VarType::Boolean);
    registry.declare("off", VarType::Boolean);
    registry.declare("width", VarType::Integer);
    registry.declare("ratio", VarType::Real);
    registry.declare("user", VarType::String);
    registry.declare("segments", VarType::Integers);
    registry.declare("nodes", VarType::Strings);
    for i in 0..count {
        registry.declare(&format!("flag_{}", i), VarType::Boolean);
    }
    registry
}

const MIXED: &str = "on and (width > 5 or 0.5 <= ratio) and not user in ('a', 'b') \
                     && segments one of (1, 2, 3) || nodes is empty";

fn bench_single_predicate(c: &mut Criterion) {
    let registry = create_registry(0);

    c.bench_function("single_predicate", |b| {
        b.iter(|| parse(&registry, black_box("width >= 10")))
    });
}

fn bench_mixed_expression(c: &mut Criterion) {
    let registry = create_registry(0);

    c.bench_function("mixed_expression", |b| {
        b.iter(|| parse(&registry, black_box(MIXED)))
    });
}

/// Long conjunctions of boolean variables
fn bench_conjunction_length(c: &mut Criterion) {
    let registry = create_registry(1000);

    let mut group = c.benchmark_group("conjunction_length");
    for terms in [10, 100, 1000] {
        let text = (0..terms)
            .map(|i| format!("flag_{}", i))
            .collect::<Vec<_>>()
            .join(" and ");

        group.throughput(Throughput::Elements(terms as u64));
        group.bench_with_input(BenchmarkId::from_parameter(terms), &text, |b, text| {
            b.iter(|| parse(&registry, black_box(text)))
        });
    }
    group.finish();
}

/// Lookup cost as the registry grows
fn bench_registry_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry_size");
    for size in [10, 1_000, 100_000] {
        let registry = create_registry(size);

        group.bench_with_input(BenchmarkId::from_parameter(size), &registry, |b, registry| {
            b.iter(|| parse(registry, black_box(MIXED)))
        });
    }
    group.finish();
}

fn configure_criterion() -> Criterion {
    Criterion::default()
        .sample_size(100)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = configure_criterion();
    targets =
        bench_single_predicate,
        bench_mixed_expression,
        bench_conjunction_length,
        bench_registry_size,
}

criterion_main!(benches);
