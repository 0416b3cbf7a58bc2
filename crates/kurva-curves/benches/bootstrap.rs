//! Benchmarks for curve bootstrapping.
//!
//! Run with: cargo bench -p kurva-curves

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use kurva_curves::prelude::*;

// =============================================================================
// TEST DATA
// =============================================================================

const SEK_CONFIG: &str = include_str!("../tests/data/sek_stibor6m.toml");

fn sek_builder() -> CurveBuilder {
    CurveConfig::from_toml_str(SEK_CONFIG)
        .and_then(|config| config.to_builder())
        .expect("benchmark config is valid")
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_sek_methods(c: &mut Criterion) {
    let mut group = c.benchmark_group("sek_bootstrap");
    group.sample_size(50);

    let sequential = sek_builder().with_method(BootstrapMethod::Sequential);
    let hybrid = sequential.clone().with_root_search(RootSearch::Hybrid);
    let global = sek_builder().with_method(BootstrapMethod::GlobalLeastSquares);

    group.bench_function("sequential_brent", |b| b.iter(|| black_box(&sequential).build()));
    group.bench_function("sequential_hybrid", |b| b.iter(|| black_box(&hybrid).build()));
    group.bench_function("global_least_squares", |b| b.iter(|| black_box(&global).build()));
    group.finish();
}

fn bench_parallel_builds(c: &mut Criterion) {
    let mut group = c.benchmark_group("parallel_builds");
    group.sample_size(20);

    for size in [4usize, 16, 64] {
        let builders: Vec<CurveBuilder> = (0..size).map(|_| sek_builder()).collect();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &builders, |b, builders| {
            b.iter(|| build_curves_parallel(black_box(builders)));
        });
    }
    group.finish();
}

fn bench_curve_queries(c: &mut Criterion) {
    let result = sek_builder().build().expect("SEK curve builds");
    let curve = result.curve;
    let dates = curve.pillar_dates().to_vec();

    c.bench_function("zero_rate_table_16", |b| {
        b.iter(|| {
            zero_rate_table(
                black_box(&curve),
                black_box(&dates),
                kurva_core::daycounts::DayCountConvention::Act365Fixed,
            )
        });
    });
}

criterion_group!(benches, bench_sek_methods, bench_parallel_builds, bench_curve_queries);
criterion_main!(benches);
