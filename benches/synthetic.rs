use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use fortune::{generators, sweep};

fn random_sites(c: &mut Criterion) {
    let mut group = c.benchmark_group("random sites");
    for n in [100, 1_000, 10_000] {
        let sites = generators::random(n, 1000.0, 0);
        group.bench_with_input(BenchmarkId::from_parameter(n), &sites, |b, sites| {
            b.iter(|| black_box(sweep(sites.iter().copied(), f64::NEG_INFINITY)))
        });
    }
    group.finish();
}

fn grids(c: &mut Criterion) {
    // Regular grids have lots of simultaneous circle events.
    let sites = generators::grid(30, 10.0);
    c.bench_function("grid", |b| {
        b.iter(|| black_box(sweep(sites.iter().copied(), f64::NEG_INFINITY)))
    });

    let sites = generators::staggered_grid(30, 10.0);
    c.bench_function("staggered grid", |b| {
        b.iter(|| black_box(sweep(sites.iter().copied(), f64::NEG_INFINITY)))
    });
}

fn partial(c: &mut Criterion) {
    let sites = generators::random(1_000, 1000.0, 1);
    c.bench_function("stop halfway", |b| {
        b.iter(|| black_box(sweep(sites.iter().copied(), 500.0)))
    });
}

criterion_group!(benches, random_sites, grids, partial);
criterion_main!(benches);
