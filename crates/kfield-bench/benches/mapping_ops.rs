//! Criterion micro-benchmarks for coordinate mappings.

use criterion::{criterion_group, criterion_main, Criterion};
use kfield_bench::{focusing_pulse, tight_focusing_chain, FocusingScenario};
use kfield_core::{Axis, Vec3};
use kfield_mapping::{set_em_field, MappedGrid, MappingChain, Rotation, Scale, Shift};
use std::hint::black_box;

/// Benchmark: forward + inverse through a three-stage affine chain for
/// 10K points.
fn bench_affine_chain(c: &mut Criterion) {
    let mut chain = MappingChain::new();
    chain.push(Shift::new(Vec3::new(1.0, -2.0, 0.5)));
    chain.push(Rotation::new(Axis::Z, 0.3).unwrap());
    chain.push(Scale::new(Axis::Y, 2.0).unwrap());
    let points: Vec<Vec3> = (0..10_000)
        .map(|i| Vec3::new(i as f64 * 1e-3, (i % 97) as f64, (i % 13) as f64))
        .collect();

    c.bench_function("affine_chain_10k", |b| {
        b.iter(|| {
            for p in &points {
                let f = chain.forward(*p, 0.0).unwrap();
                black_box(chain.inverse(f.coords, 0.0));
            }
        });
    });
}

/// Benchmark: initialise a 32³ grid through the tight-focusing chain.
fn bench_tight_focusing_init(c: &mut Criterion) {
    let scenario = FocusingScenario {
        cells: [32, 32, 32],
        ..Default::default()
    };
    let chain = tight_focusing_chain(&scenario).unwrap();
    let mut grid = scenario.grid().unwrap();

    c.bench_function("tight_focusing_init_32", |b| {
        b.iter(|| {
            set_em_field(&mut grid, &chain, |r| focusing_pulse(&scenario, r)).unwrap();
            black_box(&grid);
        });
    });
}

/// Benchmark: sample E through the tight-focusing chain along a line.
fn bench_mapped_lookup(c: &mut Criterion) {
    let scenario = FocusingScenario {
        cells: [32, 32, 32],
        ..Default::default()
    };
    let chain = tight_focusing_chain(&scenario).unwrap();
    let mut grid = scenario.grid().unwrap();
    set_em_field(&mut grid, &chain, |r| focusing_pulse(&scenario, r)).unwrap();
    let view = MappedGrid::new(&grid, &chain);
    let lambda = scenario.wavelength;

    c.bench_function("mapped_lookup_1k", |b| {
        b.iter(|| {
            for i in 0..1000 {
                let x = -20.0 * lambda + i as f64 * 0.02 * lambda;
                black_box(view.e(Vec3::new(x, 0.5 * lambda, 0.0)));
            }
        });
    });
}

criterion_group!(
    benches,
    bench_affine_chain,
    bench_tight_focusing_init,
    bench_mapped_lookup,
);
criterion_main!(benches);
