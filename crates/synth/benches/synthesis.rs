//! Benchmarks for DEM synthesis

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use seisdem_core::{Extent, Resolution};
use seisdem_synth::{build_dem, DemParams};

fn bench_build_dem(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_dem");

    for size in [64usize, 256, 1024].iter() {
        let params = DemParams::new(
            Extent::new(0.0, *size as f64, 0.0, *size as f64).unwrap(),
            Resolution::square(1.0).unwrap(),
        )
        .with_seed(1);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| build_dem(black_box(&params)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build_dem);
criterion_main!(benches);
