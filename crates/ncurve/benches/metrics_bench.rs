//! Criterion benchmarks for curve construction and metric recomputation.
//! Focus sizes: n in {10, 100, 1000, 10000}.
//! Results land under target/criterion.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use ncurve::curve::CurveMetrics;
use ncurve::rand::{draw_monotone_curve, MonotoneCfg, ReplayToken};

fn sample(n: usize, seed: u64) -> ncurve::Curve {
    let cfg = MonotoneCfg {
        point_count: n,
        ..MonotoneCfg::default()
    };
    draw_monotone_curve(cfg, ReplayToken { seed, index: 0 })
}

fn bench_metrics(c: &mut Criterion) {
    let mut group = c.benchmark_group("curve");
    for &n in &[10usize, 100, 1000, 10000] {
        group.bench_with_input(BenchmarkId::new("compute_metrics", n), &n, |b, &n| {
            let curve = sample(n, 43);
            b.iter(|| CurveMetrics::compute(curve.points().as_slice()))
        });

        // Every push recomputes, so building is quadratic in n.
        if n <= 1000 {
            group.bench_with_input(BenchmarkId::new("rebuild_by_push", n), &n, |b, &n| {
                b.iter_batched(
                    || sample(n, 44).iter().collect::<Vec<_>>(),
                    |pts| {
                        let mut c = ncurve::Curve::new();
                        for p in pts {
                            let _ = c.push(p);
                        }
                        c
                    },
                    BatchSize::SmallInput,
                )
            });
        }

        group.bench_with_input(BenchmarkId::new("shift", n), &n, |b, &n| {
            b.iter_batched(
                || sample(n, 45),
                |mut curve| {
                    let _ = curve.shift(0.3, -0.2);
                    curve
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_metrics);
criterion_main!(benches);
