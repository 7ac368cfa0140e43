//! Criterion benchmarks for the flat 3x3 SVD.
//! Focus: iteration budgets {4, 10, 20} on random dense and rank-deficient inputs.
//! Results: by default under target/criterion; to store under data/bench, run:
//!   CARGO_TARGET_DIR=data/bench cargo bench -p geomath

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use geomath::mat3::{mult3, svd3, Mat3, IDENTITY3};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_mat3(rng: &mut StdRng) -> Mat3 {
    let mut m = [0.0; 9];
    for x in &mut m {
        *x = rng.gen_range(-1.0..1.0);
    }
    m
}

fn rank_two(rng: &mut StdRng) -> Mat3 {
    // Third column zeroed.
    let a = random_mat3(rng);
    let mut p = [0.0; 9];
    p[0] = 1.0;
    p[4] = 1.0;
    mult3(&a, &p)
}

fn bench_svd3(c: &mut Criterion) {
    let mut group = c.benchmark_group("svd3");
    for &iters in &[4u32, 10, 20] {
        group.bench_with_input(BenchmarkId::new("dense", iters), &iters, |b, &iters| {
            let mut rng = StdRng::seed_from_u64(41);
            b.iter_batched(
                || random_mat3(&mut rng),
                |a| {
                    let (mut u, mut s, mut v) = (IDENTITY3, IDENTITY3, IDENTITY3);
                    svd3(&a, iters, &mut u, &mut s, &mut v);
                    (u, s, v)
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_with_input(BenchmarkId::new("rank_two", iters), &iters, |b, &iters| {
            let mut rng = StdRng::seed_from_u64(42);
            b.iter_batched(
                || rank_two(&mut rng),
                |a| {
                    let (mut u, mut s, mut v) = (IDENTITY3, IDENTITY3, IDENTITY3);
                    svd3(&a, iters, &mut u, &mut s, &mut v);
                    (u, s, v)
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_svd3);
criterion_main!(benches);
