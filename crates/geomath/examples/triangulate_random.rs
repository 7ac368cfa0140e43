//! Time the sweep on random point clouds and print summary counts.
//!
//! Usage:
//!   cargo run -p geomath --release --example triangulate_random -- 10000
//!
//! Prints, per seed: n, triangles, hull size, and wall time. Euler's relation
//! for a triangulated convex region gives `triangles == 2n - h - 2`.

use geomath::delaunay::DelaunayTriangulation;
use nalgebra::Vector2;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::Instant;

fn main() {
    let n: usize = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(1_000);
    for seed in 0..5u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let pts: Vec<_> = (0..n)
            .map(|_| Vector2::new(rng.gen::<f64>(), rng.gen::<f64>()))
            .collect();
        let t0 = Instant::now();
        match DelaunayTriangulation::triangulate(&pts, &[]) {
            Ok(dt) => {
                let tris = dt.triangle_indices().len();
                let h = dt.convex_hull().len();
                println!(
                    "seed={seed} n={n} triangles={tris} hull={h} euler_ok={} time={:?}",
                    tris + h + 2 == 2 * n,
                    t0.elapsed()
                );
            }
            Err(e) => eprintln!("seed={seed} n={n} error: {e}"),
        }
    }
}
