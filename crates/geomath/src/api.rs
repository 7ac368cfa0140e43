//! Curated API for the CLI, benches and examples (UNSTABLE).
//!
//! Important
//! - Not a stability promise; breaking changes are allowed.
//! - Prefer these re-exports for consistency across callers.

// 3x3 kernels and SVD
pub use crate::mat3::{
    apply_jacobi3, det3, from_matrix3, mult3, mult3_right_transpose, svd3, to_matrix3,
    transpose3, Mat3, Svd3, DEFAULT_ITERATIONS, IDENTITY3,
};
// Sweep-line triangulation
pub use crate::delaunay::{
    point_in_circle_from_points, signed_area, DelaunayError, DelaunayTriangulation, SweepCfg,
    VertexId,
};
pub use crate::bounds::Bounds2;

/// Triangulate with default settings and return `(triangles, hull)` as input
/// indices.
pub fn triangulate_indices(
    points: &[nalgebra::Vector2<f64>],
    constraints: &[(usize, usize)],
) -> Result<(Vec<[usize; 3]>, Vec<usize>), DelaunayError> {
    let dt = DelaunayTriangulation::triangulate(points, constraints)?;
    let hull = dt.convex_hull().iter().map(|v| v.0).collect();
    Ok((dt.triangle_indices(), hull))
}

/// Singular values of a row-major 3x3 matrix, descending.
pub fn singular_values3(a: &Mat3) -> [f64; 3] {
    Svd3::new(a).singular_values()
}
