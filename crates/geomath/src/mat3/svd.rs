//! 3x3 SVD from a fixed number of Jacobi sweeps plus a Givens QR pass.
//!
//! Model
//! - Diagonalize `S = AᵗA` with cyclic Jacobi rotations; the accumulated
//!   rotation `Q` converges to `Vᵗ`.
//! - `R = A·V` then has (nearly) orthogonal columns. Sort them by magnitude,
//!   then annihilate the strictly-lower part of `R` with Givens rotations; the
//!   accumulated rotations form `U` and `R` becomes `Σ`.
//! - No convergence test: cost is fixed by the sweep count, and singular or
//!   rank-deficient input still yields a defined (U, Σ, V).
//!
//! Conventions
//! - `Σ` is diagonal, nonnegative and descending. `V` is a rotation; `U` is
//!   orthogonal (a rotation unless `det(A) < 0`).

use nalgebra::Matrix3;

use super::cfg::{BIG_EPSILON, DEFAULT_ITERATIONS, QR_EPSILON, SQRT_HALF};
use super::ops::{
    column_norm_sq3, idx3, mult3, mult3_left_transpose, mult3_right_transpose,
    post_mult3_givens, pre_mult3_givens, swap_negate_column, to_matrix3, transpose3, Mat3,
    IDENTITY3,
};

/// Rotation `(cos, sin)` in the `(i, j)` plane zeroing `a12` of the symmetric
/// block `[[a11, a12], [a12, a22]]` under `G · S · Gᵗ`.
///
/// The angle is kept within ±45°: the exact closed form is used while
/// `a12² < (a11 − a22)²`, otherwise the rotation saturates at 45°.
pub(crate) fn jacobi_givens(a11: f64, a12: f64, a22: f64) -> (f64, f64) {
    if a12 == 0.0 {
        return (1.0, 0.0);
    }
    let d = a11 - a22;
    if a12 * a12 < d * d {
        // tan 2θ = 2·a12 / d, with cos 2θ >= 0.
        let h = (d * d + 4.0 * a12 * a12).sqrt();
        let cos2 = d.abs() / h;
        let sin2 = 2.0 * a12 * d.signum() / h;
        let c = ((1.0 + cos2) * 0.5).sqrt();
        (c, sin2 / (2.0 * c))
    } else if a12 * d < 0.0 {
        (SQRT_HALF, -SQRT_HALF)
    } else {
        (SQRT_HALF, SQRT_HALF)
    }
}

/// One Jacobi step on `s` (symmetric, updated as `G·s·Gᵗ`) targeting entry
/// `(idx0, idx1)`; the same rotation is pre-multiplied into `q`.
pub fn apply_jacobi3(s: &mut Mat3, q: &mut Mat3, idx0: usize, idx1: usize) {
    let a11 = s[idx3(idx0, idx0)];
    let a12 = s[idx3(idx0, idx1)];
    let a22 = s[idx3(idx1, idx1)];
    let (c, sn) = jacobi_givens(a11, a12, a22);
    pre_mult3_givens(s, c, sn, idx0, idx1);
    post_mult3_givens(s, c, sn, idx0, idx1);
    pre_mult3_givens(q, c, sn, idx0, idx1);
}

/// Rotation `(cos, sin)` mapping `(a, b)` onto `(‖(a, b)‖, 0)`.
#[inline]
fn qr_givens(a: f64, b: f64) -> (f64, f64) {
    let rho = (a * a + b * b).sqrt();
    if rho > QR_EPSILON {
        (a / rho, b / rho)
    } else {
        (1.0, 0.0)
    }
}

/// Reorder the columns of `r` (and `v` alongside) so their magnitudes descend.
fn sort_columns(r: &mut Mat3, v: &mut Mat3) {
    let mut m0 = column_norm_sq3(r, 0);
    let mut m1 = column_norm_sq3(r, 1);
    let mut m2 = column_norm_sq3(r, 2);
    if m0 < m1 {
        swap_negate_column(r, 0, 1);
        swap_negate_column(v, 0, 1);
        std::mem::swap(&mut m0, &mut m1);
    }
    if m0 < m2 {
        swap_negate_column(r, 0, 2);
        swap_negate_column(v, 0, 2);
        std::mem::swap(&mut m0, &mut m2);
    }
    if m1 < m2 {
        swap_negate_column(r, 1, 2);
        swap_negate_column(v, 1, 2);
    }
}

/// Annihilate `r[(1,0)]`, `r[(2,0)]`, `r[(2,1)]` in that order; returns the
/// orthogonal factor so that `r_in = U · r_out`.
fn qr_annihilate(r: &mut Mat3) -> Mat3 {
    let mut u = IDENTITY3;
    for (row, col) in [(1, 0), (2, 0), (2, 1)] {
        let (c, s) = qr_givens(r[idx3(col, col)], r[idx3(row, col)]);
        pre_mult3_givens(r, c, s, col, row);
        post_mult3_givens(&mut u, c, s, col, row);
    }
    u
}

/// SVD of `a` with `iterations` Jacobi sweeps: `a ≈ u · sigma · vᵗ`.
///
/// Output buffers are overwritten; callers can reuse them across calls.
pub fn svd3(a: &Mat3, iterations: u32, u: &mut Mat3, sigma: &mut Mat3, v: &mut Mat3) {
    // sigma doubles as scratch for AᵗA.
    *sigma = mult3_left_transpose(a, a);
    let mut q = IDENTITY3;
    for _ in 0..iterations {
        apply_jacobi3(sigma, &mut q, 0, 1);
        apply_jacobi3(sigma, &mut q, 0, 2);
        apply_jacobi3(sigma, &mut q, 1, 2);
    }
    *v = transpose3(&q);

    let mut r = mult3(a, v);
    sort_columns(&mut r, v);
    *u = qr_annihilate(&mut r);

    *sigma = [0.0; 9];
    for i in 0..3 {
        let d = r[idx3(i, i)];
        if d < 0.0 {
            sigma[idx3(i, i)] = -d;
            for row in 0..3 {
                u[idx3(row, i)] = -u[idx3(row, i)];
            }
        } else {
            sigma[idx3(i, i)] = d;
        }
    }

    for i in 0..3 {
        if column_norm_sq3(u, i) < BIG_EPSILON {
            u[idx3(i, i)] = 1.0;
        }
    }
}

/// Owned result of [`svd3`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Svd3 {
    pub u: Mat3,
    pub sigma: Mat3,
    pub v: Mat3,
}

impl Svd3 {
    /// Decompose with [`DEFAULT_ITERATIONS`] sweeps.
    pub fn new(a: &Mat3) -> Self {
        Self::with_iterations(a, DEFAULT_ITERATIONS)
    }

    pub fn with_iterations(a: &Mat3, iterations: u32) -> Self {
        let mut out = Self {
            u: IDENTITY3,
            sigma: IDENTITY3,
            v: IDENTITY3,
        };
        svd3(a, iterations, &mut out.u, &mut out.sigma, &mut out.v);
        out
    }

    /// Diagonal of `Σ`, descending.
    #[inline]
    pub fn singular_values(&self) -> [f64; 3] {
        [self.sigma[0], self.sigma[4], self.sigma[8]]
    }

    /// `U · Σ · Vᵗ`.
    pub fn reconstruct(&self) -> Mat3 {
        mult3_right_transpose(&mult3(&self.u, &self.sigma), &self.v)
    }

    /// Orthogonal polar factor `U · Vᵗ` (closest orthogonal matrix to `A`).
    pub fn rotation(&self) -> Mat3 {
        mult3_right_transpose(&self.u, &self.v)
    }

    /// `(U, Σ, V)` as nalgebra matrices.
    pub fn to_matrices(&self) -> (Matrix3<f64>, Matrix3<f64>, Matrix3<f64>) {
        (
            to_matrix3(&self.u),
            to_matrix3(&self.sigma),
            to_matrix3(&self.v),
        )
    }
}
