//! 3x3 matrix kernels on flat row-major buffers, and a fixed-cost SVD.
//!
//! Purpose
//! - Allocation-free primitives (products, transpose, determinant, Givens
//!   rotations, column swap/negate) for hot numeric loops.
//! - `svd3`: Jacobi eigen-iteration on `AᵗA` plus a Givens QR cleanup,
//!   producing `A ≈ U Σ Vᵗ` for any 3x3 input, including singular ones.
//!
//! Conventions
//! - `Mat3 = [f64; 9]`, index `(row, col) = 3*row + col`.
//! - Products return new arrays; rotations and column edits mutate in place.
//! - Tolerances are fixed constants (`cfg`), not configuration.

pub mod cfg;
mod ops;
mod svd;

pub use cfg::DEFAULT_ITERATIONS;
pub use ops::{
    column_norm_sq3, det3, from_matrix3, idx3, mult3, mult3_both_transpose, mult3_left_transpose,
    mult3_right_transpose, post_mult3_givens, pre_mult3_givens, set_givens3, swap_negate_column,
    to_matrix3, transpose3, Mat3, IDENTITY3,
};
pub use svd::{apply_jacobi3, svd3, Svd3};

#[cfg(test)]
mod tests;
