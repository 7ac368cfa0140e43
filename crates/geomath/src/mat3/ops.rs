//! Flat row-major 3x3 kernels.
//!
//! Every function reads all the entries it needs into locals before writing,
//! so in-place updates (`*m = mult3(m, r)`) are safe and nothing allocates.

use nalgebra::Matrix3;

/// Row-major 3x3 matrix, `m[3 * row + col]`.
pub type Mat3 = [f64; 9];

pub const IDENTITY3: Mat3 = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];

/// Flat index of `(row, col)`.
#[inline]
pub const fn idx3(row: usize, col: usize) -> usize {
    3 * row + col
}

/// `left · right`.
pub fn mult3(left: &Mat3, right: &Mat3) -> Mat3 {
    let [a00, a01, a02, a10, a11, a12, a20, a21, a22] = *left;
    let [b00, b01, b02, b10, b11, b12, b20, b21, b22] = *right;
    [
        a00 * b00 + a01 * b10 + a02 * b20,
        a00 * b01 + a01 * b11 + a02 * b21,
        a00 * b02 + a01 * b12 + a02 * b22,
        a10 * b00 + a11 * b10 + a12 * b20,
        a10 * b01 + a11 * b11 + a12 * b21,
        a10 * b02 + a11 * b12 + a12 * b22,
        a20 * b00 + a21 * b10 + a22 * b20,
        a20 * b01 + a21 * b11 + a22 * b21,
        a20 * b02 + a21 * b12 + a22 * b22,
    ]
}

/// `leftᵗ · right`.
pub fn mult3_left_transpose(left: &Mat3, right: &Mat3) -> Mat3 {
    let [a00, a01, a02, a10, a11, a12, a20, a21, a22] = *left;
    let [b00, b01, b02, b10, b11, b12, b20, b21, b22] = *right;
    [
        a00 * b00 + a10 * b10 + a20 * b20,
        a00 * b01 + a10 * b11 + a20 * b21,
        a00 * b02 + a10 * b12 + a20 * b22,
        a01 * b00 + a11 * b10 + a21 * b20,
        a01 * b01 + a11 * b11 + a21 * b21,
        a01 * b02 + a11 * b12 + a21 * b22,
        a02 * b00 + a12 * b10 + a22 * b20,
        a02 * b01 + a12 * b11 + a22 * b21,
        a02 * b02 + a12 * b12 + a22 * b22,
    ]
}

/// `left · rightᵗ`.
pub fn mult3_right_transpose(left: &Mat3, right: &Mat3) -> Mat3 {
    let [a00, a01, a02, a10, a11, a12, a20, a21, a22] = *left;
    let [b00, b01, b02, b10, b11, b12, b20, b21, b22] = *right;
    [
        a00 * b00 + a01 * b01 + a02 * b02,
        a00 * b10 + a01 * b11 + a02 * b12,
        a00 * b20 + a01 * b21 + a02 * b22,
        a10 * b00 + a11 * b01 + a12 * b02,
        a10 * b10 + a11 * b11 + a12 * b12,
        a10 * b20 + a11 * b21 + a12 * b22,
        a20 * b00 + a21 * b01 + a22 * b02,
        a20 * b10 + a21 * b11 + a22 * b12,
        a20 * b20 + a21 * b21 + a22 * b22,
    ]
}

/// `leftᵗ · rightᵗ`.
pub fn mult3_both_transpose(left: &Mat3, right: &Mat3) -> Mat3 {
    let [a00, a01, a02, a10, a11, a12, a20, a21, a22] = *left;
    let [b00, b01, b02, b10, b11, b12, b20, b21, b22] = *right;
    [
        a00 * b00 + a10 * b01 + a20 * b02,
        a00 * b10 + a10 * b11 + a20 * b12,
        a00 * b20 + a10 * b21 + a20 * b22,
        a01 * b00 + a11 * b01 + a21 * b02,
        a01 * b10 + a11 * b11 + a21 * b12,
        a01 * b20 + a11 * b21 + a21 * b22,
        a02 * b00 + a12 * b01 + a22 * b02,
        a02 * b10 + a12 * b11 + a22 * b12,
        a02 * b20 + a12 * b21 + a22 * b22,
    ]
}

pub fn transpose3(m: &Mat3) -> Mat3 {
    let [m00, m01, m02, m10, m11, m12, m20, m21, m22] = *m;
    [m00, m10, m20, m01, m11, m21, m02, m12, m22]
}

/// Scalar triple product of the rows.
pub fn det3(m: &Mat3) -> f64 {
    let [m00, m01, m02, m10, m11, m12, m20, m21, m22] = *m;
    m00 * (m11 * m22 - m12 * m21) - m01 * (m10 * m22 - m12 * m20)
        + m02 * (m10 * m21 - m11 * m20)
}

/// Identity with the `(idx0, idx1)` plane replaced by `[[c, s], [-s, c]]`.
pub fn set_givens3(c: f64, s: f64, idx0: usize, idx1: usize) -> Mat3 {
    debug_assert!(idx0 < idx1 && idx1 < 3, "givens plane ({idx0}, {idx1})");
    let mut g = IDENTITY3;
    g[idx3(idx0, idx0)] = c;
    g[idx3(idx1, idx1)] = c;
    g[idx3(idx0, idx1)] = s;
    g[idx3(idx1, idx0)] = -s;
    g
}

/// `m ← G · m` for `G = set_givens3(c, s, idx0, idx1)`, touching only rows
/// `idx0` and `idx1`. Bit-identical to `mult3(&G, m)`.
pub fn pre_mult3_givens(m: &mut Mat3, c: f64, s: f64, idx0: usize, idx1: usize) {
    debug_assert!(idx0 < idx1 && idx1 < 3, "givens plane ({idx0}, {idx1})");
    for col in 0..3 {
        let a = m[idx3(idx0, col)];
        let b = m[idx3(idx1, col)];
        m[idx3(idx0, col)] = c * a + s * b;
        m[idx3(idx1, col)] = -s * a + c * b;
    }
}

/// `m ← m · Gᵗ` for `G = set_givens3(c, s, idx0, idx1)`, touching only columns
/// `idx0` and `idx1`. Bit-identical to `mult3_right_transpose(m, &G)`.
pub fn post_mult3_givens(m: &mut Mat3, c: f64, s: f64, idx0: usize, idx1: usize) {
    debug_assert!(idx0 < idx1 && idx1 < 3, "givens plane ({idx0}, {idx1})");
    for row in 0..3 {
        let a = m[idx3(row, idx0)];
        let b = m[idx3(row, idx1)];
        m[idx3(row, idx0)] = c * a + s * b;
        m[idx3(row, idx1)] = -s * a + c * b;
    }
}

/// Exchange columns `idx0` and `idx1`, then negate the new column `idx1`.
/// The determinant keeps its sign.
pub fn swap_negate_column(m: &mut Mat3, idx0: usize, idx1: usize) {
    for row in 0..3 {
        let a = m[idx3(row, idx0)];
        let b = m[idx3(row, idx1)];
        m[idx3(row, idx0)] = b;
        m[idx3(row, idx1)] = -a;
    }
}

/// Squared Euclidean norm of column `col`.
#[inline]
pub fn column_norm_sq3(m: &Mat3, col: usize) -> f64 {
    let a = m[idx3(0, col)];
    let b = m[idx3(1, col)];
    let c = m[idx3(2, col)];
    a * a + b * b + c * c
}

pub fn to_matrix3(m: &Mat3) -> Matrix3<f64> {
    Matrix3::from_row_slice(m)
}

pub fn from_matrix3(m: &Matrix3<f64>) -> Mat3 {
    let mut out = [0.0; 9];
    for row in 0..3 {
        for col in 0..3 {
            out[idx3(row, col)] = m[(row, col)];
        }
    }
    out
}
