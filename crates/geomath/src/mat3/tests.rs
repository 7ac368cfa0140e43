use super::*;
use approx::assert_relative_eq;
use nalgebra::Matrix3;
use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_mat3(rng: &mut StdRng) -> Mat3 {
    let mut m = [0.0; 9];
    for x in m.iter_mut() {
        *x = rng.gen_range(-1.0..1.0);
    }
    m
}

fn max_abs_diff(a: &Mat3, b: &Mat3) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

fn max_abs(a: &Mat3) -> f64 {
    a.iter().map(|x| x.abs()).fold(0.0, f64::max)
}

/// Reconstruction, orthogonality and ordering checks shared by all inputs.
fn check_svd(a: &Mat3, iterations: u32) {
    let svd = Svd3::with_iterations(a, iterations);
    let scale = max_abs(a).max(1.0);
    let err = max_abs_diff(&svd.reconstruct(), a);
    assert!(err <= 1e-9 * scale, "reconstruction error {err:e} for {a:?}");

    let uut = mult3_right_transpose(&svd.u, &svd.u);
    let vvt = mult3_right_transpose(&svd.v, &svd.v);
    assert!(max_abs_diff(&uut, &IDENTITY3) < 1e-9, "U not orthogonal: {uut:?}");
    assert!(max_abs_diff(&vvt, &IDENTITY3) < 1e-9, "V not orthogonal: {vvt:?}");

    for row in 0..3 {
        for col in 0..3 {
            if row != col {
                assert_eq!(svd.sigma[idx3(row, col)], 0.0);
            }
        }
    }
    let s = svd.singular_values();
    assert!(s.iter().all(|&x| x >= 0.0), "negative singular value {s:?}");
    assert!(s[0] + 1e-12 * scale >= s[1], "not descending {s:?}");
    assert!(s[1] + 1e-12 * scale >= s[2], "not descending {s:?}");
}

#[test]
fn products_match_nalgebra() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let a = random_mat3(&mut rng);
        let b = random_mat3(&mut rng);
        let (na, nb) = (to_matrix3(&a), to_matrix3(&b));
        let cases = [
            (mult3(&a, &b), na * nb),
            (mult3_left_transpose(&a, &b), na.transpose() * nb),
            (mult3_right_transpose(&a, &b), na * nb.transpose()),
            (mult3_both_transpose(&a, &b), na.transpose() * nb.transpose()),
        ];
        for (flat, expected) in cases {
            assert!(max_abs_diff(&flat, &from_matrix3(&expected)) < 1e-14);
        }
        assert_relative_eq!(det3(&a), na.determinant(), epsilon = 1e-14);
        assert_eq!(to_matrix3(&transpose3(&a)), na.transpose());
    }
}

#[test]
fn transposed_products_agree_bitwise() {
    let mut rng = StdRng::seed_from_u64(8);
    let a = random_mat3(&mut rng);
    let b = random_mat3(&mut rng);
    assert_eq!(mult3_left_transpose(&a, &b), mult3(&transpose3(&a), &b));
    assert_eq!(mult3_right_transpose(&a, &b), mult3(&a, &transpose3(&b)));
    assert_eq!(
        mult3_both_transpose(&a, &b),
        mult3(&transpose3(&a), &transpose3(&b))
    );
}

#[test]
fn in_place_product_reuses_buffer() {
    let mut rng = StdRng::seed_from_u64(9);
    let mut a = random_mat3(&mut rng);
    let b = random_mat3(&mut rng);
    let expected = mult3(&a, &b);
    a = mult3(&a, &b);
    assert_eq!(a, expected);
}

#[test]
fn givens_application_is_bit_identical_to_full_product() {
    let mut rng = StdRng::seed_from_u64(11);
    for (i0, i1) in [(0, 1), (0, 2), (1, 2)] {
        for _ in 0..20 {
            let m = random_mat3(&mut rng);
            let theta: f64 = rng.gen_range(-1.5..1.5);
            let (c, s) = (theta.cos(), theta.sin());
            let g = set_givens3(c, s, i0, i1);

            let mut pre = m;
            pre_mult3_givens(&mut pre, c, s, i0, i1);
            assert_eq!(pre, mult3(&g, &m));

            let mut post = m;
            post_mult3_givens(&mut post, c, s, i0, i1);
            assert_eq!(post, mult3_right_transpose(&m, &g));
        }
    }
}

#[test]
fn givens_layout() {
    let g = set_givens3(0.6, 0.8, 0, 2);
    assert_eq!(g, [0.6, 0.0, 0.8, 0.0, 1.0, 0.0, -0.8, 0.0, 0.6]);
    assert_relative_eq!(det3(&g), 1.0, epsilon = 1e-15);
}

#[test]
fn swap_negate_keeps_determinant() {
    let mut rng = StdRng::seed_from_u64(12);
    let m = random_mat3(&mut rng);
    let before = det3(&m);
    for (i0, i1) in [(0, 1), (0, 2), (1, 2)] {
        let mut w = m;
        swap_negate_column(&mut w, i0, i1);
        assert_relative_eq!(det3(&w), before, epsilon = 1e-14);
        for row in 0..3 {
            assert_eq!(w[idx3(row, i0)], m[idx3(row, i1)]);
            assert_eq!(w[idx3(row, i1)], -m[idx3(row, i0)]);
        }
    }
}

#[test]
fn jacobi_step_zeroes_target_entry() {
    let mut s = [4.0, 1.0, 0.5, 1.0, 2.0, 0.25, 0.5, 0.25, 1.0];
    let mut q = IDENTITY3;
    apply_jacobi3(&mut s, &mut q, 0, 1);
    assert!(s[idx3(0, 1)].abs() < 1e-14);
    assert!(s[idx3(1, 0)].abs() < 1e-14);
    // Saturated 45° branch (|a12| >= |a11 - a22|) zeroes equal diagonals too.
    let mut s2 = [2.0, 3.0, 0.0, 3.0, 2.0, 0.0, 0.0, 0.0, 1.0];
    let mut q2 = IDENTITY3;
    apply_jacobi3(&mut s2, &mut q2, 0, 1);
    assert!(s2[idx3(0, 1)].abs() < 1e-14);
    assert!(max_abs_diff(&mult3_right_transpose(&q2, &q2), &IDENTITY3) < 1e-15);
}

#[test]
fn jacobi_leaves_diagonal_input_untouched() {
    let mut s = [3.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 1.0];
    let mut q = IDENTITY3;
    apply_jacobi3(&mut s, &mut q, 0, 2);
    assert_eq!(s, [3.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 1.0]);
    assert_eq!(q, IDENTITY3);
}

#[test]
fn svd_of_identity_is_exact() {
    let mut u = [0.0; 9];
    let mut sigma = [0.0; 9];
    let mut v = [0.0; 9];
    svd3(&IDENTITY3, 20, &mut u, &mut sigma, &mut v);
    assert_eq!(u, IDENTITY3);
    assert_eq!(sigma, IDENTITY3);
    assert_eq!(v, IDENTITY3);
}

#[test]
fn svd_of_zero_matrix() {
    let svd = Svd3::new(&[0.0; 9]);
    assert_eq!(svd.singular_values(), [0.0, 0.0, 0.0]);
    assert_eq!(svd.u, IDENTITY3);
    assert_eq!(svd.v, IDENTITY3);
}

#[test]
fn svd_random_matrices() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..200 {
        let a = random_mat3(&mut rng);
        check_svd(&a, 20);
    }
}

#[test]
fn svd_rank_deficient_and_near_singular() {
    let rank1 = [1.0, 2.0, 3.0, 2.0, 4.0, 6.0, 3.0, 6.0, 9.0];
    check_svd(&rank1, 20);
    let s = Svd3::new(&rank1).singular_values();
    assert!(s[1].abs() < 1e-7 && s[2].abs() < 1e-7);

    let rank2 = [1.0, 0.0, 1.0, 0.0, 1.0, 1.0, 2.0, -1.0, 1.0];
    check_svd(&rank2, 20);
    assert!(Svd3::new(&rank2).singular_values()[2] < 1e-7);

    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..50 {
        let mut a = random_mat3(&mut rng);
        for row in 0..3 {
            let noise = rng.gen_range(-1e-9..1e-9);
            a[idx3(row, 2)] = a[idx3(row, 0)] + a[idx3(row, 1)] + noise;
        }
        check_svd(&a, 20);
    }
}

#[test]
fn svd_negative_determinant_keeps_sigma_nonnegative() {
    let reflect = [-1.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 3.0];
    check_svd(&reflect, 20);
    let svd = Svd3::new(&reflect);
    let s = svd.singular_values();
    assert_relative_eq!(s[0], 3.0, epsilon = 1e-12);
    assert_relative_eq!(s[1], 2.0, epsilon = 1e-12);
    assert_relative_eq!(s[2], 1.0, epsilon = 1e-12);
    assert!(det3(&svd.u) * det3(&svd.v) < 0.0);
}

#[test]
fn svd_matches_nalgebra_singular_values() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..25 {
        let a = random_mat3(&mut rng);
        let ours = Svd3::new(&a).singular_values();
        let mut reference: Vec<f64> = to_matrix3(&a).singular_values().iter().copied().collect();
        reference.sort_by(|x, y| y.partial_cmp(x).unwrap());
        for k in 0..3 {
            assert_relative_eq!(ours[k], reference[k], epsilon = 1e-10);
        }
    }
}

#[test]
fn rotation_factor_recovers_rotation() {
    let th: f64 = 0.7;
    let rot = [th.cos(), -th.sin(), 0.0, th.sin(), th.cos(), 0.0, 0.0, 0.0, 1.0];
    let stretch = [2.0, 0.0, 0.0, 0.0, 1.5, 0.0, 0.0, 0.0, 0.5];
    let a = mult3(&rot, &stretch);
    let r = Svd3::new(&a).rotation();
    assert!(max_abs_diff(&r, &rot) < 1e-10);
    let (u, sigma, v) = Svd3::new(&a).to_matrices();
    let back: Matrix3<f64> = u * sigma * v.transpose();
    assert!((back - to_matrix3(&a)).abs().max() < 1e-10);
}

proptest! {
    #[test]
    fn prop_svd_invariants(entries in prop::array::uniform9(-100.0f64..100.0)) {
        let svd = Svd3::new(&entries);
        let scale = max_abs(&entries).max(1.0);
        let err = max_abs_diff(&svd.reconstruct(), &entries);
        prop_assert!(err <= 1e-9 * scale, "reconstruction error {}", err);
        let s = svd.singular_values();
        prop_assert!(s[0] >= 0.0 && s[1] >= 0.0 && s[2] >= 0.0);
        prop_assert!(s[0] + 1e-12 * scale >= s[1]);
        prop_assert!(s[1] + 1e-12 * scale >= s[2]);
        prop_assert!(max_abs_diff(&mult3_right_transpose(&svd.u, &svd.u), &IDENTITY3) < 1e-9);
        prop_assert!(max_abs_diff(&mult3_right_transpose(&svd.v, &svd.v), &IDENTITY3) < 1e-9);
    }
}
