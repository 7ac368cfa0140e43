//! Orientation, in-circle and containment predicates on `Vector2<f64>`.
//!
//! Plain floating point, no adaptive arithmetic: ties are decided by the raw
//! sign, which is exact for small integer coordinates.

use nalgebra::Vector2;

/// Cross product `(b − a) × (c − a)`; positive when `(a, b, c)` turns left.
#[inline]
pub fn vertex_product(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> f64 {
    (b - a).perp(&(c - a))
}

/// Signed area of `(a, b, c)`, positive for counterclockwise order.
#[inline]
pub fn signed_area(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> f64 {
    0.5 * vertex_product(a, b, c)
}

/// In-circle determinant: positive when `d` lies strictly inside the
/// circumcircle of the counterclockwise triangle `(a, b, c)`.
pub fn in_circle(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>, d: Vector2<f64>) -> f64 {
    let (ad, bd, cd) = (a - d, b - d, c - d);
    let (al, bl, cl) = (ad.norm_squared(), bd.norm_squared(), cd.norm_squared());
    al * bd.perp(&cd) - bl * ad.perp(&cd) + cl * ad.perp(&bd)
}

/// Whether `d` is strictly inside the circle through `a`, `b`, `c`, for
/// either winding of the triangle.
#[inline]
pub fn point_in_circle_from_points(
    a: Vector2<f64>,
    b: Vector2<f64>,
    c: Vector2<f64>,
    d: Vector2<f64>,
) -> bool {
    let det = in_circle(a, b, c, d);
    if vertex_product(a, b, c) >= 0.0 {
        det > 0.0
    } else {
        det < 0.0
    }
}

/// Barycentric coordinates `(wa, wb, wc)` of `p`; `None` for a degenerate
/// triangle.
pub fn barycentric(
    p: Vector2<f64>,
    a: Vector2<f64>,
    b: Vector2<f64>,
    c: Vector2<f64>,
) -> Option<(f64, f64, f64)> {
    let den = vertex_product(a, b, c);
    if den == 0.0 {
        return None;
    }
    let wb = vertex_product(a, p, c) / den;
    let wc = vertex_product(a, b, p) / den;
    Some((1.0 - wb - wc, wb, wc))
}

/// Closed containment with slack `eps` on each barycentric coordinate.
#[inline]
pub fn point_in_triangle(
    p: Vector2<f64>,
    a: Vector2<f64>,
    b: Vector2<f64>,
    c: Vector2<f64>,
    eps: f64,
) -> bool {
    matches!(barycentric(p, a, b, c), Some((wa, wb, wc)) if wa >= -eps && wb >= -eps && wc >= -eps)
}

/// Angle at `apex` between the rays to `p` and `q`, in `[0, π]`.
#[inline]
pub fn angle_at(apex: Vector2<f64>, p: Vector2<f64>, q: Vector2<f64>) -> f64 {
    (p - apex).angle(&(q - apex))
}

/// Proper crossing of segments `p1–p2` and `q1–q2` (shared endpoints and
/// touching do not count).
pub fn segments_cross(
    p1: Vector2<f64>,
    p2: Vector2<f64>,
    q1: Vector2<f64>,
    q2: Vector2<f64>,
) -> bool {
    let d1 = vertex_product(p1, p2, q1);
    let d2 = vertex_product(p1, p2, q2);
    let d3 = vertex_product(q1, q2, p1);
    let d4 = vertex_product(q1, q2, p2);
    d1 * d2 < 0.0 && d3 * d4 < 0.0
}
