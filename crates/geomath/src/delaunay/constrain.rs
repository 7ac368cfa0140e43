//! Constraint insertion: walk the triangles crossed by the segment, replace
//! them by the constrained edge and re-triangulate both sides by ear clipping.
//!
//! Only segments that stay inside the swept region are supported; a segment
//! that leaves it through the front, or runs exactly through a third vertex,
//! is reported instead of guessed at.

use tracing::{debug, trace, warn};

use super::engine::DelaunayTriangulation;
use super::predicates::{point_in_triangle, signed_area};
use super::types::{DelaunayError, EdgeId, TriangleId, VertexId};

/// Triangles and edges crossed by a constraint, with the vertex chains on
/// either side (both starting at the new vertex).
#[derive(Debug)]
struct ConstraintWalk {
    triangles: Vec<TriangleId>,
    edges: Vec<EdgeId>,
    left: Vec<VertexId>,
    right: Vec<VertexId>,
}

impl DelaunayTriangulation {
    /// Enforce every constraint recorded on the freshly inserted vertex `v`.
    /// A failed constraint does not stop the others; the first failure is
    /// returned once all have been tried.
    pub(super) fn constrain_edges(&mut self, v: VertexId) -> Result<(), DelaunayError> {
        let partners = self.vertices[v.0].constraints.clone();
        let mut first_err = None;
        for u in partners {
            if let Err(err) = self.insert_constraint(v, u) {
                warn!(a = v.0, b = u.0, %err, "constraint skipped");
                first_err.get_or_insert(err);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    fn insert_constraint(&mut self, v: VertexId, u: VertexId) -> Result<(), DelaunayError> {
        if let Some(e) = self.edge_between(v, u) {
            self.edges[e.0].constrained = true;
            trace!(a = v.0, b = u.0, "constraint already an edge");
            return Ok(());
        }

        let walk = self.walk_constraint(v, u)?;
        let mut right = walk.right;
        right.push(u);
        let mut left = walk.left;
        left.push(u);
        left.reverse();
        // Both polygons are now counterclockwise, closed by u–v.
        let mut ears = self.ear_clip(right, v, u)?;
        ears.extend(self.ear_clip(left, v, u)?);

        for &t in &walk.triangles {
            self.remove_triangle(t);
        }
        for &e in &walk.edges {
            self.remove_edge(e);
        }
        let ce = self.ensure_edge(v, u);
        self.edges[ce.0].constrained = true;

        let mut touched = Vec::with_capacity(3 * ears.len());
        for [a, b, c] in ears {
            let t = self.add_triangle(a, b, c);
            touched.extend(self.triangles[t.0].edges());
        }
        for e in touched {
            self.legalize(e);
        }
        debug!(
            a = v.0,
            b = u.0,
            crossed = walk.edges.len(),
            "constraint inserted"
        );
        Ok(())
    }

    /// Rotate around `v` to the triangle whose wedge holds `u`, then cross
    /// triangles toward `u`. Read-only; nothing changes on failure.
    fn walk_constraint(&self, v: VertexId, u: VertexId) -> Result<ConstraintWalk, DelaunayError> {
        let outside = DelaunayError::ConstraintOutsideFront { a: v.0, b: u.0 };
        let through = |w: VertexId| DelaunayError::ConstraintThroughVertex {
            a: v.0,
            b: u.0,
            through: w.0,
        };
        let pv = self.point(v);
        let d = self.point(u) - pv;

        let j = self
            .front
            .iter()
            .position(|&f| f == v)
            .ok_or_else(|| outside.clone())?;
        if j == 0 || j + 1 >= self.front.len() {
            return Err(outside);
        }
        let right_end = self.front[j + 1];
        let mut t = self
            .edge_between(self.front[j - 1], v)
            .and_then(|e| self.edges[e.0].triangles.first().copied())
            .ok_or_else(|| outside.clone())?;

        let mut start = None;
        for _ in 0..self.triangles.len() {
            let (p, q) = self.triangles[t.0]
                .around(v)
                .ok_or_else(|| outside.clone())?;
            let (dp, dq) = (self.point(p) - pv, self.point(q) - pv);
            let (cp, cq) = (dp.perp(&d), d.perp(&dq));
            if cp == 0.0 && dp.dot(&d) > 0.0 {
                return Err(through(p));
            }
            if cq == 0.0 && dq.dot(&d) > 0.0 {
                return Err(through(q));
            }
            if cp > 0.0 && cq > 0.0 {
                start = Some((t, p, q));
                break;
            }
            if q == right_end {
                break;
            }
            t = self
                .edge_between(v, q)
                .and_then(|e| self.edges[e.0].other_triangle(t))
                .ok_or_else(|| outside.clone())?;
        }
        let (mut t, mut p, mut q) = start.ok_or_else(|| outside.clone())?;

        let mut walk = ConstraintWalk {
            triangles: vec![t],
            edges: Vec::new(),
            left: vec![v, q],
            right: vec![v, p],
        };
        for _ in 0..self.triangles.len() {
            let e = self.edge_between(p, q).ok_or_else(|| outside.clone())?;
            t = self.edges[e.0]
                .other_triangle(t)
                .ok_or_else(|| outside.clone())?;
            walk.edges.push(e);
            walk.triangles.push(t);
            let w = self.triangles[t.0]
                .opposite(e)
                .ok_or_else(|| outside.clone())?;
            if w == u {
                trace!(a = v.0, b = u.0, crossed = walk.edges.len(), "constraint walk");
                return Ok(walk);
            }
            let side = d.perp(&(self.point(w) - pv));
            if side > 0.0 {
                walk.left.push(w);
                q = w;
            } else if side < 0.0 {
                walk.right.push(w);
                p = w;
            } else {
                return Err(through(w));
            }
        }
        Err(outside)
    }

    /// Ear-clip the counterclockwise polygon `poly` into triangles.
    fn ear_clip(
        &self,
        mut poly: Vec<VertexId>,
        v: VertexId,
        u: VertexId,
    ) -> Result<Vec<[VertexId; 3]>, DelaunayError> {
        let failed = DelaunayError::EarClippingFailed { a: v.0, b: u.0 };
        let mut out = Vec::with_capacity(poly.len().saturating_sub(2));
        while poly.len() > 3 {
            let n = poly.len();
            let i = (0..n)
                .find(|&i| self.is_ear(&poly, i))
                .ok_or_else(|| failed.clone())?;
            out.push([poly[(i + n - 1) % n], poly[i], poly[(i + 1) % n]]);
            poly.remove(i);
        }
        if let &[a, b, c] = poly.as_slice() {
            if signed_area(self.point(a), self.point(b), self.point(c)) <= 0.0 {
                return Err(failed);
            }
            out.push([a, b, c]);
        }
        Ok(out)
    }

    /// Corner `i` is convex and its triangle holds no other polygon vertex.
    fn is_ear(&self, poly: &[VertexId], i: usize) -> bool {
        let n = poly.len();
        let (a, b, c) = (poly[(i + n - 1) % n], poly[i], poly[(i + 1) % n]);
        let (pa, pb, pc) = (self.point(a), self.point(b), self.point(c));
        if signed_area(pa, pb, pc) <= 0.0 {
            return false;
        }
        !poly
            .iter()
            .filter(|&&w| w != a && w != b && w != c)
            .any(|&w| point_in_triangle(self.point(w), pa, pb, pc, self.cfg.ear_eps))
    }
}
