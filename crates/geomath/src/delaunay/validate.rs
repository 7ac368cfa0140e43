//! Structural and Delaunay checks over the current arena.

use super::engine::DelaunayTriangulation;
use super::predicates::{in_circle, segments_cross, signed_area};
use super::types::{TriangleId, VertexId};

/// Relative slack on the in-circle determinant before a point counts as
/// strictly inside.
const INCIRCLE_REL_EPS: f64 = 1e-10;

impl DelaunayTriangulation {
    /// Pairs `(triangle, vertex)` where a real vertex lies strictly inside the
    /// triangle's circumcircle and is visible from it (no constrained edge in
    /// between). Triangles touching bootstrap vertices are skipped.
    pub fn find_delaunay_violations(&self) -> Vec<(TriangleId, VertexId)> {
        let constrained: Vec<_> = self
            .edges()
            .map(|e| &self.edges[e.0])
            .filter(|e| e.constrained)
            .map(|e| (self.point(e.start), self.point(e.end)))
            .collect();
        let mut out = Vec::new();
        for t in self.triangles() {
            let tri = &self.triangles[t.0];
            if tri.vertices().iter().any(|&v| self.is_artificial(v)) {
                continue;
            }
            let (a, b, c) = (self.point(tri.a), self.point(tri.b), self.point(tri.c));
            let centroid = (a + b + c) / 3.0;
            for &v in &self.order {
                if tri.contains(v) {
                    continue;
                }
                let p = self.point(v);
                let scale = (b - a)
                    .norm_squared()
                    .max((c - a).norm_squared())
                    .max((p - a).norm_squared());
                if in_circle(a, b, c, p) <= INCIRCLE_REL_EPS * scale * scale {
                    continue;
                }
                if constrained
                    .iter()
                    .any(|&(s, e)| segments_cross(centroid, p, s, e))
                {
                    continue;
                }
                out.push((t, v));
            }
        }
        out
    }

    /// Cross-reference consistency: counterclockwise live triangles whose
    /// edges are live and list them back, at most two triangles per edge, and
    /// an edge index that matches the live edges.
    pub fn is_valid(&self) -> bool {
        for t in self.triangles() {
            let tri = &self.triangles[t.0];
            if signed_area(self.point(tri.a), self.point(tri.b), self.point(tri.c)) <= 0.0 {
                return false;
            }
            let sides = [
                (tri.a_edge, tri.b, tri.c),
                (tri.b_edge, tri.c, tri.a),
                (tri.c_edge, tri.a, tri.b),
            ];
            for (e, x, y) in sides {
                let edge = &self.edges[e.0];
                if !edge.alive || !edge.has(x) || !edge.has(y) || !edge.triangles.contains(&t) {
                    return false;
                }
            }
        }
        let mut live = 0;
        for e in self.edges() {
            live += 1;
            let edge = &self.edges[e.0];
            if edge.triangles.len() > 2 || self.edge_between(edge.start, edge.end) != Some(e) {
                return false;
            }
            for &t in &edge.triangles {
                let tri = &self.triangles[t.0];
                if !tri.alive || !tri.edges().contains(&e) {
                    return false;
                }
            }
        }
        live == self.edge_index.len()
    }
}
