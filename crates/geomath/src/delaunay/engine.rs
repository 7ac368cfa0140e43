//! Sweep state, arena bookkeeping, `step` and edge legalization.
//!
//! The front is kept as an ordered vertex list from the min bootstrap vertex
//! to the max one; front edges are looked up through the edge index, so flips
//! never have to relink it.

use std::collections::HashMap;
use std::f64::consts::FRAC_PI_2;

use nalgebra::Vector2;
use tracing::{debug, trace};

use super::predicates::{angle_at, point_in_circle_from_points, signed_area};
use super::types::{
    DelaunayError, Edge, EdgeId, SweepCfg, Triangle, TriangleId, Vertex, VertexId,
};
use crate::bounds::Bounds2;

/// Constrained sweep-line Delaunay triangulation of a 2D point set.
///
/// Drive with [`step`](Self::step) until it returns `false`, then call
/// [`finalize`](Self::finalize) once; or use [`triangulate`](Self::triangulate).
#[derive(Clone, Debug)]
pub struct DelaunayTriangulation {
    pub(super) cfg: SweepCfg,
    pub(super) vertices: Vec<Vertex>,
    pub(super) edges: Vec<Edge>,
    pub(super) triangles: Vec<Triangle>,
    pub(super) edge_index: HashMap<(VertexId, VertexId), EdgeId>,
    /// Real vertices in sweep order (y, then x).
    pub(super) order: Vec<VertexId>,
    pub(super) next: usize,
    pub(super) front: Vec<VertexId>,
    pub(super) art_min: VertexId,
    pub(super) art_max: VertexId,
    pub(super) hull: Vec<VertexId>,
    pub(super) finalized: bool,
}

#[inline]
fn edge_key(a: VertexId, b: VertexId) -> (VertexId, VertexId) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Sweep order: ascending y, then ascending x.
#[inline]
pub(super) fn sweep_cmp(p: &Vector2<f64>, q: &Vector2<f64>) -> std::cmp::Ordering {
    p.y.total_cmp(&q.y).then(p.x.total_cmp(&q.x))
}

/// Positions of the min / max bootstrap vertices below the input.
fn bootstrap_points(bounds: &Bounds2, alpha: f64) -> (Vector2<f64>, Vector2<f64>) {
    let (min, max) = if bounds.is_empty() {
        (Vector2::zeros(), Vector2::zeros())
    } else {
        (bounds.min, bounds.max)
    };
    let (mut dx, mut dy) = (bounds.width(), bounds.height());
    if dx == 0.0 {
        dx = if dy == 0.0 { 1.0 } else { dy };
    }
    if dy == 0.0 {
        dy = dx;
    }
    (
        Vector2::new(min.x - alpha * dx, min.y - alpha * dy),
        Vector2::new(max.x + alpha * dx, min.y - alpha * dy),
    )
}

impl DelaunayTriangulation {
    pub fn new(
        points: &[Vector2<f64>],
        constraints: &[(usize, usize)],
    ) -> Result<Self, DelaunayError> {
        Self::with_config(points, constraints, SweepCfg::default())
    }

    /// Validate the input, sort it and seed the front with the bootstrap
    /// triangle over the lowest point. Empty input is finalized immediately.
    pub fn with_config(
        points: &[Vector2<f64>],
        constraints: &[(usize, usize)],
        cfg: SweepCfg,
    ) -> Result<Self, DelaunayError> {
        let n = points.len();
        if let Some(index) = points
            .iter()
            .position(|p| !(p.x.is_finite() && p.y.is_finite()))
        {
            return Err(DelaunayError::NonFinitePoint { index });
        }
        for (index, &(a, b)) in constraints.iter().enumerate() {
            if a >= n || b >= n || a == b {
                return Err(DelaunayError::InvalidConstraint {
                    index,
                    a,
                    b,
                    num_points: n,
                });
            }
        }

        let mut order: Vec<VertexId> = (0..n).map(VertexId).collect();
        order.sort_by(|i, j| sweep_cmp(&points[i.0], &points[j.0]));
        if let Some(w) = order.windows(2).find(|w| points[w[0].0] == points[w[1].0]) {
            return Err(DelaunayError::DuplicatePoint {
                first: w[0].0.min(w[1].0),
                second: w[0].0.max(w[1].0),
            });
        }

        let mut vertices: Vec<Vertex> = points
            .iter()
            .enumerate()
            .map(|(i, &p)| Vertex::new(p, i as isize))
            .collect();
        for (k, v) in order.iter().enumerate() {
            vertices[v.0].sorted_index = Some(k);
        }
        for &(a, b) in constraints {
            let (a, b) = (VertexId(a), VertexId(b));
            let (early, late) = if vertices[a.0].sorted_index < vertices[b.0].sorted_index {
                (a, b)
            } else {
                (b, a)
            };
            if !vertices[late.0].constraints.contains(&early) {
                vertices[late.0].constraints.push(early);
            }
        }

        let (pmin, pmax) = bootstrap_points(&Bounds2::from_points(points), cfg.alpha);
        let art_min = VertexId(vertices.len());
        vertices.push(Vertex::new(pmin, -1));
        let art_max = VertexId(vertices.len());
        vertices.push(Vertex::new(pmax, -2));

        let mut dt = Self {
            cfg,
            vertices,
            edges: Vec::with_capacity(3 * n + 3),
            triangles: Vec::with_capacity(2 * n + 1),
            edge_index: HashMap::with_capacity(3 * n + 3),
            order,
            next: 0,
            front: Vec::new(),
            art_min,
            art_max,
            hull: Vec::new(),
            finalized: n == 0,
        };
        if let Some(&first) = dt.order.first() {
            dt.add_triangle(art_min, art_max, first);
            dt.front = vec![art_min, first, art_max];
            dt.next = 1;
        }
        debug!(
            points = n,
            constraints = constraints.len(),
            "sweep initialized"
        );
        Ok(dt)
    }

    /// Full run: every `step`, then `finalize`.
    pub fn triangulate(
        points: &[Vector2<f64>],
        constraints: &[(usize, usize)],
    ) -> Result<Self, DelaunayError> {
        Self::triangulate_with(points, constraints, SweepCfg::default())
    }

    pub fn triangulate_with(
        points: &[Vector2<f64>],
        constraints: &[(usize, usize)],
        cfg: SweepCfg,
    ) -> Result<Self, DelaunayError> {
        let mut dt = Self::with_config(points, constraints, cfg)?;
        while dt.step()? {}
        if !dt.is_finalized() {
            dt.finalize()?;
        }
        Ok(dt)
    }

    /// Insert the next vertex of the sweep. Returns `Ok(false)` once every
    /// vertex has been inserted.
    ///
    /// A failing constraint leaves the vertex inserted and the triangulation
    /// consistent. The vertex's other constraints are still inserted; the
    /// error names the first one that was skipped.
    pub fn step(&mut self) -> Result<bool, DelaunayError> {
        let Some(&v) = self.order.get(self.next) else {
            return Ok(false);
        };
        self.next += 1;
        let j = self.insert_into_front(v);
        if self.cfg.half_pi_heuristic {
            self.half_pi_heuristic(j);
        }
        self.constrain_edges(v)?;
        Ok(true)
    }

    /// Project `v` onto the front and close the gap with one triangle, or two
    /// when `v` lies exactly above a front vertex. Returns `v`'s front slot.
    fn insert_into_front(&mut self, v: VertexId) -> usize {
        let pv = self.point(v);
        let last = self.front.len() - 1;
        let i = self
            .front
            .iter()
            .skip(1)
            .position(|&f| self.point(f).x >= pv.x)
            .map_or(last, |k| k + 1);
        let p = self.front[i];
        if i < last && self.point(p).x == pv.x {
            let (l, r) = (self.front[i - 1], self.front[i + 1]);
            self.add_triangle(l, p, v);
            self.add_triangle(p, r, v);
            self.front[i] = v;
            trace!(vertex = v.0, below = p.0, "step: vertex above front vertex");
            self.legalize_between(l, p);
            self.legalize_between(p, r);
            self.legalize_between(p, v);
        } else {
            let l = self.front[i - 1];
            self.add_triangle(l, p, v);
            self.front.insert(i, v);
            trace!(vertex = v.0, left = l.0, right = p.0, "step: split front edge");
            self.legalize_between(l, p);
        }
        i
    }

    /// Fill front basins next to the new vertex at slot `j` while the
    /// candidate triangle is counterclockwise and its angle at the new vertex
    /// stays below π/2. Bootstrap vertices never take part.
    fn half_pi_heuristic(&mut self, mut j: usize) {
        let v = self.front[j];
        let pv = self.point(v);

        while j + 2 < self.front.len() {
            let (r, r2) = (self.front[j + 1], self.front[j + 2]);
            if self.is_artificial(r) || self.is_artificial(r2) {
                break;
            }
            let (pr, pr2) = (self.point(r), self.point(r2));
            if signed_area(pv, pr, pr2) <= 0.0 || angle_at(pv, pr, pr2) >= FRAC_PI_2 {
                break;
            }
            self.add_triangle(v, r, r2);
            self.front.remove(j + 1);
            self.legalize_between(v, r);
            self.legalize_between(r, r2);
        }

        while j >= 2 {
            let (x, l) = (self.front[j - 2], self.front[j - 1]);
            if self.is_artificial(x) || self.is_artificial(l) {
                break;
            }
            let (px, pl) = (self.point(x), self.point(l));
            if signed_area(px, pl, pv) <= 0.0 || angle_at(pv, pl, px) >= FRAC_PI_2 {
                break;
            }
            self.add_triangle(x, l, v);
            self.front.remove(j - 1);
            j -= 1;
            self.legalize_between(x, l);
            self.legalize_between(l, v);
        }
    }

    pub(super) fn legalize_between(&mut self, a: VertexId, b: VertexId) {
        if let Some(e) = self.edge_between(a, b) {
            self.legalize(e);
        }
    }

    /// Flip `start` and every edge it exposes until all are locally Delaunay.
    /// Constrained, removed and boundary edges are left alone.
    pub(super) fn legalize(&mut self, start: EdgeId) {
        let mut stack = vec![start];
        while let Some(e) = stack.pop() {
            let edge = &self.edges[e.0];
            if !edge.alive || edge.constrained || edge.triangles.len() < 2 {
                continue;
            }
            let (t1, t2) = (edge.triangles[0], edge.triangles[1]);
            let (s, f) = (edge.start, edge.end);
            let (Some(p1), Some(p2)) = (
                self.triangles[t1.0].opposite(e),
                self.triangles[t2.0].opposite(e),
            ) else {
                continue;
            };
            let [a, b, c] = self.triangles[t1.0].vertices();
            if !point_in_circle_from_points(
                self.point(a),
                self.point(b),
                self.point(c),
                self.point(p2),
            ) {
                continue;
            }
            trace!(s = s.0, f = f.0, p1 = p1.0, p2 = p2.0, "flip");
            self.remove_triangle(t1);
            self.remove_triangle(t2);
            self.remove_edge(e);
            self.add_triangle_ccw(p1, p2, s);
            self.add_triangle_ccw(p1, p2, f);
            for (x, y) in [(p1, s), (s, p2), (p2, f), (f, p1)] {
                if let Some(o) = self.edge_between(x, y) {
                    stack.push(o);
                }
            }
        }
    }

    // ---- arena ----

    pub(super) fn ensure_edge(&mut self, a: VertexId, b: VertexId) -> EdgeId {
        let key = edge_key(a, b);
        if let Some(&e) = self.edge_index.get(&key) {
            return e;
        }
        let e = EdgeId(self.edges.len());
        self.edges.push(Edge::new(a, b));
        self.edge_index.insert(key, e);
        e
    }

    /// Register the counterclockwise triangle `(a, b, c)`, creating missing
    /// edges.
    pub(super) fn add_triangle(&mut self, a: VertexId, b: VertexId, c: VertexId) -> TriangleId {
        debug_assert!(
            signed_area(self.point(a), self.point(b), self.point(c)) > 0.0,
            "triangle ({a:?}, {b:?}, {c:?}) is not counterclockwise"
        );
        let a_edge = self.ensure_edge(b, c);
        let b_edge = self.ensure_edge(c, a);
        let c_edge = self.ensure_edge(a, b);
        let id = TriangleId(self.triangles.len());
        self.triangles.push(Triangle {
            a,
            b,
            c,
            a_edge,
            b_edge,
            c_edge,
            alive: true,
        });
        for e in [a_edge, b_edge, c_edge] {
            let tris = &mut self.edges[e.0].triangles;
            debug_assert!(tris.len() < 2, "edge {e:?} already has two triangles");
            tris.push(id);
        }
        id
    }

    /// [`add_triangle`](Self::add_triangle) after reordering to counterclockwise.
    pub(super) fn add_triangle_ccw(&mut self, a: VertexId, b: VertexId, c: VertexId) -> TriangleId {
        if signed_area(self.point(a), self.point(b), self.point(c)) < 0.0 {
            self.add_triangle(a, c, b)
        } else {
            self.add_triangle(a, b, c)
        }
    }

    /// Detach `t` from its edges; the edges stay.
    pub(super) fn remove_triangle(&mut self, t: TriangleId) {
        let edges = {
            let tri = &mut self.triangles[t.0];
            tri.alive = false;
            tri.edges()
        };
        for e in edges {
            self.edges[e.0].triangles.retain(|&x| x != t);
        }
    }

    pub(super) fn remove_edge(&mut self, e: EdgeId) {
        let edge = &mut self.edges[e.0];
        debug_assert!(edge.triangles.is_empty(), "removing edge {e:?} still in use");
        edge.alive = false;
        let key = edge_key(edge.start, edge.end);
        self.edge_index.remove(&key);
    }

    #[inline]
    pub(super) fn is_artificial(&self, v: VertexId) -> bool {
        self.vertices[v.0].is_artificial()
    }

    // ---- read-only surface ----

    /// Live edge joining `a` and `b`, if any.
    #[inline]
    pub fn edge_between(&self, a: VertexId, b: VertexId) -> Option<EdgeId> {
        self.edge_index.get(&edge_key(a, b)).copied()
    }
    #[inline]
    pub fn point(&self, v: VertexId) -> Vector2<f64> {
        self.vertices[v.0].point
    }
    #[inline]
    pub fn vertex(&self, v: VertexId) -> &Vertex {
        &self.vertices[v.0]
    }
    #[inline]
    pub fn edge(&self, e: EdgeId) -> &Edge {
        &self.edges[e.0]
    }
    #[inline]
    pub fn triangle(&self, t: TriangleId) -> &Triangle {
        &self.triangles[t.0]
    }
    pub fn config(&self) -> &SweepCfg {
        &self.cfg
    }
    /// Number of input points.
    pub fn num_points(&self) -> usize {
        self.order.len()
    }
    /// Points still waiting to be swept.
    pub fn remaining(&self) -> usize {
        self.order.len() - self.next
    }
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }
    /// Current front, bootstrap vertices included; empty after finalize.
    pub fn front(&self) -> &[VertexId] {
        &self.front
    }
    /// Live triangles. Before finalize this includes bootstrap triangles.
    pub fn triangles(&self) -> impl Iterator<Item = TriangleId> + '_ {
        self.triangles
            .iter()
            .enumerate()
            .filter(|(_, t)| t.alive)
            .map(|(i, _)| TriangleId(i))
    }
    /// Live edges. Before finalize this includes bootstrap edges.
    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, e)| e.alive)
            .map(|(i, _)| EdgeId(i))
    }
    /// Hull vertices in clockwise order (upper chain left to right, then the
    /// lower chain back). Points lying on a hull edge are included, so this
    /// is the boundary of the triangulation rather than the strict hull.
    /// Empty until finalize.
    pub fn convex_hull(&self) -> &[VertexId] {
        &self.hull
    }
    pub fn hull_points(&self) -> Vec<Vector2<f64>> {
        self.hull.iter().map(|&v| self.point(v)).collect()
    }
    /// Input indices of every live triangle without bootstrap vertices.
    pub fn triangle_indices(&self) -> Vec<[usize; 3]> {
        self.triangles()
            .filter_map(|t| {
                let [a, b, c] = self.triangles[t.0].vertices();
                Some([
                    self.vertices[a.0].input_index()?,
                    self.vertices[b.0].input_index()?,
                    self.vertices[c.0].input_index()?,
                ])
            })
            .collect()
    }
    /// Input index pairs of the constrained edges.
    pub fn constrained_edge_indices(&self) -> Vec<[usize; 2]> {
        self.edges()
            .map(|e| &self.edges[e.0])
            .filter(|e| e.constrained)
            .map(|e| {
                let (a, b) = (e.start.0.min(e.end.0), e.start.0.max(e.end.0));
                [a, b]
            })
            .collect()
    }
}
