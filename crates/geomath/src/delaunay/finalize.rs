//! Closing the sweep: fill the front, peel off the bootstrap geometry, fill
//! the lower boundary and read off the convex hull.

use std::collections::HashSet;

use tracing::debug;

use super::engine::DelaunayTriangulation;
use super::predicates::signed_area;
use super::types::{DelaunayError, VertexId};

impl DelaunayTriangulation {
    /// Turn the swept region into a triangulation of the convex hull.
    ///
    /// Fails with `SweepIncomplete` while points remain and with
    /// `AlreadyFinalized` on a second call.
    pub fn finalize(&mut self) -> Result<(), DelaunayError> {
        if self.finalized {
            return Err(DelaunayError::AlreadyFinalized);
        }
        let remaining = self.remaining();
        if remaining > 0 {
            return Err(DelaunayError::SweepIncomplete { remaining });
        }

        self.fill_front();
        let mut back = self.back_chain();
        self.remove_artificial();
        self.fill_back(&mut back);

        let mut seen = HashSet::with_capacity(self.front.len() + back.len());
        let upper = self.front[1..self.front.len() - 1].iter();
        self.hull = upper
            .chain(back.iter().rev())
            .copied()
            .filter(|&v| seen.insert(v))
            .collect();
        self.front.clear();
        self.finalized = true;
        debug!(
            triangles = self.triangles().count(),
            hull = self.hull.len(),
            "sweep finalized"
        );
        Ok(())
    }

    /// Close every left turn among consecutive real front vertices.
    fn fill_front(&mut self) {
        let mut i = 1;
        while i + 3 < self.front.len() {
            let (a, b, c) = (self.front[i], self.front[i + 1], self.front[i + 2]);
            if signed_area(self.point(a), self.point(b), self.point(c)) > 0.0 {
                self.add_triangle(a, b, c);
                self.front.remove(i + 1);
                self.legalize_between(a, b);
                self.legalize_between(b, c);
                i = i.saturating_sub(1).max(1);
            } else {
                i += 1;
            }
        }
    }

    /// Real vertices bordering the bootstrap triangles, left to right, from
    /// the first to the last real front vertex. Found by rotating around the
    /// min bootstrap vertex, then around the max one.
    fn back_chain(&self) -> Vec<VertexId> {
        let first = self.front[1];
        let last = self.front[self.front.len() - 2];
        let mut chain = vec![first];
        let Some(mut t) = self
            .edge_between(self.art_min, first)
            .and_then(|e| self.edges[e.0].triangles.first().copied())
        else {
            return chain;
        };
        let mut pivot = self.art_min;
        for _ in 0..=2 * self.triangles.len() {
            let Some((p, _)) = self.triangles[t.0].around(pivot) else {
                break;
            };
            if pivot == self.art_min && p == self.art_max {
                pivot = self.art_max;
                continue;
            }
            if chain.last() != Some(&p) {
                chain.push(p);
            }
            if pivot == self.art_max && p == last {
                break;
            }
            let Some(next) = self
                .edge_between(pivot, p)
                .and_then(|e| self.edges[e.0].other_triangle(t))
            else {
                break;
            };
            t = next;
        }
        chain
    }

    fn remove_artificial(&mut self) {
        let (lo, hi) = (self.art_min, self.art_max);
        let dead_tris: Vec<_> = self
            .triangles()
            .filter(|&t| {
                let tri = &self.triangles[t.0];
                tri.contains(lo) || tri.contains(hi)
            })
            .collect();
        for t in dead_tris {
            self.remove_triangle(t);
        }
        let dead_edges: Vec<_> = self
            .edges()
            .filter(|&e| {
                let edge = &self.edges[e.0];
                edge.has(lo) || edge.has(hi)
            })
            .collect();
        for e in dead_edges {
            self.remove_edge(e);
        }
    }

    /// Close every right turn of the lower chain (a vertex sticking up into
    /// the triangulation from below).
    fn fill_back(&mut self, chain: &mut Vec<VertexId>) {
        let mut i = 0;
        while i + 2 < chain.len() {
            let (a, b, c) = (chain[i], chain[i + 1], chain[i + 2]);
            if signed_area(self.point(a), self.point(c), self.point(b)) > 0.0 {
                self.add_triangle(a, c, b);
                chain.remove(i + 1);
                self.legalize_between(a, b);
                self.legalize_between(b, c);
                i = i.saturating_sub(1);
            } else {
                i += 1;
            }
        }
    }
}
