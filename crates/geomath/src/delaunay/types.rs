//! Arena entities of the sweep, its tuning knobs and its error type.
//!
//! - `Vertex`, `Edge`, `Triangle`: records addressed by `VertexId`, `EdgeId`,
//!   `TriangleId`. Removal flips `alive`; ids are never reused.
//! - `SweepCfg`: bootstrap offset, heuristic switch, ear-clipping tolerance.
//! - `DelaunayError`: recoverable failures (bad input, unsupported constraints,
//!   out-of-order driving).

use nalgebra::Vector2;
use thiserror::Error;

/// Identifier types. Real vertices use their input index; the two bootstrap
/// vertices follow them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(pub usize);
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(pub usize);
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TriangleId(pub usize);

#[derive(Clone, Debug)]
pub struct Vertex {
    pub point: Vector2<f64>,
    /// Input index, or `-1` / `-2` for the min / max bootstrap vertex.
    pub index: isize,
    /// Position in the sweep order; `None` for bootstrap vertices.
    pub sorted_index: Option<usize>,
    /// Earlier-swept partners this vertex must share an edge with.
    pub constraints: Vec<VertexId>,
}

impl Vertex {
    #[inline]
    pub fn new(point: Vector2<f64>, index: isize) -> Self {
        Self {
            point,
            index,
            sorted_index: None,
            constraints: Vec::new(),
        }
    }
    #[inline]
    pub fn is_artificial(&self) -> bool {
        self.index < 0
    }
    #[inline]
    pub fn input_index(&self) -> Option<usize> {
        usize::try_from(self.index).ok()
    }
}

#[derive(Clone, Debug)]
pub struct Edge {
    pub start: VertexId,
    pub end: VertexId,
    /// Adjacent triangles, at most two.
    pub triangles: Vec<TriangleId>,
    /// Constrained edges are never flipped.
    pub constrained: bool,
    pub alive: bool,
}

impl Edge {
    pub fn new(start: VertexId, end: VertexId) -> Self {
        debug_assert_ne!(start, end, "degenerate edge");
        Self {
            start,
            end,
            triangles: Vec::with_capacity(2),
            constrained: false,
            alive: true,
        }
    }
    #[inline]
    pub fn has(&self, v: VertexId) -> bool {
        self.start == v || self.end == v
    }
    /// Endpoint opposite `v` (assumes `v` is an endpoint).
    #[inline]
    pub fn other(&self, v: VertexId) -> VertexId {
        if self.start == v {
            self.end
        } else {
            self.start
        }
    }
    /// The adjacent triangle that is not `t`.
    #[inline]
    pub fn other_triangle(&self, t: TriangleId) -> Option<TriangleId> {
        self.triangles.iter().copied().find(|&x| x != t)
    }
}

/// Counterclockwise triangle; edge `x_edge` is opposite vertex `x`.
#[derive(Clone, Debug)]
pub struct Triangle {
    pub a: VertexId,
    pub b: VertexId,
    pub c: VertexId,
    pub a_edge: EdgeId,
    pub b_edge: EdgeId,
    pub c_edge: EdgeId,
    pub alive: bool,
}

impl Triangle {
    #[inline]
    pub fn vertices(&self) -> [VertexId; 3] {
        [self.a, self.b, self.c]
    }
    #[inline]
    pub fn edges(&self) -> [EdgeId; 3] {
        [self.a_edge, self.b_edge, self.c_edge]
    }
    #[inline]
    pub fn contains(&self, v: VertexId) -> bool {
        self.a == v || self.b == v || self.c == v
    }
    /// Vertex across from edge `e`.
    pub fn opposite(&self, e: EdgeId) -> Option<VertexId> {
        if self.a_edge == e {
            Some(self.a)
        } else if self.b_edge == e {
            Some(self.b)
        } else if self.c_edge == e {
            Some(self.c)
        } else {
            None
        }
    }
    /// The other two vertices `(p, q)` so that `(v, p, q)` is counterclockwise.
    pub fn around(&self, v: VertexId) -> Option<(VertexId, VertexId)> {
        if self.a == v {
            Some((self.b, self.c))
        } else if self.b == v {
            Some((self.c, self.a))
        } else if self.c == v {
            Some((self.a, self.b))
        } else {
            None
        }
    }
}

/// Sweep configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepCfg {
    /// Bootstrap vertices sit `alpha` bounding-box extents outside the input.
    pub alpha: f64,
    /// Fill shallow front basins (angle at the new vertex below π/2) eagerly.
    pub half_pi_heuristic: bool,
    /// Barycentric slack when testing polygon vertices against a candidate ear.
    pub ear_eps: f64,
}

impl Default for SweepCfg {
    fn default() -> Self {
        Self {
            alpha: 0.4,
            half_pi_heuristic: true,
            ear_eps: 1e-10,
        }
    }
}

/// Errors reported by [`super::DelaunayTriangulation`]. Vertex numbers are
/// input indices.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DelaunayError {
    #[error("constraint #{index} ({a}, {b}) is invalid for {num_points} points")]
    InvalidConstraint {
        index: usize,
        a: usize,
        b: usize,
        num_points: usize,
    },
    #[error("points {first} and {second} coincide")]
    DuplicatePoint { first: usize, second: usize },
    #[error("point {index} has a non-finite coordinate")]
    NonFinitePoint { index: usize },
    #[error("constraint ({a}, {b}) leaves the swept region; only constraints below the front are supported")]
    ConstraintOutsideFront { a: usize, b: usize },
    #[error("constraint ({a}, {b}) passes through vertex {through}")]
    ConstraintThroughVertex { a: usize, b: usize, through: usize },
    #[error("no ear found while re-triangulating around constraint ({a}, {b})")]
    EarClippingFailed { a: usize, b: usize },
    #[error("finalize called with {remaining} points left to sweep")]
    SweepIncomplete { remaining: usize },
    #[error("triangulation is already finalized")]
    AlreadyFinalized,
}
