//! Constrained 2D Delaunay triangulation by sweep line.
//!
//! Purpose
//! - Triangulate a point set, honouring user segments (constraints), with an
//!   incremental sweep in (y, x) order and flip-based legalization.
//! - Produce the convex hull as a by-product of closing the sweep.
//!
//! Model
//! - Arena of `Vertex`/`Edge`/`Triangle` records addressed by id newtypes;
//!   removals flip an `alive` flag. Edges are also indexed by their unordered
//!   vertex pair.
//! - Two bootstrap vertices below the input seed the front; `finalize` strips
//!   everything attached to them and fills the resulting concavities.
//! - Constraints are recorded on their later-swept endpoint and inserted right
//!   after that endpoint joins the front.
//!
//! Limits
//! - Constraints that leave the swept region or run exactly through a third
//!   vertex are rejected (`ConstraintOutsideFront`, `ConstraintThroughVertex`).
//! - Predicates are plain `f64`; exact x ties between a new vertex and a front
//!   vertex take the two-triangle branch, near ties do not.

mod constrain;
mod engine;
mod finalize;
pub mod predicates;
mod types;
mod validate;

pub use engine::DelaunayTriangulation;
pub use predicates::{
    barycentric, in_circle, point_in_circle_from_points, point_in_triangle, signed_area,
    vertex_product,
};
pub use types::{
    DelaunayError, Edge, EdgeId, SweepCfg, Triangle, TriangleId, Vertex, VertexId,
};
