//! Numeric and geometric kernels.
//!
//! - `mat3`: flat 3x3 matrix primitives and a fixed-cost 3x3 SVD.
//! - `delaunay`: constrained sweep-line Delaunay triangulation with hull output.
//! - `bounds`: axis-aligned 2D bounds used to place the sweep's bootstrap.
//!
//! API Policy
//! - The crate is consumed by the workspace CLI and benches; there is no
//!   stability promise. `api` and `prelude` are the curated import surfaces.

pub mod api;
pub mod bounds;
pub mod delaunay;
pub mod mat3;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::bounds::Bounds2;
    pub use crate::delaunay::{
        DelaunayError, DelaunayTriangulation, EdgeId, SweepCfg, TriangleId, VertexId,
    };
    pub use crate::mat3::{svd3, Mat3, Svd3, DEFAULT_ITERATIONS, IDENTITY3};
    pub use nalgebra::{Matrix3 as Mat3x3, Vector2 as Vec2};
}
