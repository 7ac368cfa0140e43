//! Fixed tolerances for the 3x3 kernels (internal).
//!
//! Policy
//! - These are constants, not knobs. The SVD runs a fixed number of sweeps
//!   with no convergence test, so its behaviour must not drift with settings.

/// Squared column norm below which a column of U counts as indeterminate.
pub(crate) const BIG_EPSILON: f64 = 1e-3;
/// Pivot magnitude below which a QR Givens step is skipped.
pub(crate) const QR_EPSILON: f64 = 1e-10;
/// Jacobi sweep count used by `Svd3::new` and the CLI default.
pub const DEFAULT_ITERATIONS: u32 = 20;
/// `cos(π/4) = sin(π/4)`.
pub(crate) const SQRT_HALF: f64 = std::f64::consts::FRAC_1_SQRT_2;
