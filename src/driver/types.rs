//! driver::types — shared numeric aliases, constants, and solver wiring.
//!
//! Purpose
//! -------
//! Centralize the core numeric types and solver aliases used by the
//! benchmark drivers. The rest of the driver code stays agnostic to
//! `ndarray` and `argmin` generics and can evolve more easily if the
//! backend stack changes.
//!
//! Key behaviors
//! -------------
//! - Define canonical aliases for iterate and gradient vectors
//!   ([`Point`], [`Grad`]).
//! - Expose pre-wired L-BFGS solver aliases for the two supported
//!   line-search strategies over the common `(Point, Grad, f64)` shapes.
//! - Hold the run-level constants shared by both drivers: default memory
//!   depth, default iteration cap, and the near-infinity threshold used
//!   to recognize the repository's ±1e20 "no bound" sentinels.
//!
//! Conventions
//! -----------
//! - All driver vectors are `ndarray` containers over `f64`, conceptually
//!   column vectors of length `n`.
//! - [`NEAR_INFINITY`] is used only by the unconstrained-problem check;
//!   bound classification compares against true `±f64::INFINITY`.
use argmin::solver::{
    linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
    quasinewton::LBFGS,
};
use ndarray::Array1;

/// Iterate vector `x` for a benchmark run.
///
/// Alias for `ndarray::Array1<f64>`; owned by the driver and mutated in
/// place over the run.
pub type Point = Array1<f64>;

/// Gradient vector `∇f(x)`, matching the shape of [`Point`].
pub type Grad = Array1<f64>;

/// Default memory depth `m` for limited-memory quasi-Newton backends.
pub const DEFAULT_MEM: usize = 6;

/// Default hard cap on driver iterations.
pub const DEFAULT_MAX_ITER: usize = 10_000;

/// Magnitude above which a bound is treated as "no bound".
///
/// Problem repositories encode missing bounds as ±1e20 rather than true
/// infinities, so the unconstrained-problem check compares against this
/// threshold instead of testing for exact infinity.
pub const NEAR_INFINITY: f64 = 9.0e19;

/// Hager–Zhang line search specialized to this crate's numeric types.
pub type HagerZhangLS = HagerZhangLineSearch<Point, Grad, f64>;

/// More–Thuente line search specialized to this crate's numeric types.
pub type MoreThuenteLS = MoreThuenteLineSearch<Point, Grad, f64>;

/// L-BFGS solver wired to the Hager–Zhang line search.
pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Point, Grad, f64>;

/// L-BFGS solver wired to the More–Thuente line search.
pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Point, Grad, f64>;
