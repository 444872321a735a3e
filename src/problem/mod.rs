//! problem — problem-repository abstraction and the built-in test problem.
//!
//! Purpose
//! -------
//! Define the seam between the benchmark drivers and an external problem
//! repository: a source that opens named problem resources into sessions,
//! and a session that answers dimension, setup, name, and evaluation
//! queries and tracks its own usage counters.
//!
//! Key behaviors
//! -------------
//! - `traits` holds the [`ProblemSource`]/[`ProblemSession`] pair plus the
//!   small data carriers (dimensions, setup vectors, usage report) that
//!   cross the seam.
//! - `rosenbrock` provides an in-process repository implementing the seam
//!   for the extended Rosenbrock function, in boxed and unconstrained
//!   flavors, used by the drivers' tests and as a worked example.
//!
//! Invariants & assumptions
//! ------------------------
//! - A source allows at most one active session at a time; a session's
//!   resources are released when it drops, success or failure.
//! - Sessions count every evaluation they perform, whoever triggered it;
//!   their usage report is authoritative over driver-side counting.
//!
//! Conventions
//! -----------
//! - Bounds are dense vectors with the ±1e20 sentinel standing in for
//!   "no bound"; names are fixed-width and space padded, trimmed by the
//!   drivers before reporting.

pub mod rosenbrock;
pub mod traits;

pub mod prelude {
    pub use super::rosenbrock::{RosenbrockSource, ROSENBROCK_RESOURCE};
    pub use super::traits::{
        Dimensions, ProblemSession, ProblemSource, ProblemVectors, UsageReport,
    };
}
