//! qnbench — quasi-Newton solver benchmark drivers over external problem
//! repositories.
//!
//! Purpose
//! -------
//! Serve as the crate root for the benchmark driver stack: problem
//! repository abstraction, bound classification, the two driver
//! disciplines (reverse communication via task codes, and direct blocking
//! calls), the built-in `argmin` L-BFGS backend, and the uniform run
//! record with side-by-side comparison of two backends.
//!
//! Key behaviors
//! -------------
//! - Re-export the core modules (`problem`, `driver`, `report`, `errors`)
//!   as the public crate surface.
//! - `driver::reverse::bound_constrained_stat` and
//!   `driver::direct::unconstrained_stat` are the two entry points that
//!   take a problem source and a backend and return a finished
//!   [`RunStat`](report::stats::RunStat).
//! - `report::compare::compare_backends` pairs two runs for side-by-side
//!   reporting without judging the winner.
//!
//! Invariants & assumptions
//! ------------------------
//! - All failure paths terminate in a run record with the status flag
//!   taxonomy of [`errors::DriverError::flag`]; no error escapes a driver
//!   entry point.
//! - Problem sessions are scoped resources: torn down when they drop, on
//!   success and on every error path alike.
//!
//! Conventions
//! -----------
//! - Points and gradients are `ndarray::Array1<f64>` throughout
//!   (`driver::types::{Point, Grad}`).
//! - Run records follow the external serde schema documented in
//!   `report::stats`; flags serialize as integer codes.
//!
//! Downstream usage
//! ----------------
//! - Callers implement [`problem::traits::ProblemSource`] for their
//!   repository (or use the built-in Rosenbrock one), pick or implement a
//!   backend, and call a driver entry point; `use qnbench::prelude::*`
//!   pulls in the whole surface.
//!
//! Testing notes
//! -------------
//! - Unit tests live beside each module; the integration tests exercise
//!   the full pipeline on the built-in Rosenbrock repository, including
//!   the end-to-end `argmin` solve and the comparison harness.

pub mod driver;
pub mod errors;
pub mod problem;
pub mod report;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use qnbench::prelude::*;
//
// to import the main benchmark surface in a single line.

pub mod prelude {
    pub use super::driver::prelude::*;
    pub use super::errors::{DriverError, DriverResult};
    pub use super::problem::prelude::*;
    pub use super::report::prelude::*;
}
