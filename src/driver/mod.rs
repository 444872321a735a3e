//! driver — solver drivers, bound classification, and backend adapters.
//!
//! Purpose
//! -------
//! House everything between a problem session and a run record: bound
//! classification, the objective evaluator, the two driver disciplines
//! (reverse communication and direct call), and the `argmin`-backed
//! L-BFGS backend with its construction helpers.
//!
//! Key behaviors
//! -------------
//! - `bounds` derives per-variable bound types from the presence of
//!   finite lower/upper bounds and encodes them for backends.
//! - `evaluator` wraps a session's combined value-and-gradient query
//!   behind a fixed-dimension interface.
//! - `reverse` drives task-code backends through an explicit
//!   decode-and-dispatch loop over an opaque workspace arena.
//! - `direct` drives blocking "minimize" backends and hosts their shared
//!   options; `adapter`, `builders`, and `lbfgs` wire the built-in
//!   `argmin` L-BFGS backend into that seam.
//! - `validation` centralizes configuration and gradient checks;
//!   `types` pins the crate's canonical numeric aliases and constants.
//!
//! Invariants & assumptions
//! ------------------------
//! - Drivers never let a backend failure escape as an uncaught error;
//!   every terminal state is folded into a [`RunStat`] record.
//! - One driver invocation owns one session and one workspace for its
//!   whole run; neither is shared across runs.
//!
//! [`RunStat`]: crate::report::stats::RunStat

pub mod adapter;
pub mod bounds;
pub mod builders;
pub mod direct;
pub mod evaluator;
pub mod lbfgs;
pub mod reverse;
pub mod types;
pub mod validation;

pub mod prelude {
    pub use super::bounds::{classify, classify_all, BoundType};
    pub use super::direct::{
        default_max_iter, unconstrained_stat, DirectOptions, DirectOutcome, DirectSolver,
        LineSearcher,
    };
    pub use super::evaluator::ObjectiveEvaluator;
    pub use super::lbfgs::LbfgsBackend;
    pub use super::reverse::{
        bound_constrained_stat, classify_classic_task, ReverseCommOptions, ReverseCommSolver,
        TaskSignal, Workspace,
    };
    pub use super::types::{Grad, Point, DEFAULT_MAX_ITER, DEFAULT_MEM, NEAR_INFINITY};
}
