//! External problem-repository interface consumed by the drivers.
//!
//! Purpose
//! -------
//! Model the repository that supplies test problems as an explicit pair of
//! traits instead of process-wide global state: a [`ProblemSource`] opens a
//! named problem description resource and yields a [`ProblemSession`], the
//! single-active-problem handle every driver component works through.
//!
//! Key behaviors
//! -------------
//! - [`ProblemSource::open`] acquires a session; dropping the session is
//!   the teardown, so every exit path — including early error returns —
//!   releases the repository before another problem can be opened.
//! - [`ProblemSession`] exposes dimension queries, setup (initial point
//!   and bounds), the fixed-width problem name, combined objective and
//!   gradient evaluation, and cumulative usage reporting.
//! - Function-evaluation counters and setup/solve timers are owned by the
//!   session, not by the drivers: the session counts evaluations triggered
//!   by *all* callers, which makes [`ProblemSession::usage`] authoritative
//!   over anything a driver could track itself.
//!
//! Invariants & assumptions
//! ------------------------
//! - At most one session per source is active at a time; the comparison
//!   harness runs its two drivers strictly sequentially for this reason.
//! - Bounds satisfy `lb[i] <= ub[i]`; missing bounds are encoded as ±1e20
//!   sentinels or true infinities.
//! - Evaluation is synchronous and blocking; there are no per-evaluation
//!   timeouts.
use crate::{
    driver::types::{Grad, Point},
    errors::DriverResult,
};

/// Problem dimensions as reported by the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    /// Number of variables.
    pub nvar: usize,
    /// Number of general (cross-variable) constraints. Anything above
    /// zero is unsupported by the drivers.
    pub nconstr: usize,
}

/// Initial point and bounds produced by problem setup.
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemVectors {
    pub x0: Point,
    pub lb: Point,
    pub ub: Point,
}

/// Cumulative usage counters reported by the session.
///
/// Mirrors the repository's own instrumentation; the reported evaluation
/// count is authoritative over any driver-side tally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UsageReport {
    /// Cumulative objective/gradient evaluations over the session.
    pub fn_evals: usize,
    /// Elapsed setup time in seconds.
    pub setup_time: f64,
    /// Elapsed solve time in seconds.
    pub solve_time: f64,
}

/// A repository of test problems.
pub trait ProblemSource {
    type Session: ProblemSession;

    /// Open the named problem description resource.
    ///
    /// # Errors
    /// [`crate::errors::DriverError::ProblemOpen`] if the resource is
    /// missing or unreadable.
    fn open(&self, resource: &str) -> DriverResult<Self::Session>;
}

/// An open, single-active-problem repository session.
///
/// Dropping the session terminates it; implementations release any
/// process-wide problem state in their `Drop` impl.
pub trait ProblemSession {
    /// Query variable and general-constraint counts.
    fn dimensions(&self) -> DriverResult<Dimensions>;

    /// Set up the problem and receive the initial point and bounds.
    fn setup(&self) -> DriverResult<ProblemVectors>;

    /// Query the problem name.
    ///
    /// Returned fixed-width and space-padded, as stored by the
    /// repository; callers trim trailing spaces before external use.
    fn name(&self) -> DriverResult<String>;

    /// Evaluate objective value and gradient at `x`.
    ///
    /// Writes the gradient into `grad` and returns the objective value.
    ///
    /// # Errors
    /// [`crate::errors::DriverError::Evaluation`] on internal repository
    /// failure; the error must propagate to the driver unchanged.
    fn eval(&self, x: &Point, grad: &mut Grad) -> DriverResult<f64>;

    /// Report cumulative evaluation counts and elapsed times.
    fn usage(&self) -> UsageReport;
}
