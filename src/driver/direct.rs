//! Direct-call driver for backends exposing a blocking "minimize" entry.
//!
//! Purpose
//! -------
//! Drive solver backends that run to completion on their own, calling the
//! [`ObjectiveEvaluator`] internally instead of communicating through task
//! codes. The driver performs the staged setup pipeline (open, dimension
//! check, setup, unconstrainedness check, name), invokes the backend once,
//! and folds any failure into the run's statistics record — solver-internal
//! failures never leak as uncaught errors past this boundary.
//!
//! Key behaviors
//! -------------
//! - Rejects problems with general constraints, and problems that are not
//!   actually unconstrained: repositories report missing bounds as ±1e20
//!   sentinels, so the check compares magnitudes against
//!   [`NEAR_INFINITY`] rather than testing for exact infinities.
//! - [`DirectOptions`] documents each knob's effect: memory depth trades
//!   iteration count for per-iteration cost, gradient tolerances set the
//!   stopping threshold, the iteration cap is a hard stop. When no cap is
//!   given, [`default_max_iter`] applies the large-problem rule (10 000
//!   iterations below 50 000 variables, 1 000 above).
//! - After a successful minimize, the session's usage report supplies the
//!   authoritative function-evaluation count and timings.
use std::str::FromStr;

use crate::{
    driver::{
        evaluator::ObjectiveEvaluator,
        types::{Point, DEFAULT_MEM, NEAR_INFINITY},
        validation::{verify_max_iter, verify_memory, verify_tolerance},
    },
    errors::{DriverError, DriverResult},
    problem::traits::{ProblemSession, ProblemSource},
    report::stats::{RunFlag, RunStat},
};

/// Choice of line search used inside the L-BFGS backend.
///
/// Parses case-insensitively from `"MoreThuente"` or `"HagerZhang"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSearcher {
    MoreThuente,
    HagerZhang,
}

impl FromStr for LineSearcher {
    type Err = DriverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morethuente" => Ok(LineSearcher::MoreThuente),
            "hagerzhang" => Ok(LineSearcher::HagerZhang),
            _ => Err(DriverError::InvalidLineSearch {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'MoreThuente' or 'HagerZhang'.",
            }),
        }
    }
}

/// Iteration cap applied when [`DirectOptions::max_iter`] is `None`.
///
/// Very large problems are restricted to 1 000 iterations.
pub fn default_max_iter(nvar: usize) -> usize {
    if nvar < 50_000 {
        10_000
    } else {
        1_000
    }
}

/// Configuration for a direct-call backend.
///
/// - `mem`: limited-memory depth `m`; more history can cut iterations at
///   higher per-iteration cost.
/// - `tol_grad`: gradient-norm stopping threshold.
/// - `tol_cost`: optional objective-change stopping threshold.
/// - `max_iter`: hard iteration cap; `None` defers to
///   [`default_max_iter`] once the problem dimension is known.
/// - `line_searcher`: line-search algorithm. Line searches bound their
///   own step counts internally.
/// - `verbose`: attach a progress observer (behind the `obs_slog`
///   feature) and print an initial-state line.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectOptions {
    pub mem: usize,
    pub tol_grad: f64,
    pub tol_cost: Option<f64>,
    pub max_iter: Option<usize>,
    pub line_searcher: LineSearcher,
    pub verbose: bool,
}

impl DirectOptions {
    /// Construct validated options.
    ///
    /// # Errors
    /// - [`DriverError::InvalidMemory`] if `mem` is zero.
    /// - [`DriverError::InvalidTolerance`] for non-finite or non-positive
    ///   tolerances.
    /// - [`DriverError::InvalidMaxIter`] if an explicit cap is zero.
    pub fn new(
        mem: usize, tol_grad: f64, tol_cost: Option<f64>, max_iter: Option<usize>,
        line_searcher: LineSearcher, verbose: bool,
    ) -> DriverResult<Self> {
        verify_memory(mem)?;
        verify_tolerance(Some(tol_grad))?;
        verify_tolerance(tol_cost)?;
        if let Some(cap) = max_iter {
            verify_max_iter(cap)?;
        }
        Ok(Self { mem, tol_grad, tol_cost, max_iter, line_searcher, verbose })
    }
}

impl Default for DirectOptions {
    /// Classic benchmark defaults: `m = 6`, `tol_grad = 1e-5`, no cost
    /// tolerance, dimension-dependent iteration cap, More–Thuente line
    /// search.
    fn default() -> Self {
        Self {
            mem: DEFAULT_MEM,
            tol_grad: 1e-5,
            tol_cost: None,
            max_iter: None,
            line_searcher: LineSearcher::MoreThuente,
            verbose: false,
        }
    }
}

/// Terminal state of a direct-call minimize.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectOutcome {
    /// Solution point.
    pub x: Point,
    /// Final objective value.
    pub objval: f64,
    /// Iterations performed by the backend.
    pub niter: usize,
    /// Final gradient norm.
    pub grad_norm: f64,
}

/// A solver backend with a single blocking "minimize" operation.
///
/// The backend calls the evaluator as its internal callback and reports
/// its terminal state; it must surface failures as errors rather than
/// panicking.
pub trait DirectSolver {
    fn minimize<S: ProblemSession>(
        &mut self, evaluator: &ObjectiveEvaluator<'_, S>, x0: Point,
    ) -> DriverResult<DirectOutcome>;
}

/// Run a direct-call backend against an unconstrained problem and
/// assemble the run's statistics record.
///
/// Stages, in order, each folding its failure into the record:
/// open, dimensions (general constraints rejected), setup,
/// unconstrainedness check against the sentinel threshold, name query,
/// backend minimize, usage report. The session is torn down on every
/// path when it drops at the end of the call.
///
/// Every failure raised during minimize is reported as a solver error,
/// whatever its origin: once the backend owns the run, an evaluation
/// failure inside it is a failed solve. The originating message text is
/// preserved verbatim in the record.
pub fn unconstrained_stat<P, B>(source: &P, resource: &str, backend: &mut B) -> RunStat
where
    P: ProblemSource,
    B: DirectSolver,
{
    let session = match source.open(resource) {
        Ok(session) => session,
        Err(err) => return RunStat::setup_failure(&err),
    };

    let dims = match session.dimensions() {
        Ok(dims) => dims,
        Err(err) => return RunStat::setup_failure(&err),
    };
    if dims.nconstr > 0 {
        return RunStat::setup_failure(&DriverError::UnsupportedConstraints {
            count: dims.nconstr,
        });
    }

    let vectors = match session.setup() {
        Ok(vectors) => vectors,
        Err(err) => return RunStat::setup_failure(&err),
    };

    // Even unconstrained problems come with bounds filled in, using the
    // ±1e20 sentinel for "no bound"; anything tighter means the problem
    // is not actually unconstrained.
    let max_lb = vectors.lb.fold(f64::NEG_INFINITY, |acc, &b| acc.max(b));
    let min_ub = vectors.ub.fold(f64::INFINITY, |acc, &b| acc.min(b));
    if max_lb > -NEAR_INFINITY {
        return RunStat::setup_failure(&DriverError::NotUnconstrained { bound: max_lb });
    }
    if min_ub < NEAR_INFINITY {
        return RunStat::setup_failure(&DriverError::NotUnconstrained { bound: min_ub });
    }

    let prob = match session.name() {
        Ok(raw) => raw.trim_end().to_string(),
        Err(err) => return RunStat::setup_failure(&err),
    };

    let evaluator = ObjectiveEvaluator::new(&session, dims.nvar);
    match backend.minimize(&evaluator, vectors.x0) {
        Ok(outcome) => {
            let usage = session.usage();
            RunStat::success(prob, dims.nvar, outcome.niter, outcome.objval, outcome.grad_norm, &usage)
        }
        Err(err) => {
            // Failures out of minimize are solver errors regardless of
            // origin; keep the message text, reclassify the flag.
            let err = match err.flag() {
                RunFlag::SolverError => err,
                _ => DriverError::Backend { text: err.to_string() },
            };
            RunStat::run_failure(prob, dims.nvar, &err)
        }
    }
}
