//! Reverse-communication driver for bound-constrained solver backends.
//!
//! Purpose
//! -------
//! Drive solver backends that hand control back to the caller with a
//! numeric task code instead of invoking callbacks. The driver owns the
//! iterate and gradient buffers plus the backend's opaque [`Workspace`],
//! calls the backend one step at a time, and dispatches on the decoded
//! [`TaskSignal`]: evaluate the objective, accept a new iterate, stop on
//! convergence, or abort on an abnormal code.
//!
//! Key behaviors
//! -------------
//! - The task code is decoded exactly once per step into a tagged
//!   [`TaskSignal`]; the driver holds no hidden state beyond the iteration
//!   counter and the pass-through workspace.
//! - The iteration counter advances only when the backend reports a new
//!   accepted iterate, read back out of the backend's save-state through
//!   [`ReverseCommSolver::iterations`].
//! - The loop stops once `max_iter` iterates have been accepted, with a
//!   call budget as a stall guard against backends that never advance.
//!   Reaching either limit without a converged signal is a soft cutoff,
//!   not an error: the run is reported with flag 0 and whatever
//!   statistics are current.
//! - An unrecognized task code terminates the run with a solver error
//!   naming the code; the backend is never called again after an abnormal
//!   code.
//! - After the loop, the session's usage report supplies the
//!   authoritative function-evaluation count and timings.
//!
//! Invariants & assumptions
//! ------------------------
//! - The workspace is exclusively owned by one driver invocation for the
//!   run's duration and is discarded when the loop exits; it is never
//!   shared across runs or reused without re-initialization.
//! - The driver never inspects workspace contents directly; save-state
//!   reads go through the backend trait's accessors.
//! - For a fixed problem, starting point, and backend, the sequence of
//!   task codes and iterates is deterministic; wall-clock time is
//!   recorded for reporting only.
use ndarray::Array1;

use crate::{
    driver::{
        bounds::classify_all,
        evaluator::ObjectiveEvaluator,
        types::{Grad, Point, DEFAULT_MAX_ITER, DEFAULT_MEM},
        validation::{verify_max_iter, verify_memory},
    },
    errors::{DriverError, DriverResult},
    problem::traits::{ProblemSession, ProblemSource},
    report::stats::RunStat,
};

/// Task code a freshly initialized workspace presents to the backend on
/// the first call.
pub const START_TASK: i32 = 2;

/// Backend calls allowed per unit of the iteration cap.
///
/// Each accepted iterate costs a handful of calls (one per evaluation
/// request plus the new-iterate announcement); a backend requesting more
/// than this many calls per iterate on average is stalled, and the loop
/// cuts the run off rather than spin forever. Matches the classic
/// per-iteration line-search evaluation limit.
const CALL_BUDGET_FACTOR: usize = 100;

/// Opaque working memory for a reverse-communication backend.
///
/// Sized deterministically from the problem dimension `n` and memory
/// depth `m` using the classic layout: `2mn + 11m² + 5n + 8m` reals and
/// `3n` integers of scratch, plus the save-state arrays. The driver
/// allocates it, passes it through unchanged between calls, and never
/// reads it except via [`ReverseCommSolver`] accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct Workspace {
    pub wa: Vec<f64>,
    pub iwa: Vec<i32>,
    pub task: i32,
    pub csave: i32,
    pub lsave: [i32; 4],
    pub isave: [i32; 44],
    pub dsave: [f64; 29],
}

impl Workspace {
    /// Allocate a zeroed workspace for an `n`-variable problem with
    /// memory depth `m`, with the task code set to [`START_TASK`].
    pub fn new(n: usize, m: usize) -> Self {
        Self {
            wa: vec![0.0; 2 * m * n + 11 * m * m + 5 * n + 8 * m],
            iwa: vec![0; 3 * n],
            task: START_TASK,
            csave: 0,
            lsave: [0; 4],
            isave: [0; 44],
            dsave: [0.0; 29],
        }
    }
}

/// Decoded meaning of a backend task code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskSignal {
    /// Objective value and gradient are needed at the current point.
    Evaluate,
    /// A new iterate was accepted and a stopping criterion is met.
    Converged,
    /// A new iterate was produced; not yet converged.
    NewIterate,
    /// Anything else: abnormal exit carrying the raw code.
    Abnormal(i32),
}

/// Classic `setulb`-style task-code map: 4, 20, 21 request an
/// evaluation, 6–8 signal convergence, 1 announces a new iterate.
pub fn classify_classic_task(task: i32) -> TaskSignal {
    match task {
        4 | 20 | 21 => TaskSignal::Evaluate,
        6..=8 => TaskSignal::Converged,
        1 => TaskSignal::NewIterate,
        other => TaskSignal::Abnormal(other),
    }
}

/// A bound-constrained solver backend driven by reverse communication.
///
/// One `step` performs a single unit of solver work and leaves the next
/// task code in `ws.task`. The caller owns `x` and `g` and must write
/// freshly computed values into them exactly when an evaluate signal is
/// decoded. The default provided methods encode the classic save-state
/// layout (`isave[29]` iteration count, `dsave[12]` projected gradient
/// norm) and task-code map; backends with different conventions override
/// them.
pub trait ReverseCommSolver {
    /// Perform one solver step.
    #[allow(clippy::too_many_arguments)]
    fn step(
        &mut self, ws: &mut Workspace, x: &mut Point, lb: &Point, ub: &Point, nbd: &[i32],
        f: &mut f64, g: &mut Grad, opts: &ReverseCommOptions,
    ) -> DriverResult<()>;

    /// Decode a task code into its signal class.
    fn classify(&self, task: i32) -> TaskSignal {
        classify_classic_task(task)
    }

    /// Task code to present on the first call.
    fn start_task(&self) -> i32 {
        START_TASK
    }

    /// Accepted-iterate count from the backend's save-state.
    fn iterations(&self, ws: &Workspace) -> usize {
        ws.isave[29].max(0) as usize
    }

    /// Projected gradient norm from the backend's save-state.
    fn projected_gradient_norm(&self, ws: &Workspace) -> f64 {
        ws.dsave[12]
    }
}

/// Configuration for a reverse-communication run.
///
/// - `mem`: memory depth `m` of the limited-memory approximation.
/// - `factr`: relative objective-change tolerance factor (0 disables).
/// - `pgtol`: projected-gradient-norm stopping threshold (0 disables).
/// - `max_iter`: cap on accepted iterates; reaching it is a soft cutoff.
/// - `verbose`: print setup details to stderr.
#[derive(Debug, Clone, PartialEq)]
pub struct ReverseCommOptions {
    pub mem: usize,
    pub factr: f64,
    pub pgtol: f64,
    pub max_iter: usize,
    pub verbose: bool,
}

impl ReverseCommOptions {
    /// Construct validated options.
    ///
    /// # Errors
    /// - [`DriverError::InvalidMemory`] if `mem` is zero.
    /// - [`DriverError::InvalidTolerance`] if `factr` or `pgtol` is
    ///   negative or non-finite (zero disables the respective test).
    /// - [`DriverError::InvalidMaxIter`] if the cap is zero.
    pub fn new(
        mem: usize, factr: f64, pgtol: f64, max_iter: usize, verbose: bool,
    ) -> DriverResult<Self> {
        verify_memory(mem)?;
        for tol in [factr, pgtol] {
            if !tol.is_finite() {
                return Err(DriverError::InvalidTolerance {
                    tol,
                    reason: "Tolerance must be finite.",
                });
            }
            if tol < 0.0 {
                return Err(DriverError::InvalidTolerance {
                    tol,
                    reason: "Tolerance must be non-negative.",
                });
            }
        }
        verify_max_iter(max_iter)?;
        Ok(Self { mem, factr, pgtol, max_iter, verbose })
    }
}

impl Default for ReverseCommOptions {
    /// Classic benchmark defaults: `m = 6`, `factr = 1e7`,
    /// `pgtol = 1e-5`, cap of 10 000 calls.
    fn default() -> Self {
        Self {
            mem: DEFAULT_MEM,
            factr: 1e7,
            pgtol: 1e-5,
            max_iter: DEFAULT_MAX_ITER,
            verbose: false,
        }
    }
}

/// Terminal state of the reverse-communication loop.
struct LoopOutcome {
    niter: usize,
    objval: f64,
}

/// Run a reverse-communication backend against a bound-constrained
/// problem and assemble the run's statistics record.
///
/// Stages: open, dimensions (general constraints rejected), setup, name
/// query, bound classification, the step loop, usage report. Setup-stage
/// failures produce a problem-error record with defaulted numeric
/// fields; loop failures produce a solver-error record carrying the
/// problem name and size. The session is torn down on every path when it
/// drops at the end of the call.
pub fn bound_constrained_stat<P, B>(
    source: &P, resource: &str, backend: &mut B, opts: &ReverseCommOptions,
) -> RunStat
where
    P: ProblemSource,
    B: ReverseCommSolver,
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
    if opts.verbose {
        eprintln!("nvar = {}", dims.nvar);
        if let (Some(&x0), Some(&lb), Some(&ub)) =
            (vectors.x0.first(), vectors.lb.first(), vectors.ub.first())
        {
            eprintln!("x0[0] = {x0:.6}, lb[0] = {lb:.6}, ub[0] = {ub:.6}");
        }
    }

    let prob = match session.name() {
        Ok(raw) => raw.trim_end().to_string(),
        Err(err) => return RunStat::setup_failure(&err),
    };

    let nbd = classify_all(&vectors.lb, &vectors.ub);
    let evaluator = ObjectiveEvaluator::new(&session, dims.nvar);
    let mut ws = Workspace::new(dims.nvar, opts.mem);
    ws.task = backend.start_task();

    let mut x = vectors.x0;
    let lb = vectors.lb;
    let ub = vectors.ub;
    match drive_loop(backend, &evaluator, &mut ws, &mut x, &lb, &ub, &nbd, opts) {
        Ok(outcome) => {
            let usage = session.usage();
            RunStat::success(
                prob,
                dims.nvar,
                outcome.niter,
                outcome.objval,
                backend.projected_gradient_norm(&ws),
                &usage,
            )
        }
        Err(err) => RunStat::run_failure(prob, dims.nvar, &err),
    }
}

/// The step loop: up to `max_iter` accepted iterates, dispatching on the
/// decoded task signal each backend call.
///
/// On an evaluate signal the objective and gradient are written into the
/// exact buffers the backend reads on its next call. The iteration
/// counter only moves on a new-iterate signal, via the backend's
/// save-state. An abnormal code stops the loop immediately; calling the
/// backend again after an error code is undefined from its perspective.
/// Total calls are bounded by `max_iter` times [`CALL_BUDGET_FACTOR`] so
/// a backend that never advances cannot loop forever.
#[allow(clippy::too_many_arguments)]
fn drive_loop<S, B>(
    backend: &mut B, evaluator: &ObjectiveEvaluator<'_, S>, ws: &mut Workspace, x: &mut Point,
    lb: &Point, ub: &Point, nbd: &[i32], opts: &ReverseCommOptions,
) -> DriverResult<LoopOutcome>
where
    S: ProblemSession,
    B: ReverseCommSolver,
{
    let mut fx = 0.0;
    let mut grad: Grad = Array1::zeros(x.len());
    let mut niter = 0usize;
    let mut calls = 0usize;
    let call_budget = opts.max_iter.saturating_mul(CALL_BUDGET_FACTOR);
    while niter < opts.max_iter && calls < call_budget {
        backend.step(ws, x, lb, ub, nbd, &mut fx, &mut grad, opts)?;
        calls += 1;
        match backend.classify(ws.task) {
            TaskSignal::Evaluate => {
                fx = evaluator.eval(x, &mut grad)?;
            }
            TaskSignal::Converged => break,
            TaskSignal::NewIterate => {
                niter = backend.iterations(ws);
            }
            TaskSignal::Abnormal(code) => {
                return Err(DriverError::AbnormalExit { task: code });
            }
        }
    }
    Ok(LoopOutcome { niter, objval: fx })
}
