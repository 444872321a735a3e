//! Integration tests for the benchmark driver pipeline.
//!
//! Purpose
//! -------
//! - Validate the end-to-end pipeline on the built-in extended-Rosenbrock
//!   repository: session setup, bound handling, both driver disciplines,
//!   statistics assembly, and side-by-side comparison.
//! - Exercise a genuine optimization through each driver — the `argmin`
//!   L-BFGS backend through the direct-call driver, and a projected
//!   gradient method speaking the task-code protocol through the
//!   reverse-communication driver — rather than scripted doubles only.
//!
//! Coverage
//! --------
//! - `driver::direct` + `driver::lbfgs`:
//!   - Full unconstrained runs with both line searches, checked against
//!     the known optimum.
//! - `driver::reverse`:
//!   - A working reverse-communication backend driven to convergence on
//!     the box-constrained problem, with the projected gradient norm
//!     read back from the save-state convention.
//! - `report::stats` + `report::compare`:
//!   - Tagged pairing of two runs and lossless serde round-trips of the
//!     resulting records.
//!
//! Exclusions
//! ----------
//! - Fine-grained behavior of classification, validation, and error
//!   conversion — covered by unit tests next to each module.
//! - Performance and large-dimension stress runs.
use ndarray::Array1;
use qnbench::{
    driver::{
        direct::{unconstrained_stat, DirectOptions, LineSearcher},
        lbfgs::LbfgsBackend,
        reverse::{bound_constrained_stat, ReverseCommOptions, ReverseCommSolver, Workspace},
        types::{Grad, Point},
    },
    errors::DriverResult,
    problem::rosenbrock::{RosenbrockSource, ROSENBROCK_RESOURCE},
    report::{
        compare::{compare_backends, SolverTag, TaggedStat},
        stats::{RunFlag, RunStat},
    },
};

/// Purpose
/// -------
/// Provide a real reverse-communication backend for integration testing:
/// projected gradient descent speaking the classic task-code protocol.
///
/// Protocol
/// --------
/// - On the start code it requests an evaluation (task 21).
/// - With a fresh value/gradient in hand it computes the projected
///   gradient norm, stores it in `dsave[12]`, and either announces
///   convergence (task 7) when the norm is within `pgtol`, or takes a
///   projected step, bumps `isave[29]`, and announces a new iterate
///   (task 1).
/// - After a new iterate it requests a fresh evaluation before deciding
///   again.
///
/// Invariants
/// ----------
/// - Mutates `x` only when announcing a new iterate, and always keeps it
///   inside `[lb, ub]` componentwise.
/// - Never touches the driver-owned workspace outside the task code and
///   the two save-state slots of the classic convention.
struct ProjectedGradient {
    step_size: f64,
    phase: Phase,
}

enum Phase {
    Start,
    HaveEval,
    NeedEval,
}

impl ProjectedGradient {
    fn new(step_size: f64) -> Self {
        Self { step_size, phase: Phase::Start }
    }
}

fn clamp_into(x: &Point, lb: &Point, ub: &Point) -> Point {
    Array1::from_shape_fn(x.len(), |i| x[i].max(lb[i]).min(ub[i]))
}

impl ReverseCommSolver for ProjectedGradient {
    fn step(
        &mut self, ws: &mut Workspace, x: &mut Point, lb: &Point, ub: &Point, _nbd: &[i32],
        _f: &mut f64, g: &mut Grad, opts: &ReverseCommOptions,
    ) -> DriverResult<()> {
        match self.phase {
            Phase::Start | Phase::NeedEval => {
                ws.task = 21;
                self.phase = Phase::HaveEval;
            }
            Phase::HaveEval => {
                let proj = clamp_into(&(&*x - &*g), lb, ub);
                let pg = (&proj - &*x).mapv(|v| v * v).sum().sqrt();
                ws.dsave[12] = pg;
                if pg <= opts.pgtol {
                    ws.task = 7;
                } else {
                    let stepped = clamp_into(&(&*x - &(g.mapv(|v| v * self.step_size))), lb, ub);
                    x.assign(&stepped);
                    ws.isave[29] += 1;
                    ws.task = 1;
                    self.phase = Phase::NeedEval;
                }
            }
        }
        Ok(())
    }
}

/// Purpose
/// -------
/// Build the default direct-call L-BFGS backend with a chosen line
/// search, leaving every other option at the benchmark defaults.
fn lbfgs_with(line_searcher: LineSearcher) -> LbfgsBackend {
    let opts = DirectOptions { line_searcher, ..DirectOptions::default() };
    LbfgsBackend::new(opts)
}

#[test]
// Purpose
// -------
// A full direct-call run on the unconstrained extended Rosenbrock
// problem converges to the known optimum and produces a fully populated
// record backed by the repository's own counters.
//
// Given
// -----
// - The unconstrained repository with n = 10, classic start (-1.2, 1, …).
// - The L-BFGS backend with default options (More–Thuente line search).
//
// Expect
// ------
// - flag = 0, problem name trimmed to "ROSENBROCK", nvar = 10.
// - Final objective near zero, gradient norm within tolerance scale.
// - Positive iteration and evaluation counts, nfun ≥ niter.
fn direct_driver_solves_unconstrained_rosenbrock() {
    let source = RosenbrockSource::unconstrained(10);
    let mut backend = lbfgs_with(LineSearcher::MoreThuente);
    let stat = unconstrained_stat(&source, ROSENBROCK_RESOURCE, &mut backend);

    assert_eq!(stat.flag, RunFlag::Normal, "unexpected failure: {}", stat.msg);
    assert_eq!(stat.prob, "ROSENBROCK");
    assert_eq!(stat.nvar, 10);
    assert!(stat.objval < 1e-6, "objective {} not near zero", stat.objval);
    assert!(stat.proj_grad < 1e-3, "gradient norm {} too large", stat.proj_grad);
    assert!(stat.niter > 0);
    assert!(stat.nfun >= stat.niter);
}

#[test]
// Purpose
// -------
// The reverse-communication driver, fed by a real projected-gradient
// backend, converges on the box-constrained problem to the constrained
// optimum at (2, 4, …) with objective 1 per variable pair.
//
// Given
// -----
// - The boxed repository with n = 6 (lb = 2, ub = 4, x0 = 3).
// - Projected gradient descent with step 1e-3 and default stopping
//   options (pgtol = 1e-5).
//
// Expect
// ------
// - flag = 0 with objval near n/2 (one unit per pair).
// - proj_grad below pgtol, read back from the save-state slot.
// - niter > 0 and nfun counted by the repository.
fn reverse_driver_solves_boxed_rosenbrock() {
    let source = RosenbrockSource::boxed(6);
    let mut backend = ProjectedGradient::new(1e-3);
    let opts = ReverseCommOptions::default();
    let stat = bound_constrained_stat(&source, ROSENBROCK_RESOURCE, &mut backend, &opts);

    assert_eq!(stat.flag, RunFlag::Normal, "unexpected failure: {}", stat.msg);
    assert_eq!(stat.prob, "ROSENBROCK");
    assert_eq!(stat.nvar, 6);
    assert!((stat.objval - 3.0).abs() < 1e-3, "objective {} not near 3", stat.objval);
    assert!(stat.proj_grad <= opts.pgtol);
    assert!(stat.niter > 0);
    assert!(stat.nfun > 0);
}

#[test]
// Purpose
// -------
// The comparison harness runs the reverse-communication and direct-call
// pairings sequentially against the same problem family and tags both
// records; single-active-problem semantics hold because each run tears
// its session down before the next begins.
//
// Given
// -----
// - The boxed repository for the reverse run, the unconstrained one for
//   the direct run, both n = 4.
//
// Expect
// ------
// - Both records flag 0 with their respective tags attached.
fn harness_pairs_reverse_and_direct_runs() {
    let boxed = RosenbrockSource::boxed(4);
    let unconstrained = RosenbrockSource::unconstrained(4);
    let opts = ReverseCommOptions::default();

    let (first, second) = compare_backends(
        (SolverTag::new("projected-gradient", "reverse-comm"), || {
            let mut backend = ProjectedGradient::new(1e-3);
            bound_constrained_stat(&boxed, ROSENBROCK_RESOURCE, &mut backend, &opts)
        }),
        (SolverTag::new("L-BFGS", "argmin/HagerZhang"), || {
            let mut backend = lbfgs_with(LineSearcher::HagerZhang);
            unconstrained_stat(&unconstrained, ROSENBROCK_RESOURCE, &mut backend)
        }),
    );

    assert_eq!(first.alg, "projected-gradient");
    assert_eq!(first.stat.flag, RunFlag::Normal, "reverse run failed: {}", first.stat.msg);
    assert_eq!(second.solver, "argmin/HagerZhang");
    assert_eq!(second.stat.flag, RunFlag::Normal, "direct run failed: {}", second.stat.msg);
    assert_eq!(first.stat.prob, second.stat.prob);
}

#[test]
// Purpose
// -------
// Records that went through a real run serialize to the external schema
// and parse back field-for-field, tags included.
fn run_records_round_trip_through_serde() {
    let source = RosenbrockSource::unconstrained(4);
    let mut backend = lbfgs_with(LineSearcher::MoreThuente);
    let stat = unconstrained_stat(&source, ROSENBROCK_RESOURCE, &mut backend);
    assert_eq!(stat.flag, RunFlag::Normal);

    let json = serde_json::to_string(&stat).expect("record should serialize");
    let parsed: RunStat = serde_json::from_str(&json).expect("record should parse back");
    assert_eq!(parsed, stat);

    let tagged = TaggedStat::new(SolverTag::new("L-BFGS", "argmin/MoreThuente"), stat);
    let json = serde_json::to_string(&tagged).expect("tagged record should serialize");
    let parsed: TaggedStat = serde_json::from_str(&json).expect("tagged record should parse back");
    assert_eq!(parsed, tagged);
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
    assert_eq!(value["alg"], "L-BFGS");
    assert_eq!(value["problem"], "ROSENBROCK");
    assert_eq!(value["flag"], 0);
}

#[test]
// Purpose
// -------
// Pointing the direct-call (unconstrained-only) driver at the boxed
// problem and the reverse driver at an odd dimension both end in
// problem-error records, with the session released for a later run.
fn mismatched_problem_shapes_fail_cleanly() {
    let boxed = RosenbrockSource::boxed(4);
    let mut direct_backend = lbfgs_with(LineSearcher::MoreThuente);
    let stat = unconstrained_stat(&boxed, ROSENBROCK_RESOURCE, &mut direct_backend);
    assert_eq!(stat.flag, RunFlag::ProblemError);
    assert!(stat.msg.contains("not unconstrained"));

    // The failed run released its session; the boxed problem still works
    // through the right driver.
    let mut reverse_backend = ProjectedGradient::new(1e-3);
    let opts = ReverseCommOptions::default();
    let stat = bound_constrained_stat(&boxed, ROSENBROCK_RESOURCE, &mut reverse_backend, &opts);
    assert_eq!(stat.flag, RunFlag::Normal, "retry failed: {}", stat.msg);
}
