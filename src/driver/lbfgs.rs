//! `argmin`-powered L-BFGS backend for the direct-call driver.
//!
//! Wires the [`ArgminAdapter`] and a solver from [`builders`] into an
//! `argmin` executor, runs it to completion, and converts the terminal
//! state into a [`DirectOutcome`]. This is the crate's built-in
//! [`DirectSolver`]; alternative direct-call backends plug in through the
//! same trait.
use argmin::core::{Executor, State};
use argmin_math::ArgminL2Norm;

use crate::{
    driver::{
        adapter::ArgminAdapter,
        builders::{build_lbfgs_hager_zhang, build_lbfgs_more_thuente},
        direct::{default_max_iter, DirectOptions, DirectOutcome, DirectSolver, LineSearcher},
        evaluator::ObjectiveEvaluator,
        types::{Grad, Point},
    },
    errors::{DriverError, DriverResult},
    problem::traits::ProblemSession,
};

/// Direct-call backend running `argmin`'s L-BFGS.
#[derive(Debug, Clone)]
pub struct LbfgsBackend {
    pub opts: DirectOptions,
}

impl LbfgsBackend {
    pub fn new(opts: DirectOptions) -> Self {
        Self { opts }
    }
}

impl DirectSolver for LbfgsBackend {
    /// Run L-BFGS from `x0` with the configured line search.
    ///
    /// # Errors
    /// Any failure raised during minimization — including repository
    /// evaluation failures crossing back through the `argmin` boundary —
    /// is returned for the driver to fold into the run record.
    fn minimize<S: ProblemSession>(
        &mut self, evaluator: &ObjectiveEvaluator<'_, S>, x0: Point,
    ) -> DriverResult<DirectOutcome> {
        let n = x0.len();
        let problem = ArgminAdapter::new(evaluator, n);
        match self.opts.line_searcher {
            LineSearcher::MoreThuente => {
                let solver = build_lbfgs_more_thuente(&self.opts)?;
                run_executor(x0, &self.opts, evaluator, problem, solver)
            }
            LineSearcher::HagerZhang => {
                let solver = build_lbfgs_hager_zhang(&self.opts)?;
                run_executor(x0, &self.opts, evaluator, problem, solver)
            }
        }
    }
}

/// Shared executor runner for both line-search variants.
///
/// Configures the initial point and iteration cap, optionally attaches a
/// terminal observer (behind the `obs_slog` feature), runs the solver,
/// and extracts iterations, best value, solution point, and the final
/// gradient norm. When the terminal state no longer holds a gradient, the
/// norm is recomputed at the solution through the evaluator; the extra
/// evaluation is counted by the repository like any other.
fn run_executor<'a, S, Sol>(
    x0: Point, opts: &DirectOptions, evaluator: &ObjectiveEvaluator<'a, S>,
    problem: ArgminAdapter<'a, S>, solver: Sol,
) -> DriverResult<DirectOutcome>
where
    S: ProblemSession,
    Sol: argmin::core::Solver<
            ArgminAdapter<'a, S>,
            argmin::core::IterState<Point, Grad, (), (), (), f64>,
        > + Send
        + 'static,
{
    let n = x0.len();
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        log_initial_state(&x0, evaluator)?;
    }
    let cap = opts.max_iter.unwrap_or_else(|| default_max_iter(n)) as u64;
    let mut executor = Executor::new(problem, solver);
    executor = executor.configure(|state| state.param(x0).max_iters(cap));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        executor = executor.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }

    let mut state = executor.run()?.state().clone();
    let niter = state.get_iter() as usize;
    let objval = state.get_best_cost();
    let grad = state.take_gradient();
    let x = state.take_best_param().ok_or(DriverError::MissingSolution)?;
    let grad_norm = match grad {
        Some(g) => g.l2_norm(),
        None => {
            let (_, g) = evaluator.eval_fresh(&x)?;
            g.l2_norm()
        }
    };
    Ok(DirectOutcome { x, objval, niter, grad_norm })
}

#[cfg(feature = "obs_slog")]
fn log_initial_state<S: ProblemSession>(
    x0: &Point, evaluator: &ObjectiveEvaluator<'_, S>,
) -> DriverResult<()> {
    let (f0, g0) = evaluator.eval_fresh(x0)?;
    eprintln!("init: f(x0) = {:.6}, ||grad|| = {:.6}", f0, g0.l2_norm());
    Ok(())
}
