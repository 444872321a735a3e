//! Adapter that exposes an [`ObjectiveEvaluator`] as an `argmin` problem.
//!
//! Direct-call backends built on `argmin` ask for cost and gradient through
//! the `CostFunction` and `Gradient` traits; both are answered from the
//! repository's combined value-and-gradient evaluation. Repository failures
//! cross the `argmin` boundary boxed and are recovered intact on the way
//! back out (see `From<argmin::core::Error>` on the crate error), so their
//! message text reaches the run record verbatim. The direct driver then
//! reports any failure out of minimize as a solver error.
use crate::{
    driver::{
        evaluator::ObjectiveEvaluator,
        types::{Grad, Point},
        validation::validate_gradient,
    },
    errors::DriverError,
    problem::traits::ProblemSession,
};
use argmin::core::{CostFunction, Error, Gradient};

/// Bridges an [`ObjectiveEvaluator`] to `argmin`'s problem traits.
#[derive(Debug)]
pub struct ArgminAdapter<'a, S: ProblemSession> {
    evaluator: &'a ObjectiveEvaluator<'a, S>,
    n: usize,
}

// Copying duplicates the borrow, not the session, so no bound on S is
// needed; derives would demand S: Clone/Copy.
impl<S: ProblemSession> Clone for ArgminAdapter<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: ProblemSession> Copy for ArgminAdapter<'_, S> {}

impl<'a, S: ProblemSession> ArgminAdapter<'a, S> {
    pub fn new(evaluator: &'a ObjectiveEvaluator<'a, S>, n: usize) -> Self {
        Self { evaluator, n }
    }
}

impl<'a, S: ProblemSession> CostFunction for ArgminAdapter<'a, S> {
    type Param = Point;
    type Output = f64;

    /// Evaluate the objective at `x`.
    ///
    /// Rejects non-finite values before they reach the solver.
    ///
    /// # Errors
    /// Propagates repository failures via `?`; returns
    /// [`DriverError::NonFiniteObjective`] for NaN or infinite values.
    fn cost(&self, x: &Self::Param) -> Result<Self::Output, Error> {
        let (value, _) = self.evaluator.eval_fresh(x)?;
        if !value.is_finite() {
            return Err((DriverError::NonFiniteObjective { value }).into());
        }
        Ok(value)
    }
}

impl<'a, S: ProblemSession> Gradient for ArgminAdapter<'a, S> {
    type Param = Point;
    type Gradient = Grad;

    /// Evaluate the gradient at `x`.
    ///
    /// # Errors
    /// Propagates repository failures via `?`; rejects gradients with the
    /// wrong dimension or non-finite entries.
    fn gradient(&self, x: &Self::Param) -> Result<Self::Gradient, Error> {
        let (_, grad) = self.evaluator.eval_fresh(x)?;
        validate_gradient(&grad, self.n)?;
        Ok(grad)
    }
}
