//! Objective/gradient evaluation adapter over an open problem session.
//!
//! Thin by design: the evaluator forwards to the session's combined
//! value-and-gradient call and propagates repository failures unchanged.
//! It keeps no counters and no history — the session's own instrumentation
//! is authoritative for evaluation counts.
use crate::{
    driver::types::{Grad, Point},
    errors::DriverResult,
    problem::traits::ProblemSession,
};
use ndarray::Array1;

/// Adapter asking the problem repository for objective value and gradient.
#[derive(Debug)]
pub struct ObjectiveEvaluator<'a, S: ProblemSession> {
    session: &'a S,
    n: usize,
}

// Copying duplicates the borrow, not the session, so no bound on S is
// needed; derives would demand S: Clone/Copy.
impl<S: ProblemSession> Clone for ObjectiveEvaluator<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: ProblemSession> Copy for ObjectiveEvaluator<'_, S> {}

impl<'a, S: ProblemSession> ObjectiveEvaluator<'a, S> {
    pub fn new(session: &'a S, n: usize) -> Self {
        Self { session, n }
    }

    /// Evaluate at `x`, writing the gradient into `grad` and returning the
    /// objective value.
    ///
    /// # Errors
    /// Propagates [`crate::errors::DriverError::Evaluation`] from the
    /// repository; this is the evaluator's only failure mode.
    pub fn eval(&self, x: &Point, grad: &mut Grad) -> DriverResult<f64> {
        self.session.eval(x, grad)
    }

    /// Evaluate at `x` into a freshly allocated gradient.
    ///
    /// Used by callback-style backends that want an owned `(value,
    /// gradient)` pair per request.
    pub fn eval_fresh(&self, x: &Point) -> DriverResult<(f64, Grad)> {
        let mut grad = Array1::zeros(self.n);
        let value = self.session.eval(x, &mut grad)?;
        Ok((value, grad))
    }
}
