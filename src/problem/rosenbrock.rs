//! In-memory extended-Rosenbrock problem repository.
//!
//! A self-contained [`ProblemSource`] used by the test suite and demos.
//! It reproduces the classic benchmark setups: the box-constrained variant
//! with `lb = 2`, `ub = 4`, starting point `3` in every coordinate, and
//! the unconstrained variant starting from `(-1.2, 1, -1.2, 1, …)` with
//! bounds reported as ±1e20 sentinels, the same "fake infinity" convention
//! real problem repositories use.
//!
//! The source enforces single-active-problem semantics: opening a second
//! session while one is alive fails, and dropping a session releases the
//! slot. Evaluation counts and setup/solve timers live in the session so
//! that [`ProblemSession::usage`] is authoritative.
use std::{
    cell::Cell,
    rc::Rc,
    time::Instant,
};

use ndarray::Array1;

use crate::{
    driver::types::{Grad, Point},
    errors::{DriverError, DriverResult},
    problem::traits::{Dimensions, ProblemSession, ProblemSource, ProblemVectors, UsageReport},
};

/// Fixed width of repository problem names.
const NAME_WIDTH: usize = 16;

/// Sentinel magnitude used for "no bound" in the unconstrained variant.
const BOUND_SENTINEL: f64 = 1.0e20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Variant {
    Boxed,
    Unconstrained,
}

/// In-memory repository serving one extended-Rosenbrock problem.
#[derive(Debug, Clone)]
pub struct RosenbrockSource {
    n: usize,
    variant: Variant,
    active: Rc<Cell<bool>>,
}

/// Resource key the source answers to, playing the role of the problem
/// description file name.
pub const ROSENBROCK_RESOURCE: &str = "ROSENBROCK.d";

impl RosenbrockSource {
    /// Box-constrained variant: `lb = 2`, `ub = 4`, `x0 = 3` everywhere.
    pub fn boxed(n: usize) -> Self {
        Self { n, variant: Variant::Boxed, active: Rc::new(Cell::new(false)) }
    }

    /// Unconstrained variant: sentinel ±1e20 bounds, classic start
    /// `(-1.2, 1, …)`.
    pub fn unconstrained(n: usize) -> Self {
        Self { n, variant: Variant::Unconstrained, active: Rc::new(Cell::new(false)) }
    }
}

impl ProblemSource for RosenbrockSource {
    type Session = RosenbrockSession;

    /// Open the problem description resource.
    ///
    /// # Errors
    /// - [`DriverError::ProblemOpen`] if `resource` does not match
    ///   [`ROSENBROCK_RESOURCE`] or a session is already active.
    fn open(&self, resource: &str) -> DriverResult<RosenbrockSession> {
        if resource != ROSENBROCK_RESOURCE {
            return Err(DriverError::ProblemOpen {
                resource: resource.to_string(),
                reason: "no such problem description resource".to_string(),
            });
        }
        if self.active.get() {
            return Err(DriverError::ProblemOpen {
                resource: resource.to_string(),
                reason: "another session is still active".to_string(),
            });
        }
        self.active.set(true);
        Ok(RosenbrockSession {
            n: self.n,
            variant: self.variant,
            active: Rc::clone(&self.active),
            opened_at: Instant::now(),
            setup_done: Cell::new(None),
            evals: Cell::new(0),
        })
    }
}

/// Open session over the extended-Rosenbrock problem.
///
/// Dropping the session releases the source's single-active-problem slot.
#[derive(Debug)]
pub struct RosenbrockSession {
    n: usize,
    variant: Variant,
    active: Rc<Cell<bool>>,
    opened_at: Instant,
    setup_done: Cell<Option<Instant>>,
    evals: Cell<usize>,
}

impl ProblemSession for RosenbrockSession {
    fn dimensions(&self) -> DriverResult<Dimensions> {
        Ok(Dimensions { nvar: self.n, nconstr: 0 })
    }

    fn setup(&self) -> DriverResult<ProblemVectors> {
        if self.n == 0 || self.n % 2 != 0 {
            return Err(DriverError::Setup {
                reason: format!("extended Rosenbrock needs a positive even dimension, got {}", self.n),
            });
        }
        let vectors = match self.variant {
            Variant::Boxed => ProblemVectors {
                x0: Array1::from_elem(self.n, 3.0),
                lb: Array1::from_elem(self.n, 2.0),
                ub: Array1::from_elem(self.n, 4.0),
            },
            Variant::Unconstrained => ProblemVectors {
                x0: Array1::from_shape_fn(self.n, |i| if i % 2 == 0 { -1.2 } else { 1.0 }),
                lb: Array1::from_elem(self.n, -BOUND_SENTINEL),
                ub: Array1::from_elem(self.n, BOUND_SENTINEL),
            },
        };
        self.setup_done.set(Some(Instant::now()));
        Ok(vectors)
    }

    fn name(&self) -> DriverResult<String> {
        Ok(format!("{:<NAME_WIDTH$}", "ROSENBROCK"))
    }

    /// Extended Rosenbrock objective and gradient over consecutive pairs:
    /// `f = Σ (1 - x_i)² + (10 (x_{i+1} - x_i²))²` for even `i`.
    fn eval(&self, x: &Point, grad: &mut Grad) -> DriverResult<f64> {
        if x.len() != self.n || grad.len() != self.n {
            return Err(DriverError::Evaluation {
                reason: format!(
                    "dimension mismatch: point {}, gradient {}, expected {}",
                    x.len(),
                    grad.len(),
                    self.n
                ),
            });
        }
        self.evals.set(self.evals.get() + 1);
        let mut fx = 0.0;
        let mut i = 0;
        while i < self.n {
            let t1 = 1.0 - x[i];
            let t2 = 10.0 * (x[i + 1] - x[i] * x[i]);
            grad[i + 1] = 20.0 * t2;
            grad[i] = -2.0 * (x[i] * grad[i + 1] + t1);
            fx += t1 * t1 + t2 * t2;
            i += 2;
        }
        Ok(fx)
    }

    fn usage(&self) -> UsageReport {
        let (setup_time, solve_time) = match self.setup_done.get() {
            Some(done) => (
                done.duration_since(self.opened_at).as_secs_f64(),
                done.elapsed().as_secs_f64(),
            ),
            None => (self.opened_at.elapsed().as_secs_f64(), 0.0),
        };
        UsageReport { fn_evals: self.evals.get(), setup_time, solve_time }
    }
}

impl Drop for RosenbrockSession {
    fn drop(&mut self) {
        self.active.set(false);
    }
}
