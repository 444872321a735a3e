//! Crate-wide error taxonomy for benchmark runs.
//!
//! Every failure a run can hit is funneled into [`DriverError`], whether it
//! originates in the problem repository (open/dimension/setup/name/eval
//! failures), in a solver backend (abnormal task codes, minimize failures),
//! or in configuration validation. [`DriverError::flag`] maps each variant
//! onto the run-status flag recorded in the result schema, so the stats
//! layer never has to re-derive the taxonomy.
//!
//! Backend errors raised through `argmin` are converted back via
//! `From<argmin::core::Error>`: if the boxed error is actually a
//! [`DriverError`] that crossed the solver boundary (e.g. an evaluation
//! failure inside a line search), it is recovered intact so it keeps its
//! original classification; anything else becomes [`DriverError::Backend`].
use crate::report::stats::RunFlag;
use argmin::core::Error;

/// Crate-wide result alias for driver operations.
pub type DriverResult<T> = Result<T, DriverError>;

#[derive(Debug, Clone, PartialEq)]
pub enum DriverError {
    // ---- Problem repository (flag = 2) ----
    /// The named problem description resource could not be opened.
    ProblemOpen {
        resource: String,
        reason: String,
    },
    /// The repository failed to report problem dimensions.
    Dimension {
        reason: String,
    },
    /// The problem has general constraints; only bound constraints (or
    /// none) are supported.
    UnsupportedConstraints {
        count: usize,
    },
    /// An unconstrained-only driver was pointed at a problem with at least
    /// one effective bound.
    NotUnconstrained {
        bound: f64,
    },
    /// The repository failed while producing the initial point and bounds.
    Setup {
        reason: String,
    },
    /// The repository failed to report the problem name.
    ProblemName {
        reason: String,
    },
    /// Objective/gradient evaluation failed inside the repository.
    Evaluation {
        reason: String,
    },

    // ---- Solver backends (flag = 1) ----
    /// A reverse-communication backend returned a task code outside the
    /// evaluate/converged/new-iterate classes.
    AbnormalExit {
        task: i32,
    },
    /// A direct-call backend finished without producing a solution point.
    MissingSolution,
    /// The objective evaluated to a non-finite value.
    NonFiniteObjective {
        value: f64,
    },
    /// Unclassified failure raised by a solver backend.
    Backend {
        text: String,
    },

    // ---- Configuration (flag = 1) ----
    /// Memory depth must be at least 1.
    InvalidMemory {
        mem: usize,
        reason: &'static str,
    },
    /// Tolerances must be finite and strictly positive.
    InvalidTolerance {
        tol: f64,
        reason: &'static str,
    },
    /// Iteration caps must be positive.
    InvalidMaxIter {
        max_iter: usize,
        reason: &'static str,
    },
    /// Unrecognized line-search name.
    InvalidLineSearch {
        name: String,
        reason: &'static str,
    },
}

impl DriverError {
    /// Status flag recorded in the result schema for this error.
    ///
    /// Repository-side failures map to [`RunFlag::ProblemError`] (2),
    /// everything raised by or around a solver backend maps to
    /// [`RunFlag::SolverError`] (1). The mapping lives here so every
    /// driver and the stats layer agree on it.
    pub fn flag(&self) -> RunFlag {
        match self {
            DriverError::ProblemOpen { .. }
            | DriverError::Dimension { .. }
            | DriverError::UnsupportedConstraints { .. }
            | DriverError::NotUnconstrained { .. }
            | DriverError::Setup { .. }
            | DriverError::ProblemName { .. }
            | DriverError::Evaluation { .. } => RunFlag::ProblemError,
            DriverError::AbnormalExit { .. }
            | DriverError::MissingSolution
            | DriverError::NonFiniteObjective { .. }
            | DriverError::Backend { .. }
            | DriverError::InvalidMemory { .. }
            | DriverError::InvalidTolerance { .. }
            | DriverError::InvalidMaxIter { .. }
            | DriverError::InvalidLineSearch { .. } => RunFlag::SolverError,
        }
    }
}

impl std::error::Error for DriverError {}

impl std::fmt::Display for DriverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DriverError::ProblemOpen { resource, reason } => {
                write!(f, "Error opening problem resource {resource}: {reason}")
            }
            DriverError::Dimension { reason } => {
                write!(f, "Error getting problem dimension: {reason}")
            }
            DriverError::UnsupportedConstraints { count } => {
                write!(f, "Problem contains {count} general constraints")
            }
            DriverError::NotUnconstrained { bound } => {
                write!(f, "Problem is not unconstrained: effective bound {bound}")
            }
            DriverError::Setup { reason } => {
                write!(f, "Error setting up problem: {reason}")
            }
            DriverError::ProblemName { reason } => {
                write!(f, "Error getting problem name: {reason}")
            }
            DriverError::Evaluation { reason } => {
                write!(f, "Objective evaluation failed: {reason}")
            }
            DriverError::AbnormalExit { task } => {
                write!(f, "Solver abnormal exit. itask = {task}")
            }
            DriverError::MissingSolution => {
                write!(f, "Solver finished without a solution point")
            }
            DriverError::NonFiniteObjective { value } => {
                write!(f, "Objective returned a non-finite value: {value}")
            }
            DriverError::Backend { text } => {
                write!(f, "Solver backend error: {text}")
            }
            DriverError::InvalidMemory { mem, reason } => {
                write!(f, "Invalid memory depth {mem}: {reason}")
            }
            DriverError::InvalidTolerance { tol, reason } => {
                write!(f, "Invalid tolerance {tol}: {reason}")
            }
            DriverError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}: {reason}")
            }
            DriverError::InvalidLineSearch { name, reason } => {
                write!(f, "Invalid line searcher '{name}': {reason}")
            }
        }
    }
}

impl From<Error> for DriverError {
    /// Recover a [`DriverError`] that crossed an `argmin` boundary, or wrap
    /// anything else as [`DriverError::Backend`] with its message text
    /// preserved verbatim.
    fn from(original_err: Error) -> Self {
        match original_err.downcast::<DriverError>() {
            Ok(driver_err) => driver_err,
            Err(err) => DriverError::Backend { text: err.to_string() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Repository-side variants must map to the problem-error flag and
    // solver-side variants to the solver-error flag.
    fn flag_mapping_follows_taxonomy() {
        assert_eq!(
            DriverError::UnsupportedConstraints { count: 3 }.flag(),
            RunFlag::ProblemError
        );
        assert_eq!(
            DriverError::Evaluation { reason: "bad point".to_string() }.flag(),
            RunFlag::ProblemError
        );
        assert_eq!(DriverError::AbnormalExit { task: -5 }.flag(), RunFlag::SolverError);
        assert_eq!(
            DriverError::Backend { text: "line search failed".to_string() }.flag(),
            RunFlag::SolverError
        );
    }

    #[test]
    // Purpose
    // -------
    // The abnormal-exit message must name the offending task code so it
    // survives verbatim into the result record.
    fn abnormal_exit_message_names_task_code() {
        let err = DriverError::AbnormalExit { task: -5 };
        assert!(err.to_string().contains("-5"));
    }

    #[test]
    // Purpose
    // -------
    // A DriverError pushed through argmin's boxed error type must come
    // back out as the same variant, not as a Backend wrapper.
    //
    // Given
    // -----
    // - An Evaluation error converted into argmin::core::Error.
    //
    // Expect
    // ------
    // - From<Error> recovers the original variant with flag 2.
    fn argmin_round_trip_preserves_variant() {
        let original = DriverError::Evaluation { reason: "repository failure".to_string() };
        let boxed: Error = original.clone().into();
        let recovered = DriverError::from(boxed);
        assert_eq!(recovered, original);
        assert_eq!(recovered.flag(), RunFlag::ProblemError);
    }

    #[test]
    // Purpose
    // -------
    // Foreign errors crossing the argmin boundary become Backend errors
    // with their message text preserved.
    fn foreign_argmin_error_becomes_backend() {
        let boxed = Error::msg("Condition violated: line search");
        let recovered = DriverError::from(boxed);
        match recovered {
            DriverError::Backend { text } => assert!(text.contains("line search")),
            other => panic!("expected Backend, got {other:?}"),
        }
    }
}
