//! Validation helpers shared by the driver configuration and adapters.
//!
//! - **Tolerance checks**: [`verify_tolerance`] ensures numeric tolerances
//!   are finite and strictly positive when provided.
//! - **Gradient validation**: [`validate_gradient`] enforces correct
//!   dimension and finite entries before a gradient is handed to a solver.
//! - **Iteration caps**: [`verify_max_iter`] rejects a zero cap.
//!
//! These helpers standardize error reporting through [`DriverError`]
//! variants so configuration failures read the same everywhere.
use crate::{
    driver::types::Grad,
    errors::{DriverError, DriverResult},
};

/// Validate an optional tolerance value.
///
/// - Accepts `None` (the corresponding stopping rule is disabled).
/// - If `Some`, the value must be finite and strictly positive.
///
/// # Errors
/// Returns [`DriverError::InvalidTolerance`] if the value is non-finite
/// or ≤ 0.0.
pub fn verify_tolerance(tol: Option<f64>) -> DriverResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(DriverError::InvalidTolerance {
                tol,
                reason: "Tolerance must be finite.",
            });
        }
        if tol <= 0.0 {
            return Err(DriverError::InvalidTolerance {
                tol,
                reason: "Tolerance must be positive.",
            });
        }
    }
    Ok(())
}

/// Validate an iteration cap.
///
/// # Errors
/// Returns [`DriverError::InvalidMaxIter`] if the cap is zero.
pub fn verify_max_iter(max_iter: usize) -> DriverResult<()> {
    if max_iter == 0 {
        return Err(DriverError::InvalidMaxIter {
            max_iter,
            reason: "Maximum iterations must be greater than zero.",
        });
    }
    Ok(())
}

/// Validate a memory depth.
///
/// # Errors
/// Returns [`DriverError::InvalidMemory`] if the depth is zero.
pub fn verify_memory(mem: usize) -> DriverResult<()> {
    if mem == 0 {
        return Err(DriverError::InvalidMemory {
            mem,
            reason: "Memory depth must be at least one.",
        });
    }
    Ok(())
}

/// Validate a gradient vector against dimension and finiteness.
///
/// # Errors
/// Returns [`DriverError::Evaluation`] naming the first offending element
/// or the dimension mismatch.
pub fn validate_gradient(grad: &Grad, dim: usize) -> DriverResult<()> {
    if grad.len() != dim {
        return Err(DriverError::Evaluation {
            reason: format!("gradient has length {}, expected {dim}", grad.len()),
        });
    }
    for (index, &value) in grad.iter().enumerate() {
        if !value.is_finite() {
            return Err(DriverError::Evaluation {
                reason: format!("gradient element {index} is not finite: {value}"),
            });
        }
    }
    Ok(())
}
