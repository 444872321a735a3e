//! L-BFGS solver construction helpers for the direct-call backend.
//!
//! Small builders that hide `argmin`'s generic wiring: they pair the
//! crate's canonical numeric types with the chosen line search and apply
//! the tolerances from [`DirectOptions`]. The initial point and iteration
//! cap are runtime concerns and stay with the executor layer.
use argmin::solver::quasinewton::LBFGS;

use crate::{
    driver::{
        direct::DirectOptions,
        types::{Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente, MoreThuenteLS, Point},
    },
    errors::DriverResult,
};

/// Construct an L-BFGS solver with the More–Thuente line search.
///
/// Applies `opts.mem`, `opts.tol_grad`, and `opts.tol_cost` (when set).
///
/// # Errors
/// Propagates `argmin`'s rejection of a tolerance value.
pub fn build_lbfgs_more_thuente(opts: &DirectOptions) -> DriverResult<LbfgsMoreThuente> {
    let linesearch = MoreThuenteLS::new();
    configure_lbfgs(LbfgsMoreThuente::new(linesearch, opts.mem), opts)
}

/// Construct an L-BFGS solver with the Hager–Zhang line search.
///
/// # Errors
/// Propagates `argmin`'s rejection of a tolerance value.
pub fn build_lbfgs_hager_zhang(opts: &DirectOptions) -> DriverResult<LbfgsHagerZhang> {
    let linesearch = HagerZhangLS::new();
    configure_lbfgs(LbfgsHagerZhang::new(linesearch, opts.mem), opts)
}

/// Shared tolerance wiring, generic over the line search.
fn configure_lbfgs<L>(
    solver: LBFGS<L, Point, Grad, f64>, opts: &DirectOptions,
) -> DriverResult<LBFGS<L, Point, Grad, f64>> {
    let mut solver = solver.with_tolerance_grad(opts.tol_grad)?;
    if let Some(tol_cost) = opts.tol_cost {
        solver = solver.with_tolerance_cost(tol_cost)?;
    }
    Ok(solver)
}
