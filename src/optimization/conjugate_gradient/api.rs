//! High-level entry point for minimizing a cost/gradient oracle.
//!
//! Validates the options and the starting point, then delegates to
//! [`run_cg`](super::run::run_cg).
use crate::optimization::{
    conjugate_gradient::{CgOptions, CgOutcome, CostGradient, Theta, run::run_cg},
    errors::{OptError, OptResult},
};

/// Minimize `f` from `theta0` with Polack–Ribière conjugate gradients.
///
/// # Behavior
/// - Re-validates `opts` (budget, reduction, line-search constants) so
///   options assembled by struct literal are checked as well.
/// - Runs line searches until the budget in `opts.length` is spent or two
///   consecutive searches fail.
/// - Never mutates `theta0`; the returned `theta_hat` is a new vector.
///
/// # Parameters
/// - `f`: any [`CostGradient`] oracle, including closures
///   `Fn(&Theta) -> OptResult<(Cost, Grad)>` and argmin problems wrapped in
///   [`ArgminOracle`](super::ArgminOracle).
/// - `theta0`: starting point, non-empty.
/// - `opts`: budget, expected first reduction, line-search constants.
///
/// # Errors
/// - [`OptError::EmptyTheta`] for an empty starting point.
/// - Validation errors from [`CgOptions::validate`].
/// - Errors raised by the oracle, and `GradientDimMismatch` for gradients of
///   the wrong length.
///
/// # Returns
/// A [`CgOutcome`] with the final point, its cost, the cost trace, the budget
/// units used, the evaluation count, the final gradient norm, and the stop
/// reason.
///
/// # Example
/// ```
/// use ndarray::array;
/// use backprop_cg::optimization::prelude::*;
///
/// let f = |theta: &Theta| -> OptResult<(Cost, Grad)> {
///     Ok((theta.dot(theta), theta * 2.0))
/// };
/// let opts = CgOptions::with_length(10)?;
/// let out = minimize(&f, &array![1.0, -2.0], &opts)?;
/// assert!(out.value < 1e-12);
/// # Ok::<(), OptError>(())
/// ```
pub fn minimize<F>(f: &F, theta0: &Theta, opts: &CgOptions) -> OptResult<CgOutcome>
where
    F: CostGradient + ?Sized,
{
    opts.validate()?;
    if theta0.is_empty() {
        return Err(OptError::EmptyTheta);
    }
    run_cg(f, theta0.clone(), opts)
}
