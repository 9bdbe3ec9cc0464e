//! Validation helpers for the conjugate-gradient minimizer.
//!
//! - **Option checks**: [`verify_length`], [`verify_red`],
//!   [`verify_line_search_params`] reject budgets and constants the
//!   algorithm cannot work with.
//! - **Oracle output**: [`validate_grad_dim`] enforces that every gradient
//!   has the dimension of `θ`.
//!
//! Cost and gradient *values* are not checked for finiteness; they flow
//! straight into the line-search comparisons. A `+inf` cost fails sufficient
//! decrease and is rejected. A `NaN` makes every comparison false, so the
//! step passes and the `NaN` can end up in the trace.
use crate::optimization::{
    conjugate_gradient::{Grad, LineSearchParams},
    errors::{OptError, OptResult},
};

/// Validate the signed budget.
///
/// # Errors
/// [`OptError::InvalidBudget`] when `length == 0`.
pub fn verify_length(length: i64) -> OptResult<()> {
    if length == 0 {
        return Err(OptError::InvalidBudget {
            length,
            reason: "Use a positive count of line searches or a negative count of evaluations.",
        });
    }
    Ok(())
}

/// Validate the expected first-step reduction.
///
/// # Errors
/// [`OptError::InvalidReduction`] if `red` is non-finite or `≤ 0`.
pub fn verify_red(red: f64) -> OptResult<()> {
    if !red.is_finite() {
        return Err(OptError::InvalidReduction { red, reason: "Reduction must be finite." });
    }
    if red <= 0.0 {
        return Err(OptError::InvalidReduction { red, reason: "Reduction must be positive." });
    }
    Ok(())
}

/// Validate the line-search constants.
///
/// Rules: `0 < rho < sig < 1`, `0 < int < 0.5`, `ext > 1`, `ratio > 0`,
/// `max_evals ≥ 1`; every float finite.
///
/// # Errors
/// [`OptError::InvalidLineSearchParam`] naming the first offending constant.
pub fn verify_line_search_params(p: &LineSearchParams) -> OptResult<()> {
    let floats = [("rho", p.rho), ("sig", p.sig), ("int", p.int), ("ext", p.ext), ("ratio", p.ratio)];
    for (name, value) in floats {
        if !value.is_finite() {
            return Err(OptError::InvalidLineSearchParam {
                name,
                value,
                reason: "Line-search constants must be finite.",
            });
        }
    }
    if p.rho <= 0.0 || p.rho >= p.sig {
        return Err(OptError::InvalidLineSearchParam {
            name: "rho",
            value: p.rho,
            reason: "Require 0 < rho < sig.",
        });
    }
    if p.sig >= 1.0 {
        return Err(OptError::InvalidLineSearchParam {
            name: "sig",
            value: p.sig,
            reason: "Require sig < 1.",
        });
    }
    if p.int <= 0.0 || p.int >= 0.5 {
        return Err(OptError::InvalidLineSearchParam {
            name: "int",
            value: p.int,
            reason: "Require 0 < int < 0.5.",
        });
    }
    if p.ext <= 1.0 {
        return Err(OptError::InvalidLineSearchParam {
            name: "ext",
            value: p.ext,
            reason: "Require ext > 1.",
        });
    }
    if p.ratio <= 0.0 {
        return Err(OptError::InvalidLineSearchParam {
            name: "ratio",
            value: p.ratio,
            reason: "Require ratio > 0.",
        });
    }
    if p.max_evals == 0 {
        return Err(OptError::InvalidLineSearchParam {
            name: "max_evals",
            value: 0.0,
            reason: "A line search needs at least one evaluation.",
        });
    }
    Ok(())
}

/// Check that a gradient has `dim` entries.
///
/// # Errors
/// [`OptError::GradientDimMismatch`] if `grad.len() != dim`.
pub fn validate_grad_dim(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    Ok(())
}
