//! Public API surface for conjugate-gradient minimization.
//!
//! - [`CostGradient`]: oracle trait returning `(f(θ), ∇f(θ))` in one call.
//! - [`CgOptions`], [`LineSearchParams`] and [`Budget`]: configuration.
//! - [`CgOutcome`] and [`Termination`]: normalized result of [`minimize`](super::minimize).
//!
//! Convention: the objective is **minimized** directly; no sign flips happen
//! anywhere in this module.
use argmin_math::ArgminL2Norm;

use crate::optimization::{
    conjugate_gradient::{
        Cost, Grad, Theta,
        types::{
            DEFAULT_EXT, DEFAULT_INT, DEFAULT_LENGTH, DEFAULT_MAX_EVALS, DEFAULT_RATIO,
            DEFAULT_RED, DEFAULT_RHO, DEFAULT_SIG,
        },
        validation::{verify_length, verify_line_search_params, verify_red},
    },
    errors::OptResult,
};

/// Cost/gradient oracle.
///
/// Required:
/// - `evaluate(&Theta) -> OptResult<(Cost, Grad)>`: value and gradient at `θ`.
///   The gradient must have the length of `θ`. Non-finite costs are not
///   errors: `+inf` reads as a rejected step, while `NaN` slips through the
///   Wolfe tests and is accepted.
///
/// Any `Fn(&Theta) -> OptResult<(Cost, Grad)>` closure is an oracle.
pub trait CostGradient {
    fn evaluate(&self, theta: &Theta) -> OptResult<(Cost, Grad)>;
}

impl<F> CostGradient for F
where
    F: Fn(&Theta) -> OptResult<(Cost, Grad)>,
{
    fn evaluate(&self, theta: &Theta) -> OptResult<(Cost, Grad)> {
        self(theta)
    }
}

/// Constants of the Wolfe-Powell line search.
///
/// Fields:
/// - `rho`: sufficient-decrease constant (default `0.01`).
/// - `sig`: curvature constant (default `0.5`).
/// - `int`: keep interpolated points at least this fraction away from the
///   bracket ends (default `0.1`).
/// - `ext`: largest extrapolation factor (default `3.0`).
/// - `max_evals`: evaluations allowed per line search (default `20`).
/// - `ratio`: cap on the step-size growth between line searches
///   (default `100.0`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSearchParams {
    pub rho: f64,
    pub sig: f64,
    pub int: f64,
    pub ext: f64,
    pub max_evals: usize,
    pub ratio: f64,
}

impl Default for LineSearchParams {
    fn default() -> Self {
        Self {
            rho: DEFAULT_RHO,
            sig: DEFAULT_SIG,
            int: DEFAULT_INT,
            ext: DEFAULT_EXT,
            max_evals: DEFAULT_MAX_EVALS,
            ratio: DEFAULT_RATIO,
        }
    }
}

/// What the budget counts.
///
/// Derived from the sign of [`CgOptions::length`]: positive counts line
/// searches, negative counts oracle evaluations (including the initial one).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Budget {
    LineSearches(usize),
    Evaluations(usize),
}

impl Budget {
    /// Interpret a signed length.
    ///
    /// # Errors
    /// [`OptError::InvalidBudget`](crate::optimization::errors::OptError::InvalidBudget)
    /// if `length == 0`.
    pub fn from_length(length: i64) -> OptResult<Self> {
        verify_length(length)?;
        let n = length.unsigned_abs() as usize;
        Ok(if length > 0 { Budget::LineSearches(n) } else { Budget::Evaluations(n) })
    }

    /// `|length|`.
    pub fn limit(&self) -> usize {
        match *self {
            Budget::LineSearches(n) | Budget::Evaluations(n) => n,
        }
    }

    pub fn counts_evaluations(&self) -> bool {
        matches!(self, Budget::Evaluations(_))
    }
}

/// Optimizer-level configuration.
///
/// Fields:
/// - `length: i64`: signed budget, see [`Budget`].
/// - `red: f64`: expected reduction of the first line search; the first
///   trial step is `red / (1 + |∇f(θ₀)|²)`.
/// - `params: LineSearchParams`: line-search constants.
///
/// Default: `length = 50`, `red = 1`, default constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CgOptions {
    pub length: i64,
    pub red: f64,
    pub params: LineSearchParams,
}

impl CgOptions {
    /// Build validated options.
    ///
    /// # Errors
    /// - `InvalidBudget` if `length == 0`.
    /// - `InvalidReduction` if `red` is non-finite or `≤ 0`.
    /// - `InvalidLineSearchParam` if any constant is out of range.
    pub fn new(length: i64, red: f64, params: LineSearchParams) -> OptResult<Self> {
        verify_length(length)?;
        verify_red(red)?;
        verify_line_search_params(&params)?;
        Ok(Self { length, red, params })
    }

    /// Default constants with the given budget.
    pub fn with_length(length: i64) -> OptResult<Self> {
        Self::new(length, DEFAULT_RED, LineSearchParams::default())
    }

    /// Re-run the constructor checks, for options assembled field by field.
    pub fn validate(&self) -> OptResult<()> {
        verify_length(self.length)?;
        verify_red(self.red)?;
        verify_line_search_params(&self.params)
    }

    pub fn budget(&self) -> OptResult<Budget> {
        Budget::from_length(self.length)
    }
}

impl Default for CgOptions {
    fn default() -> Self {
        Self { length: DEFAULT_LENGTH, red: DEFAULT_RED, params: LineSearchParams::default() }
    }
}

/// Why the minimizer stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The line-search or evaluation budget ran out.
    BudgetExhausted,
    /// Two line searches in a row failed, or a failure used up the budget.
    LineSearchStalled,
}

/// Canonical result returned by `minimize`.
///
/// - `theta_hat`: final parameters (the last accepted point).
/// - `value`: cost at `theta_hat`.
/// - `trace`: cost after every accepted line search, in order.
/// - `iterations`: budget units consumed (line searches or evaluations).
/// - `fn_evals`: oracle calls, including the initial one.
/// - `grad_norm`: `‖∇f(theta_hat)‖₂`.
/// - `termination`: stop reason.
#[derive(Debug, Clone, PartialEq)]
pub struct CgOutcome {
    pub theta_hat: Theta,
    pub value: Cost,
    pub trace: Vec<Cost>,
    pub iterations: usize,
    pub fn_evals: usize,
    pub grad_norm: f64,
    pub termination: Termination,
}

impl CgOutcome {
    /// Assemble an outcome from the final solver state.
    pub fn new(
        theta_hat: Theta, value: Cost, grad: &Grad, trace: Vec<Cost>, iterations: usize,
        fn_evals: usize, termination: Termination,
    ) -> Self {
        let grad_norm = grad.l2_norm();
        Self { theta_hat, value, trace, iterations, fn_evals, grad_norm, termination }
    }

    /// `true` if at least one line search was accepted.
    pub fn improved(&self) -> bool {
        !self.trace.is_empty()
    }
}
