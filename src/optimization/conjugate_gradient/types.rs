//! conjugate_gradient::types — shared numeric aliases and line-search
//! defaults.
//!
//! Purpose
//! -------
//! Centralize the vector and scalar aliases used by the minimizer and the
//! default constants of the Polack–Ribière line search, so the rest of the
//! optimizer stays agnostic to `ndarray` generics.
//!
//! Conventions
//! -----------
//! - `Theta` and `Grad` are column vectors of equal length; `Cost` is the
//!   scalar being **minimized**.
//! - The defaults below are the classic values of Rasmussen's `minimize`;
//!   they are copied into [`LineSearchParams`](super::LineSearchParams) by
//!   its `Default` impl and never read elsewhere.
//!
//! Testing notes
//! -------------
//! - Aliases and constants only; exercised by the surrounding modules.
use ndarray::Array1;

/// Parameter vector `θ`.
pub type Theta = Array1<f64>;

/// Gradient vector `∇f(θ)`, same length as [`Theta`].
pub type Grad = Array1<f64>;

/// Scalar objective value.
pub type Cost = f64;

/// Sufficient-decrease (Armijo) constant.
pub const DEFAULT_RHO: f64 = 0.01;

/// Curvature (strong Wolfe) constant; must exceed `RHO`.
pub const DEFAULT_SIG: f64 = 0.5;

/// Do not re-evaluate within `INT` of the current bracket.
pub const DEFAULT_INT: f64 = 0.1;

/// Extrapolate at most `EXT` times the current step.
pub const DEFAULT_EXT: f64 = 3.0;

/// Maximum number of evaluations per line search.
pub const DEFAULT_MAX_EVALS: usize = 20;

/// Maximum allowed slope ratio when carrying the step size forward.
pub const DEFAULT_RATIO: f64 = 100.0;

/// Floor subtracted from the new slope before dividing by it.
pub const REALMIN: f64 = f64::MIN_POSITIVE;

/// Default expected reduction of the first line search.
pub const DEFAULT_RED: f64 = 1.0;

/// Default budget: 50 line searches.
pub const DEFAULT_LENGTH: i64 = 50;
