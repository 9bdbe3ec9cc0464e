//! conjugate_gradient — Polack–Ribière nonlinear conjugate gradients with a
//! Wolfe-Powell line search.
//!
//! Purpose
//! -------
//! Minimize a smooth, unconstrained objective `f(θ)` given only a black-box
//! oracle returning `(f(θ), ∇f(θ))`. This is Rasmussen's `minimize`
//! algorithm: search directions follow the Polack–Ribière update, and each
//! line search brackets and refines the step with quadratic and cubic fits
//! under the strong Wolfe-Powell conditions, with the slope-ratio rule
//! guessing the initial step of the next search.
//!
//! Key behaviors
//! -------------
//! - [`minimize`] validates options and the starting point, then delegates
//!   to [`run::run_cg`].
//! - The budget is a signed `length`: positive counts line searches,
//!   negative counts oracle evaluations (see [`Budget`]).
//! - The run stops when the budget is spent or two line searches in a row
//!   fail; a failed search always restores the last accepted point.
//! - Every accepted search appends its cost to the trace and is logged at
//!   debug level; a one-line summary is logged at the end.
//!
//! Invariants & assumptions
//! ------------------------
//! - The oracle returns gradients of the same length as `θ`; anything else
//!   aborts the run with `GradientDimMismatch`.
//! - Non-finite costs are **not** trapped. A `+inf` cost fails the
//!   sufficient-decrease test and the step is rejected. A `NaN` cost makes
//!   every Wolfe comparison false, so the step is accepted and `NaN` enters
//!   the trace.
//! - With finite costs the trace is non-increasing: a point is accepted only
//!   under sufficient decrease.
//!
//! Conventions
//! -----------
//! - The objective is minimized as given; there is no sign flip.
//! - Vectors use the [`Theta`]/[`Grad`] aliases; all inner products are
//!   plain dot products.
//! - Line-search constants live in [`LineSearchParams`] with the classic
//!   defaults (`rho = 0.01`, `sig = 0.5`, `int = 0.1`, `ext = 3`,
//!   `max_evals = 20`, `ratio = 100`).
//!
//! Downstream usage
//! ----------------
//! - The network layer implements [`CostGradient`] for its cost function and
//!   calls [`minimize`] with an initial parameter vector.
//! - Closures and argmin problems (through [`ArgminOracle`]) work as oracles
//!   directly.
//!
//! Testing notes
//! -------------
//! - [`line_search`]: step rules on hand-computed quadratics and degenerate
//!   fits.
//! - [`run`]: convergence, budget accounting, stall detection, and error
//!   propagation.
//! - [`traits`], [`validation`], [`adapter`]: configuration guards and the
//!   argmin bridge.

pub mod adapter;
pub mod api;
pub mod line_search;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::adapter::ArgminOracle;
pub use self::api::minimize;
pub use self::traits::{Budget, CgOptions, CgOutcome, CostGradient, LineSearchParams, Termination};
pub use self::types::{Cost, Grad, Theta};

pub mod prelude {
    pub use super::adapter::ArgminOracle;
    pub use super::api::minimize;
    pub use super::traits::{
        Budget, CgOptions, CgOutcome, CostGradient, LineSearchParams, Termination,
    };
    pub use super::types::{Cost, Grad, Theta};
}
