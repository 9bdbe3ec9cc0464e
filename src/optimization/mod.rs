//! optimization — conjugate-gradient minimizer and its error surface.
//!
//! Purpose
//! -------
//! Provide a self-contained unconstrained minimizer that needs nothing but a
//! cost/gradient oracle, together with a single error/result surface for
//! everything that can go wrong while configuring or running it.
//!
//! Key behaviors
//! -------------
//! - [`conjugate_gradient`] implements Polack–Ribière conjugate gradients
//!   with a Wolfe-Powell line search behind [`conjugate_gradient::minimize`].
//! - [`errors`] normalizes option validation failures, oracle failures, and
//!   argmin backend errors into [`errors::OptError`] with the alias
//!   `OptResult<T>`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Invalid configuration and oracle failures are reported as `OptError`,
//!   never as panics.
//! - The optimizer does not inspect the model it optimizes; any parameter
//!   structure lives with the caller.
//!
//! Conventions
//! -----------
//! - Parameters and gradients are `ndarray::Array1<f64>` (`Theta`, `Grad`).
//! - This module logs through the `log` facade only and never installs a
//!   logger; binaries decide where records go.
//!
//! Downstream usage
//! ----------------
//! - Front-ends usually import `optimization::prelude::*`, which forwards the
//!   conjugate-gradient surface and the error types.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each submodule; convergence on a quadratic
//!   and gradient agreement for the network oracle are integration tests.

pub mod conjugate_gradient;
pub mod errors;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use backprop_cg::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::conjugate_gradient::prelude::*;
    pub use super::errors::{OptError, OptResult};
}
