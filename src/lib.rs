//! backprop_cg — single-hidden-layer neural network classifier trained with
//! backpropagation and Polack–Ribière conjugate gradients.
//!
//! Purpose
//! -------
//! Train a small feed-forward classifier (by default 400 inputs, 25 hidden
//! units, 10 classes, the classic handwritten-digit setup) by minimizing a
//! regularized cross-entropy cost with a nonlinear conjugate-gradient
//! optimizer that only needs a cost/gradient oracle.
//!
//! Key behaviors
//! -------------
//! - `network` holds the model: data loading, parameter layout, the cost
//!   and gradient oracle, initialization, prediction, and the training
//!   driver.
//! - `optimization` holds a model-agnostic minimizer (`minimize`) with its
//!   own error surface; any closure or argmin problem can be optimized.
//! - `utils` holds the small matrix helpers shared by both.
//!
//! Invariants & assumptions
//! ------------------------
//! - Computation is single-threaded and deterministic for a given seed.
//! - Errors are returned as `NetError` / `OptError`, never raised as
//!   panics from library code.
//!
//! Conventions
//! -----------
//! - Dense linear algebra uses `ndarray`; parameters are `Array1<f64>`.
//! - Logging goes through the `log` facade. The library never installs a
//!   logger; the `train_digits` binary and the benchmark use `env_logger`.
//!
//! Downstream usage
//! ----------------
//! ```no_run
//! use backprop_cg::network::prelude::*;
//!
//! let data = load_csv("digits.csv", 10)?;
//! let report = train(&data, &TrainingOptions::default())?;
//! println!("accuracy: {:.2}%", report.accuracy * 100.0);
//! # Ok::<(), NetError>(())
//! ```
//!
//! Testing notes
//! -------------
//! - Unit tests live beside each module.
//! - Integration tests cover the analytic gradient against finite
//!   differences, convergence on a convex quadratic, and end-to-end
//!   training on a synthetic dataset.

pub mod network;
pub mod optimization;
pub mod utils;
