//! trainer — end-to-end training driver.
//!
//! Purpose
//! -------
//! Wire the pieces together: seeded initialization, the cost oracle bound to
//! the training set, the conjugate-gradient minimizer, and a final pass of
//! the predictor to report training-set accuracy.
//!
//! Key behaviors
//! -------------
//! - [`train`] validates the options against the data, minimizes the cost
//!   from [`initial_params`], then reshapes the result into `Theta1` and
//!   `Theta2`.
//! - The report keeps the full optimizer outcome, so callers can inspect the
//!   cost trace, evaluation count, and stop reason.
//! - Accuracy is logged at info level.
//!
//! Conventions
//! -----------
//! - Defaults mirror the classic digit exercise: 400/25/10 network,
//!   `λ = 1`, 50 line searches, seed `100`.
use std::time::Instant;

use ndarray::Array2;

use crate::{
    network::{
        cost::NeuralCost,
        data::TrainingSet,
        errors::{NetError, NetResult},
        init::{DEFAULT_SEED, initial_params},
        predict::{accuracy, predict},
        shape::NetworkShape,
    },
    optimization::conjugate_gradient::{CgOptions, CgOutcome, minimize},
};

/// Default regularization strength.
pub const DEFAULT_LAMBDA: f64 = 1.0;

/// Everything needed to run [`train`].
///
/// Fields:
/// - `shape`: layer sizes; must agree with the data.
/// - `lambda`: L2 regularization strength, finite and `≥ 0`.
/// - `cg`: minimizer budget and line-search constants.
/// - `seed`: initialization seed (`Theta2` uses `2·seed`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingOptions {
    pub shape: NetworkShape,
    pub lambda: f64,
    pub cg: CgOptions,
    pub seed: u64,
}

impl TrainingOptions {
    /// Build options, validating `lambda` and `cg`.
    ///
    /// # Errors
    /// - [`NetError::InvalidLambda`] for a negative or non-finite `lambda`.
    /// - [`NetError::OptimizationFailed`] wrapping any `CgOptions` error.
    pub fn new(shape: NetworkShape, lambda: f64, cg: CgOptions, seed: u64) -> NetResult<Self> {
        if !lambda.is_finite() || lambda < 0.0 {
            return Err(NetError::InvalidLambda {
                value: lambda,
                reason: "Lambda must be finite and non-negative.",
            });
        }
        cg.validate()?;
        Ok(Self { shape, lambda, cg, seed })
    }
}

impl Default for TrainingOptions {
    fn default() -> Self {
        Self {
            shape: NetworkShape::default(),
            lambda: DEFAULT_LAMBDA,
            cg: CgOptions::default(),
            seed: DEFAULT_SEED,
        }
    }
}

/// Result of [`train`].
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingReport {
    pub theta1: Array2<f64>,
    pub theta2: Array2<f64>,
    pub outcome: CgOutcome,
    /// Training-set accuracy in `[0, 1]`.
    pub accuracy: f64,
}

impl TrainingReport {
    /// Relative drop from the first to the last accepted cost, if any
    /// line search was accepted.
    pub fn cost_reduction(&self) -> Option<f64> {
        match (self.outcome.trace.first(), self.outcome.trace.last()) {
            (Some(first), Some(last)) if *first != 0.0 => Some((first - last) / first),
            _ => None,
        }
    }
}

/// Train a network on `data` and report its training-set accuracy.
///
/// # Errors
/// - Validation errors for `opts` and for the shape/data pairing.
/// - [`NetError::OptimizationFailed`] if the minimizer aborts.
pub fn train(data: &TrainingSet, opts: &TrainingOptions) -> NetResult<TrainingReport> {
    let started = Instant::now();
    let cost = NeuralCost::new(opts.shape, data, opts.lambda)?;
    let theta0 = initial_params(&opts.shape, opts.seed)?;
    log::debug!(
        "training {}/{}/{} network on {} examples ({} parameters)",
        opts.shape.input,
        opts.shape.hidden,
        opts.shape.labels,
        data.len(),
        theta0.len()
    );

    let outcome = minimize(&cost, &theta0, &opts.cg)?;

    let (theta1, theta2) = opts.shape.split(outcome.theta_hat.view())?;
    let predictions = predict(&theta1, &theta2, &data.features())?;
    let accuracy = accuracy(&predictions, data.labels())?;
    log::info!(
        "Training set accuracy: {:.2}% after {} iterations in {} ms",
        accuracy * 100.0,
        outcome.iterations,
        started.elapsed().as_millis()
    );

    Ok(TrainingReport { theta1: theta1.to_owned(), theta2: theta2.to_owned(), outcome, accuracy })
}
