//! cost — regularized cross-entropy cost and its backpropagated gradient.
//!
//! Purpose
//! -------
//! Evaluate `J(θ)` and `∇J(θ)` for a single-hidden-layer sigmoid network on a
//! fixed [`TrainingSet`], in the form the conjugate-gradient minimizer
//! consumes.
//!
//! Key behaviors
//! -------------
//! - [`NeuralCost::value_and_grad`] runs the forward pass, the regularized
//!   cross-entropy, and backpropagation in one call.
//! - [`NeuralCost::cost_only`] runs the forward pass and the cost alone.
//! - [`NeuralCost`] implements the optimizer's
//!   [`CostGradient`] and argmin's `CostFunction`/`Gradient`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `θ` must have exactly `shape.param_len()` entries; otherwise
//!   [`NetError::ParamLengthMismatch`] is returned.
//! - Bias weights (column 0 of each matrix) are never regularized.
//! - `ln(0)` is not guarded: saturated outputs give `+inf` or `NaN` costs.
//!   The optimizer rejects a `+inf` step, but a `NaN` cost passes its Wolfe
//!   tests and can be accepted into the trace.
//! - Evaluation is pure; the training set is borrowed immutably.
//!
//! Conventions
//! -----------
//! With `X` bias-augmented (`m × (n+1)`), `Y` one-hot (`m × K`):
//! ```text
//! a2 = [1, σ(X·Θ1ᵗ)]            a3 = σ(a2·Θ2ᵗ)
//! J  = Σ(−Y∘ln a3 − (1−Y)∘ln(1−a3))/m + λ/(2m)·(‖Θ1[:,1:]‖² + ‖Θ2[:,1:]‖²)
//! δ3 = a3 − Y                   δ2 = (δ3·Θ2)[:,1:] ∘ σ'(X·Θ1ᵗ)
//! ∇Θ2 = (δ3ᵗ·a2 + λ·Θ2₀)/m       ∇Θ1 = (δ2ᵗ·X + λ·Θ1₀)/m
//! ```
//! where `Θ₀` is `Θ` with its bias column zeroed. The gradient is unrolled
//! as `∇Θ1` then `∇Θ2`, row-major.
use argmin::core::{CostFunction, Error, Gradient};
use ndarray::{Array1, Array2, ArrayView2, Axis, Zip, s};

use crate::{
    network::{
        activation::{sigmoid, sigmoid_gradient},
        data::TrainingSet,
        errors::{NetError, NetResult},
        shape::{NetworkShape, check_dim},
    },
    optimization::{
        conjugate_gradient::{Cost, CostGradient, Grad, Theta},
        errors::OptResult,
    },
    utils::{matrix_as_scalar, prepend_ones, zero_bias_column},
};

/// Cost/gradient oracle bound to a training set and a regularization
/// strength.
#[derive(Debug, Clone, Copy)]
pub struct NeuralCost<'a> {
    shape: NetworkShape,
    data: &'a TrainingSet,
    lambda: f64,
}

/// Activations kept from the forward pass for backpropagation.
struct Forward {
    z2: Array2<f64>,
    a2: Array2<f64>,
    a3: Array2<f64>,
}

impl<'a> NeuralCost<'a> {
    /// Bind the cost to `data`.
    ///
    /// # Errors
    /// - [`NetError::InvalidLambda`] if `lambda` is negative or non-finite.
    /// - [`NetError::ShapeMismatch`] if the data's feature count or class
    ///   count disagrees with `shape`.
    pub fn new(shape: NetworkShape, data: &'a TrainingSet, lambda: f64) -> NetResult<Self> {
        verify_lambda(lambda)?;
        check_dim("input layer vs features", shape.input, data.input_size())?;
        check_dim("output layer vs classes", shape.labels, data.num_labels())?;
        Ok(Self { shape, data, lambda })
    }

    pub fn shape(&self) -> &NetworkShape {
        &self.shape
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// `λ/(2m)` times the squared norm of the non-bias weights.
    ///
    /// Both bias-zeroed matrices are laid out as one `1 × n` row `w`, and
    /// the norm is the single entry of `w·wᵗ`.
    pub fn regularization_term(
        &self, theta1: &ArrayView2<f64>, theta2: &ArrayView2<f64>,
    ) -> NetResult<f64> {
        let m = self.data.len() as f64;
        let (w1, w2) = (zero_bias_column(theta1), zero_bias_column(theta2));
        let w = w1.iter().chain(w2.iter()).copied().collect::<Array1<f64>>().insert_axis(Axis(0));
        let sq = matrix_as_scalar(&w.dot(&w.t()))?;
        Ok(self.lambda / (2.0 * m) * sq)
    }

    /// Regularized cost without the gradient.
    pub fn cost_only(&self, theta: &Theta) -> NetResult<Cost> {
        let (theta1, theta2) = self.shape.split(theta.view())?;
        let fwd = self.forward(&theta1, &theta2);
        Ok(self.cross_entropy(&fwd.a3) + self.regularization_term(&theta1, &theta2)?)
    }

    /// Regularized cost and its gradient, unrolled like `θ`.
    ///
    /// # Errors
    /// [`NetError::ParamLengthMismatch`] if `θ` has the wrong length.
    pub fn value_and_grad(&self, theta: &Theta) -> NetResult<(Cost, Grad)> {
        let (theta1, theta2) = self.shape.split(theta.view())?;
        let x = self.data.features();
        let y = self.data.targets();
        let m = self.data.len() as f64;

        let fwd = self.forward(&theta1, &theta2);
        let cost = self.cross_entropy(&fwd.a3) + self.regularization_term(&theta1, &theta2)?;

        let sigma3 = &fwd.a3 - &y;
        let back = sigma3.dot(&theta2);
        let sigma2 = &back.slice(s![.., 1..]) * &sigmoid_gradient(&fwd.z2);

        let delta2 = sigma3.t().dot(&fwd.a2);
        let delta1 = sigma2.t().dot(&x);

        let theta2_grad = (delta2 + zero_bias_column(&theta2) * self.lambda) / m;
        let theta1_grad = (delta1 + zero_bias_column(&theta1) * self.lambda) / m;

        let grad = self.shape.unroll(&theta1_grad, &theta2_grad)?;
        Ok((cost, grad))
    }

    fn forward(&self, theta1: &ArrayView2<f64>, theta2: &ArrayView2<f64>) -> Forward {
        let z2 = self.data.features().dot(&theta1.t());
        let a2 = prepend_ones(&sigmoid(&z2));
        let a3 = sigmoid(&a2.dot(&theta2.t()));
        Forward { z2, a2, a3 }
    }

    /// Unregularized `Σ(−y·ln a3 − (1−y)·ln(1−a3))/m`.
    fn cross_entropy(&self, a3: &Array2<f64>) -> f64 {
        let m = self.data.len() as f64;
        let mut total = 0.0;
        Zip::from(a3).and(&self.data.targets()).for_each(|&h, &y| {
            total += -y * h.ln() - (1.0 - y) * (1.0 - h).ln();
        });
        total / m
    }
}

fn verify_lambda(lambda: f64) -> NetResult<()> {
    if !lambda.is_finite() {
        return Err(NetError::InvalidLambda { value: lambda, reason: "Lambda must be finite." });
    }
    if lambda < 0.0 {
        return Err(NetError::InvalidLambda {
            value: lambda,
            reason: "Lambda must be non-negative.",
        });
    }
    Ok(())
}

impl CostGradient for NeuralCost<'_> {
    fn evaluate(&self, theta: &Theta) -> OptResult<(Cost, Grad)> {
        Ok(self.value_and_grad(theta)?)
    }
}

impl CostFunction for NeuralCost<'_> {
    type Param = Theta;
    type Output = Cost;

    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        Ok(self.cost_only(theta)?)
    }
}

impl Gradient for NeuralCost<'_> {
    type Param = Theta;
    type Gradient = Grad;

    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, Error> {
        Ok(self.value_and_grad(theta)?.1)
    }
}
