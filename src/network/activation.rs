//! activation — logistic sigmoid and its derivative.
//!
//! Both functions are elementwise and accept arrays of any dimension. They
//! are total on `f64`: large positive inputs saturate to exactly `1.0` and
//! large negative inputs to exactly `0.0` once `exp` over/underflows, which
//! is what lets `ln(a3)` in the cost reach `-inf` on saturated outputs.
use ndarray::{Array, ArrayBase, Data, Dimension};

/// `1 / (1 + e^{-z})` for a single value.
#[inline]
pub fn sigmoid_scalar(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// `σ(z)·(1 − σ(z))` for a single value. Peaks at `0.25` when `z = 0`.
#[inline]
pub fn sigmoid_gradient_scalar(z: f64) -> f64 {
    let g = sigmoid_scalar(z);
    g * (1.0 - g)
}

/// Elementwise logistic sigmoid.
pub fn sigmoid<S, D>(z: &ArrayBase<S, D>) -> Array<f64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    z.mapv(sigmoid_scalar)
}

/// Elementwise derivative of the sigmoid, evaluated at the pre-activation `z`.
pub fn sigmoid_gradient<S, D>(z: &ArrayBase<S, D>) -> Array<f64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    z.mapv(sigmoid_gradient_scalar)
}
