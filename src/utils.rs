//! utils — small matrix helpers shared by the network layer.
//!
//! - [`prepend_ones`]: add a bias column of ones in front of a matrix.
//! - [`zero_bias_column`]: copy of a weight matrix with column 0 cleared, used
//!   so bias weights are excluded from regularization.
//! - [`matrix_as_scalar`]: pull the single entry out of a 1×1 product.
//!
//! All helpers work on borrowed views and return freshly allocated arrays;
//! inputs are never mutated.
use ndarray::{Array2, ArrayBase, Data, Ix2, s};

use crate::network::errors::{NetError, NetResult};

/// Extract the value of a 1×1 matrix.
///
/// Inner products written as `(1×n)·(n×1)` matrix products land here.
///
/// # Errors
/// Returns [`NetError::NonScalarMatrix`] for any other shape.
pub fn matrix_as_scalar<S>(m: &ArrayBase<S, Ix2>) -> NetResult<f64>
where
    S: Data<Elem = f64>,
{
    match m.dim() {
        (1, 1) => Ok(m[[0, 0]]),
        (rows, cols) => Err(NetError::NonScalarMatrix { rows, cols }),
    }
}

/// Return `[1, a]`: `a` with a leading column of ones.
pub fn prepend_ones<S>(a: &ArrayBase<S, Ix2>) -> Array2<f64>
where
    S: Data<Elem = f64>,
{
    let mut out = Array2::<f64>::ones((a.nrows(), a.ncols() + 1));
    out.slice_mut(s![.., 1..]).assign(a);
    out
}

/// Copy of `theta` with its bias column (column 0) set to zero.
pub fn zero_bias_column<S>(theta: &ArrayBase<S, Ix2>) -> Array2<f64>
where
    S: Data<Elem = f64>,
{
    let mut out = theta.to_owned();
    if out.ncols() > 0 {
        out.slice_mut(s![.., 0]).fill(0.0);
    }
    out
}
