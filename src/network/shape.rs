//! shape — layer sizes and the layout of the unrolled parameter vector.
//!
//! Purpose
//! -------
//! Describe a single-hidden-layer network by its three layer sizes and own
//! the mapping between the flat parameter vector `θ` used by the optimizer
//! and the two weight matrices used by the forward and backward passes.
//!
//! Key behaviors
//! -------------
//! - [`NetworkShape::new`] validates that every layer has at least one unit.
//! - [`NetworkShape::split`] borrows `Theta1` and `Theta2` out of `θ` without
//!   copying.
//! - [`NetworkShape::unroll`] concatenates two matrices into a fresh `θ`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `Theta1` is `hidden × (input + 1)` and occupies the first
//!   `hidden·(input + 1)` entries of `θ`; `Theta2` is
//!   `labels × (hidden + 1)` and occupies the rest.
//! - Both matrices are stored **row-major**; splitting then unrolling
//!   reproduces `θ` bit for bit.
//! - Column 0 of each matrix holds the bias weights.
//!
//! Conventions
//! -----------
//! - Length mismatches are reported as [`NetError::ParamLengthMismatch`];
//!   matrix dimension disagreements as [`NetError::ShapeMismatch`].
//!
//! Testing notes
//! -------------
//! - Unit tests cover validation, lengths, the split/unroll round trip, and
//!   element order inside the split views.
use ndarray::{Array1, ArrayBase, ArrayView1, ArrayView2, Data, Ix2, s};

use crate::network::errors::{NetError, NetResult};

/// Default input layer size: 20×20 pixel images.
pub const DEFAULT_INPUT: usize = 400;
/// Default hidden layer size.
pub const DEFAULT_HIDDEN: usize = 25;
/// Default number of classes (digits 1..=10, with 10 standing for zero).
pub const DEFAULT_LABELS: usize = 10;

/// Layer sizes of a single-hidden-layer network.
///
/// Default: `400 / 25 / 10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkShape {
    pub input: usize,
    pub hidden: usize,
    pub labels: usize,
}

impl NetworkShape {
    /// Build a validated shape.
    ///
    /// # Errors
    /// [`NetError::InvalidLayerSize`] if any size is zero.
    pub fn new(input: usize, hidden: usize, labels: usize) -> NetResult<Self> {
        for (layer, size) in [("input", input), ("hidden", hidden), ("output", labels)] {
            if size == 0 {
                return Err(NetError::InvalidLayerSize {
                    layer,
                    size,
                    reason: "Layers must contain at least one unit.",
                });
            }
        }
        Ok(Self { input, hidden, labels })
    }

    /// `(rows, cols)` of `Theta1`.
    pub fn theta1_dim(&self) -> (usize, usize) {
        (self.hidden, self.input + 1)
    }

    /// `(rows, cols)` of `Theta2`.
    pub fn theta2_dim(&self) -> (usize, usize) {
        (self.labels, self.hidden + 1)
    }

    pub fn theta1_len(&self) -> usize {
        self.hidden * (self.input + 1)
    }

    pub fn theta2_len(&self) -> usize {
        self.labels * (self.hidden + 1)
    }

    /// Length of the unrolled parameter vector.
    pub fn param_len(&self) -> usize {
        self.theta1_len() + self.theta2_len()
    }

    /// Check that `theta` has exactly [`param_len`](Self::param_len) entries.
    pub fn check_len(&self, len: usize) -> NetResult<()> {
        if len != self.param_len() {
            return Err(NetError::ParamLengthMismatch { expected: self.param_len(), actual: len });
        }
        Ok(())
    }

    /// Borrow `Theta1` and `Theta2` as row-major views into `theta`.
    ///
    /// # Errors
    /// - [`NetError::ParamLengthMismatch`] if `theta` has the wrong length.
    /// - [`NetError::ShapeMismatch`] if `theta` is a non-contiguous view that
    ///   cannot be reinterpreted as a matrix without copying.
    pub fn split<'a>(
        &self, theta: ArrayView1<'a, f64>,
    ) -> NetResult<(ArrayView2<'a, f64>, ArrayView2<'a, f64>)> {
        self.check_len(theta.len())?;
        let n1 = self.theta1_len();
        let theta1 = theta.slice_move(s![..n1]).into_shape(self.theta1_dim()).map_err(|_| {
            NetError::ShapeMismatch { what: "Theta1 view", expected: n1, found: theta.len() }
        })?;
        let theta2 = theta.slice_move(s![n1..]).into_shape(self.theta2_dim()).map_err(|_| {
            NetError::ShapeMismatch {
                what: "Theta2 view",
                expected: self.theta2_len(),
                found: theta.len() - n1,
            }
        })?;
        Ok((theta1, theta2))
    }

    /// Flatten `theta1` then `theta2`, each row-major, into a new vector.
    ///
    /// # Errors
    /// [`NetError::ShapeMismatch`] if either matrix does not have the
    /// dimensions implied by this shape.
    pub fn unroll<S1, S2>(
        &self, theta1: &ArrayBase<S1, Ix2>, theta2: &ArrayBase<S2, Ix2>,
    ) -> NetResult<Array1<f64>>
    where
        S1: Data<Elem = f64>,
        S2: Data<Elem = f64>,
    {
        check_dim("Theta1 rows", self.theta1_dim().0, theta1.nrows())?;
        check_dim("Theta1 cols", self.theta1_dim().1, theta1.ncols())?;
        check_dim("Theta2 rows", self.theta2_dim().0, theta2.nrows())?;
        check_dim("Theta2 cols", self.theta2_dim().1, theta2.ncols())?;
        Ok(theta1.iter().chain(theta2.iter()).copied().collect())
    }
}

impl Default for NetworkShape {
    fn default() -> Self {
        Self { input: DEFAULT_INPUT, hidden: DEFAULT_HIDDEN, labels: DEFAULT_LABELS }
    }
}

pub(crate) fn check_dim(what: &'static str, expected: usize, found: usize) -> NetResult<()> {
    if expected != found {
        return Err(NetError::ShapeMismatch { what, expected, found });
    }
    Ok(())
}
