//! predict — class predictions and training-set accuracy.
//!
//! Predictions are 0-indexed classes; raw dataset labels are 1-indexed, so
//! [`accuracy`] compares `prediction == label − 1`.
use ndarray::{Array1, ArrayBase, ArrayView2, Data, Ix2};

use crate::{
    network::{
        activation::sigmoid,
        errors::{NetError, NetResult},
        shape::{NetworkShape, check_dim},
    },
    optimization::conjugate_gradient::Theta,
    utils::prepend_ones,
};

/// Index of the largest entry in each row; the lowest index wins ties.
pub fn row_argmax<S>(outputs: &ArrayBase<S, Ix2>) -> Array1<usize>
where
    S: Data<Elem = f64>,
{
    outputs
        .rows()
        .into_iter()
        .map(|row| {
            let mut best = 0;
            for (k, &v) in row.iter().enumerate().skip(1) {
                if v > row[best] {
                    best = k;
                }
            }
            best
        })
        .collect()
}

/// Predict a 0-indexed class for every row of the bias-augmented `x`.
///
/// The output layer's sigmoid is skipped: it is monotone, so the arg-max of
/// the pre-activations is the same.
///
/// # Errors
/// [`NetError::ShapeMismatch`] if `x`, `theta1`, and `theta2` do not chain.
pub fn predict(
    theta1: &ArrayView2<f64>, theta2: &ArrayView2<f64>, x: &ArrayView2<f64>,
) -> NetResult<Array1<usize>> {
    check_dim("features vs Theta1 columns", theta1.ncols(), x.ncols())?;
    check_dim("Theta2 columns vs hidden units + 1", theta1.nrows() + 1, theta2.ncols())?;
    let h1 = sigmoid(&x.dot(&theta1.t()));
    let h2 = prepend_ones(&h1).dot(&theta2.t());
    Ok(row_argmax(&h2))
}

/// [`predict`] from an unrolled parameter vector.
pub fn predict_from_params(
    shape: &NetworkShape, theta: &Theta, x: &ArrayView2<f64>,
) -> NetResult<Array1<usize>> {
    let (theta1, theta2) = shape.split(theta.view())?;
    predict(&theta1, &theta2, x)
}

/// Fraction of predictions matching the 1-indexed `labels`.
///
/// # Errors
/// - [`NetError::ShapeMismatch`] if the two arrays differ in length.
/// - [`NetError::EmptyDataset`] if both are empty.
pub fn accuracy(predicted: &Array1<usize>, labels: &Array1<usize>) -> NetResult<f64> {
    check_dim("predictions vs labels", labels.len(), predicted.len())?;
    if labels.is_empty() {
        return Err(NetError::EmptyDataset);
    }
    let hits = predicted
        .iter()
        .zip(labels.iter())
        .filter(|&(&p, &y)| y.checked_sub(1) == Some(p))
        .count();
    Ok(hits as f64 / labels.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, array};

    #[test]
    // Purpose
    // -------
    // Pin arg-max behavior, including ties.
    //
    // Given
    // -----
    // - Rows `[0.3, 0.7]`, `[0.5, 0.5]`, and `[0.2, 0.9, 0.9]`.
    //
    // Expect
    // ------
    // - `1`, `0` (tie goes to the lowest index), and `1`.
    fn row_argmax_prefers_lowest_index_on_ties() {
        assert_eq!(row_argmax(&array![[0.3, 0.7], [0.5, 0.5]]), array![1usize, 0]);
        assert_eq!(row_argmax(&array![[0.2, 0.9, 0.9]]), array![1usize]);
    }

    #[test]
    // Purpose
    // -------
    // Check the forward pass on hand-picked weights.
    //
    // Given
    // -----
    // - One input feature, one hidden unit with weight `+10`, and two
    //   outputs wired `-h` and `+h`.
    // - Rows with feature `+1` and `-1`.
    //
    // Expect
    // ------
    // - Positive input lights the second class, negative input the first.
    fn predict_follows_hand_wired_network() {
        let theta1 = array![[0.0, 10.0]];
        let theta2 = array![[0.5, -1.0], [-0.5, 1.0]];
        let x = array![[1.0, 1.0], [1.0, -1.0]];

        let p = predict(&theta1.view(), &theta2.view(), &x.view()).unwrap();

        assert_eq!(p, array![1usize, 0]);
    }

    #[test]
    // Purpose
    // -------
    // Check ties in the forward pass resolve to the lowest class.
    //
    // Given
    // -----
    // - Two inputs, three hidden units with arbitrary weights, three classes,
    //   and an all-zero `Theta2`, so every output pre-activation is `0`.
    // - Rows with different features.
    //
    // Expect
    // ------
    // - Class `0` for every row.
    fn predict_breaks_output_ties_toward_class_zero() {
        let theta1 = array![[0.1, -2.0, 0.5], [1.0, 0.3, -0.7], [-0.4, 0.9, 2.0]];
        let theta2 = Array2::<f64>::zeros((3, 4));
        let x = array![[1.0, 0.2, -1.5], [1.0, 3.0, 0.0], [1.0, -0.5, 0.8]];

        let p = predict(&theta1.view(), &theta2.view(), &x.view()).unwrap();

        assert_eq!(p, array![0usize, 0, 0]);
    }

    #[test]
    // Purpose
    // -------
    // Make sure mismatched matrices are reported instead of panicking in
    // the matrix product.
    //
    // Given
    // -----
    // - `x` with 3 columns against a `Theta1` expecting 2.
    //
    // Expect
    // ------
    // - `ShapeMismatch { expected: 2, found: 3 }`.
    fn predict_rejects_mismatched_features() {
        let theta1 = array![[0.0, 1.0]];
        let theta2 = array![[0.0, 1.0]];
        let x = array![[1.0, 0.0, 0.0]];

        let err = predict(&theta1.view(), &theta2.view(), &x.view()).unwrap_err();

        assert!(matches!(err, NetError::ShapeMismatch { expected: 2, found: 3, .. }));
    }

    #[test]
    // Purpose
    // -------
    // Check the 1-indexed comparison and the error cases of `accuracy`.
    //
    // Given
    // -----
    // - Predictions `[0, 1, 9, 2]` against labels `[1, 2, 10, 1]`.
    //
    // Expect
    // ------
    // - `0.75`; mismatched lengths and empty input are errors.
    fn accuracy_compares_against_one_indexed_labels() {
        let acc = accuracy(&array![0usize, 1, 9, 2], &array![1usize, 2, 10, 1]).unwrap();

        assert_eq!(acc, 0.75);
        assert!(matches!(
            accuracy(&array![0usize], &array![1usize, 2]),
            Err(NetError::ShapeMismatch { .. })
        ));
        assert_eq!(accuracy(&Array1::zeros(0), &Array1::zeros(0)), Err(NetError::EmptyDataset));
    }
}
