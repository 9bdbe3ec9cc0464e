//! data — validated training sets and the CSV loader.
//!
//! Purpose
//! -------
//! Turn raw feature rows and 1-indexed class labels into the two matrices
//! the cost oracle consumes: a bias-augmented feature matrix `X` and a
//! one-hot label matrix `Y`.
//!
//! Key behaviors
//! -------------
//! - [`TrainingSet::from_raw`] validates sizes, labels, and finiteness, then
//!   prepends the bias column and builds `Y` once.
//! - [`one_hot`] maps label `k` (1-based) to a row with a single `1.0` in
//!   column `k − 1`.
//! - [`load_csv`] reads a headerless CSV whose last column is the label and
//!   whose other columns are pixel intensities.
//!
//! Invariants & assumptions
//! ------------------------
//! - `X` is `m × (n + 1)` with column 0 all ones; `Y` is `m × num_labels`
//!   with exactly one `1.0` per row.
//! - The raw labels are kept alongside for accuracy reporting.
//! - A `TrainingSet` is immutable once built.
//!
//! Conventions
//! -----------
//! - Labels follow the digit-dataset convention: classes `1..=num_labels`,
//!   with `10` standing for the digit zero in the 10-class case.
//! - Label cells may be written either as integers (`"10"`) or as integral
//!   floats (`"10.0"`), since exports from numeric tools often do the latter.
use std::path::Path;

use ndarray::{Array1, Array2, ArrayView2};

use crate::{
    network::errors::{NetError, NetResult},
    utils::prepend_ones,
};

/// Bias-augmented features with one-hot targets.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSet {
    features: Array2<f64>,
    targets: Array2<f64>,
    labels: Array1<usize>,
    num_labels: usize,
}

impl TrainingSet {
    /// Build a training set from raw features `(m, n)` and labels `(m,)`.
    ///
    /// # Errors
    /// - [`NetError::EmptyDataset`] if `m == 0` or `n == 0`.
    /// - [`NetError::ShapeMismatch`] if the label count differs from `m`.
    /// - [`NetError::NonFiniteFeature`] for any NaN/±inf feature.
    /// - [`NetError::LabelOutOfRange`] for a label outside `[1, num_labels]`.
    pub fn from_raw(
        features: Array2<f64>, labels: Array1<usize>, num_labels: usize,
    ) -> NetResult<Self> {
        if features.nrows() == 0 || features.ncols() == 0 {
            return Err(NetError::EmptyDataset);
        }
        if labels.len() != features.nrows() {
            return Err(NetError::ShapeMismatch {
                what: "label count",
                expected: features.nrows(),
                found: labels.len(),
            });
        }
        if let Some(((row, col), &value)) = features.indexed_iter().find(|(_, v)| !v.is_finite())
        {
            return Err(NetError::NonFiniteFeature { row, col, value });
        }
        let targets = one_hot(&labels, num_labels)?;
        let features = prepend_ones(&features);
        Ok(Self { features, targets, labels, num_labels })
    }

    /// Bias-augmented feature matrix `X`, `m × (n + 1)`.
    pub fn features(&self) -> ArrayView2<'_, f64> {
        self.features.view()
    }

    /// One-hot label matrix `Y`, `m × num_labels`.
    pub fn targets(&self) -> ArrayView2<'_, f64> {
        self.targets.view()
    }

    /// Raw 1-indexed labels.
    pub fn labels(&self) -> &Array1<usize> {
        &self.labels
    }

    pub fn num_labels(&self) -> usize {
        self.num_labels
    }

    /// Number of examples `m`.
    pub fn len(&self) -> usize {
        self.features.nrows()
    }

    /// `true` when there are no examples.
    pub fn is_empty(&self) -> bool {
        self.features.nrows() == 0
    }

    /// Number of raw features `n` (excluding the bias column).
    pub fn input_size(&self) -> usize {
        self.features.ncols() - 1
    }
}

/// One-hot encode 1-indexed labels into an `m × num_labels` matrix.
///
/// # Errors
/// [`NetError::LabelOutOfRange`] for the first label not in `[1, num_labels]`.
pub fn one_hot(labels: &Array1<usize>, num_labels: usize) -> NetResult<Array2<f64>> {
    let mut y = Array2::<f64>::zeros((labels.len(), num_labels));
    for (index, &label) in labels.iter().enumerate() {
        if label == 0 || label > num_labels {
            return Err(NetError::LabelOutOfRange { index, label, num_labels });
        }
        y[[index, label - 1]] = 1.0;
    }
    Ok(y)
}

/// Load a headerless CSV where every row is `x_1, ..., x_n, label`.
///
/// All rows must have the same number of columns; the `csv` reader enforces
/// this and reports ragged rows as [`NetError::Parse`].
///
/// # Errors
/// - [`NetError::Io`] if the file cannot be opened or read.
/// - [`NetError::Parse`] for non-numeric cells, non-integral labels, or
///   rows with fewer than two columns.
/// - Anything [`TrainingSet::from_raw`] rejects.
pub fn load_csv<P: AsRef<Path>>(path: P, num_labels: usize) -> NetResult<TrainingSet> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_path(path.as_ref())?;

    let mut values: Vec<f64> = Vec::new();
    let mut labels: Vec<usize> = Vec::new();
    let mut width: Option<usize> = None;

    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        if record.len() < 2 {
            return Err(NetError::Parse {
                line,
                text: "expected at least one feature column and a label column".to_string(),
            });
        }
        let n = record.len() - 1;
        width.get_or_insert(n);
        for cell in record.iter().take(n) {
            let v = cell.parse::<f64>().map_err(|e| NetError::Parse {
                line,
                text: format!("feature '{cell}': {e}"),
            })?;
            values.push(v);
        }
        labels.push(parse_label(&record[n], line)?);
    }

    let n = width.ok_or(NetError::EmptyDataset)?;
    let features = Array2::from_shape_vec((labels.len(), n), values).map_err(|_| {
        NetError::ShapeMismatch { what: "CSV feature columns", expected: n, found: 0 }
    })?;
    log::debug!("loaded {} examples with {} features", features.nrows(), n);
    TrainingSet::from_raw(features, Array1::from(labels), num_labels)
}

fn parse_label(cell: &str, line: u64) -> NetResult<usize> {
    if let Ok(label) = cell.parse::<usize>() {
        return Ok(label);
    }
    let v = cell
        .parse::<f64>()
        .map_err(|e| NetError::Parse { line, text: format!("label '{cell}': {e}") })?;
    if v.fract() != 0.0 || v < 0.0 || !v.is_finite() {
        return Err(NetError::Parse { line, text: format!("label '{cell}' is not a class index") });
    }
    Ok(v as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::io::Write;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `TrainingSet::from_raw` construction and validation.
    // - `one_hot` layout.
    // - `load_csv` on small temporary files, including malformed input.
    // -------------------------------------------------------------------------

    fn write_temp_csv(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir()
            .join(format!("backprop_cg_{name}_{}.csv", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    // Purpose
    // -------
    // Check the layout of the matrices built from raw data.
    //
    // Given
    // -----
    // - Two examples with two features, labels `[2, 1]`, 3 classes.
    //
    // Expect
    // ------
    // - `X = [[1, .1, .2], [1, .3, .4]]`.
    // - `Y = [[0, 1, 0], [1, 0, 0]]`.
    // - Raw labels are kept as given.
    fn from_raw_builds_bias_augmented_features_and_one_hot_targets() {
        let x = array![[0.1, 0.2], [0.3, 0.4]];
        let labels = array![2usize, 1];

        let set = TrainingSet::from_raw(x, labels.clone(), 3).unwrap();

        assert_eq!(set.features(), array![[1.0, 0.1, 0.2], [1.0, 0.3, 0.4]]);
        assert_eq!(set.targets(), array![[0.0, 1.0, 0.0], [1.0, 0.0, 0.0]]);
        assert_eq!(set.labels(), &labels);
        assert_eq!(set.len(), 2);
        assert_eq!(set.input_size(), 2);
        assert_eq!(set.num_labels(), 3);
    }

    #[test]
    // Purpose
    // -------
    // Verify the validation guards of `from_raw`.
    //
    // Given
    // -----
    // - An empty matrix, a label-count mismatch, a NaN feature, and labels
    //   `0` and `4` with 3 classes.
    //
    // Expect
    // ------
    // - `EmptyDataset`, `ShapeMismatch`, `NonFiniteFeature`, and
    //   `LabelOutOfRange` respectively.
    fn from_raw_rejects_invalid_input() {
        let err = TrainingSet::from_raw(Array2::zeros((0, 2)), Array1::zeros(0), 3).unwrap_err();
        assert_eq!(err, NetError::EmptyDataset);

        let err = TrainingSet::from_raw(Array2::zeros((2, 2)), array![1usize], 3).unwrap_err();
        assert!(matches!(err, NetError::ShapeMismatch { expected: 2, found: 1, .. }));

        let err =
            TrainingSet::from_raw(array![[0.0, f64::NAN]], array![1usize], 3).unwrap_err();
        assert!(matches!(err, NetError::NonFiniteFeature { row: 0, col: 1, .. }));

        let err = TrainingSet::from_raw(Array2::zeros((1, 2)), array![0usize], 3).unwrap_err();
        assert_eq!(err, NetError::LabelOutOfRange { index: 0, label: 0, num_labels: 3 });

        let err = TrainingSet::from_raw(Array2::zeros((1, 2)), array![4usize], 3).unwrap_err();
        assert_eq!(err, NetError::LabelOutOfRange { index: 0, label: 4, num_labels: 3 });
    }

    #[test]
    // Purpose
    // -------
    // Exercise the CSV loader on a well-formed file.
    //
    // Given
    // -----
    // - Three rows of two features; labels written as `1`, `10.0`, and ` 3 `.
    //
    // Expect
    // ------
    // - Labels parsed as `[1, 10, 3]`.
    // - Features carried over with the bias column prepended.
    fn load_csv_reads_features_and_trailing_label() {
        let path = write_temp_csv("ok", "0.5,0.25,1\n0,1,10.0\n1, 0 , 3 \n");

        let set = load_csv(&path, 10).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(set.labels(), &array![1usize, 10, 3]);
        assert_eq!(
            set.features(),
            array![[1.0, 0.5, 0.25], [1.0, 0.0, 1.0], [1.0, 1.0, 0.0]]
        );
    }

    #[test]
    // Purpose
    // -------
    // Make sure malformed files are reported as parse or I/O errors.
    //
    // Given
    // -----
    // - A file with a non-numeric feature.
    // - A file with a fractional label.
    // - A path that does not exist.
    //
    // Expect
    // ------
    // - `Parse` for the first two, `Io` for the missing file.
    fn load_csv_reports_malformed_input() {
        let bad_feature = write_temp_csv("bad_feature", "0.5,abc,1\n");
        let bad_label = write_temp_csv("bad_label", "0.5,0.5,1.5\n");

        let err_feature = load_csv(&bad_feature, 10).unwrap_err();
        let err_label = load_csv(&bad_label, 10).unwrap_err();
        let err_missing =
            load_csv(std::env::temp_dir().join("backprop_cg_does_not_exist.csv"), 10).unwrap_err();
        let _ = std::fs::remove_file(&bad_feature);
        let _ = std::fs::remove_file(&bad_label);

        assert!(matches!(err_feature, NetError::Parse { .. }));
        assert!(matches!(err_label, NetError::Parse { .. }));
        assert!(matches!(err_missing, NetError::Io { .. }));
    }
}
