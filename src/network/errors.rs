//! Errors for the network layer (shapes, datasets, labels, and optimizer
//! failures surfaced during training).
//!
//! This module defines [`NetError`], used by every fallible operation under
//! `network` and by the numeric helpers in `utils`. It implements
//! `Display`/`Error` and converts to and from the optimizer's
//! [`OptError`](crate::optimization::errors::OptError).
//!
//! ## Conventions
//! - **Row indices are 0-based**; raw class labels are **1-based** and are
//!   reported as they appeared in the input.
//! - I/O and CSV failures are stored as text so the enum stays `Clone` and
//!   `PartialEq`.
//! - Optimizer failures other than parameter-length mismatches are
//!   normalized to [`NetError::OptimizationFailed`] with a readable status.
use crate::optimization::errors::OptError;

/// Result alias for network operations that may produce [`NetError`].
pub type NetResult<T> = Result<T, NetError>;

/// Unified error type for the network layer.
#[derive(Debug, Clone, PartialEq)]
pub enum NetError {
    // ---- Shape / configuration ----
    /// Every layer must contain at least one unit.
    InvalidLayerSize { layer: &'static str, size: usize, reason: &'static str },

    /// Unrolled parameter vector does not have `hidden*(input+1) + labels*(hidden+1)` entries.
    ParamLengthMismatch { expected: usize, actual: usize },

    /// Two operands disagree on a dimension.
    ShapeMismatch { what: &'static str, expected: usize, found: usize },

    /// Regularization strength must be finite and non-negative.
    InvalidLambda { value: f64, reason: &'static str },

    // ---- Dataset ----
    /// Dataset has no examples or no features.
    EmptyDataset,

    /// A raw label falls outside `[1, num_labels]`.
    LabelOutOfRange { index: usize, label: usize, num_labels: usize },

    /// A feature value is NaN/±inf.
    NonFiniteFeature { row: usize, col: usize, value: f64 },

    // ---- Numeric helpers ----
    /// Scalar extraction requires a 1×1 matrix.
    NonScalarMatrix { rows: usize, cols: usize },

    // ---- I/O ----
    /// The dataset file could not be opened or read.
    Io { text: String },

    /// A CSV record could not be interpreted.
    Parse { line: u64, text: String },

    // ---- Optimization ----
    /// The optimizer failed before producing parameters.
    OptimizationFailed { status: String },
}

impl std::error::Error for NetError {}

impl std::fmt::Display for NetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Shape / configuration ----
            NetError::InvalidLayerSize { layer, size, reason } => {
                write!(f, "Invalid {layer} layer size {size}: {reason}")
            }
            NetError::ParamLengthMismatch { expected, actual } => {
                write!(f, "Parameter vector length mismatch: expected {expected}, actual {actual}")
            }
            NetError::ShapeMismatch { what, expected, found } => {
                write!(f, "Shape mismatch in {what}: expected {expected}, found {found}")
            }
            NetError::InvalidLambda { value, reason } => {
                write!(f, "Invalid regularization parameter {value}: {reason}")
            }

            // ---- Dataset ----
            NetError::EmptyDataset => {
                write!(f, "Dataset is empty")
            }
            NetError::LabelOutOfRange { index, label, num_labels } => {
                write!(f, "Label {label} at row {index} is outside [1, {num_labels}]")
            }
            NetError::NonFiniteFeature { row, col, value } => {
                write!(f, "Non-finite feature at ({row}, {col}): {value}")
            }

            // ---- Numeric helpers ----
            NetError::NonScalarMatrix { rows, cols } => {
                write!(f, "Expected a 1x1 matrix, found {rows}x{cols}")
            }

            // ---- I/O ----
            NetError::Io { text } => {
                write!(f, "I/O error: {text}")
            }
            NetError::Parse { line, text } => {
                write!(f, "Parse error on line {line}: {text}")
            }

            // ---- Optimization ----
            NetError::OptimizationFailed { status } => {
                write!(f, "Optimization failed: {status}")
            }
        }
    }
}

impl From<OptError> for NetError {
    fn from(err: OptError) -> Self {
        match err {
            OptError::ThetaLengthMismatch { expected, actual } => {
                NetError::ParamLengthMismatch { expected, actual }
            }
            other => NetError::OptimizationFailed { status: other.to_string() },
        }
    }
}

impl From<std::io::Error> for NetError {
    fn from(err: std::io::Error) -> Self {
        NetError::Io { text: err.to_string() }
    }
}

impl From<csv::Error> for NetError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|pos| pos.line()).unwrap_or(0);
        match err.kind() {
            csv::ErrorKind::Io(_) => NetError::Io { text: err.to_string() },
            _ => NetError::Parse { line, text: err.to_string() },
        }
    }
}
