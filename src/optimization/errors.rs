use argmin::core::{ArgminError, Error};

use crate::network::errors::NetError;

/// Crate-wide result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Gradient ----
    /// Gradient dimensions do not match parameter dimensions.
    GradientDimMismatch {
        expected: usize,
        found: usize,
    },

    // ---- CgOptions ----
    /// The budget must be a non-zero count of line searches or evaluations.
    InvalidBudget {
        length: i64,
        reason: &'static str,
    },
    /// Expected reduction in the first line search must be positive and finite.
    InvalidReduction {
        red: f64,
        reason: &'static str,
    },
    /// A line-search constant is outside its admissible range.
    InvalidLineSearchParam {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
    /// The initial parameter vector is empty.
    EmptyTheta,

    // ---- Oracle ----
    /// Parameter vector handed to the oracle has the wrong length.
    ThetaLengthMismatch {
        expected: usize,
        actual: usize,
    },
    /// Any other failure raised by the cost/gradient oracle.
    Oracle {
        text: String,
    },

    // ---- Argmin ----
    /// `argmin`'s `InvalidParameter`; closures also use it to reject a point.
    InvalidParameter {
        text: String,
    },
    /// Any other `ArgminError`, tagged with its kind.
    Argmin {
        kind: &'static str,
        text: String,
    },
    /// An error from an argmin problem that is neither an `OptError` nor an
    /// `ArgminError`.
    BackendError {
        text: String,
    },
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Gradient ----
            OptError::GradientDimMismatch { expected, found } => {
                write!(f, "Gradient dimension mismatch: expected {expected}, found {found}")
            }

            // ---- CgOptions ----
            OptError::InvalidBudget { length, reason } => {
                write!(f, "Invalid optimization budget {length}: {reason}")
            }
            OptError::InvalidReduction { red, reason } => {
                write!(f, "Invalid expected first-step reduction {red}: {reason}")
            }
            OptError::InvalidLineSearchParam { name, value, reason } => {
                write!(f, "Invalid line-search parameter {name} = {value}: {reason}")
            }
            OptError::EmptyTheta => {
                write!(f, "Initial parameter vector is empty")
            }

            // ---- Oracle ----
            OptError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, actual {actual}")
            }
            OptError::Oracle { text } => {
                write!(f, "Cost/gradient evaluation failed: {text}")
            }

            // ---- Argmin ----
            OptError::InvalidParameter { text } => write!(f, "Invalid parameter: {text}"),
            OptError::Argmin { kind, text } => write!(f, "argmin {kind}: {text}"),
            OptError::BackendError { text } => write!(f, "Backend error: {text}"),
        }
    }
}

/// Unwraps an `OptError` that travelled through argmin's boxed error
/// untouched; otherwise classifies the `ArgminError` kind.
impl From<Error> for OptError {
    fn from(err: Error) -> Self {
        let err = match err.downcast::<OptError>() {
            Ok(opt) => return opt,
            Err(err) => err,
        };
        let argmin_err = match err.downcast::<ArgminError>() {
            Ok(e) => e,
            Err(other) => return OptError::BackendError { text: other.to_string() },
        };
        let kind = match &argmin_err {
            ArgminError::InvalidParameter { text } => {
                return OptError::InvalidParameter { text: text.clone() };
            }
            ArgminError::NotImplemented { .. } => "not implemented",
            ArgminError::NotInitialized { .. } => "not initialized",
            ArgminError::ConditionViolated { .. } => "condition violated",
            ArgminError::CheckpointNotFound { .. } => "checkpoint not found",
            ArgminError::PotentialBug { .. } => "potential bug",
            ArgminError::ImpossibleError { .. } => "impossible error",
            _ => "error",
        };
        OptError::Argmin { kind, text: argmin_err.to_string() }
    }
}

impl From<NetError> for OptError {
    fn from(err: NetError) -> Self {
        match err {
            NetError::ParamLengthMismatch { expected, actual } => {
                OptError::ThetaLengthMismatch { expected, actual }
            }
            other => OptError::Oracle { text: other.to_string() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Check that an `OptError` boxed into argmin's error type comes back out
    // unchanged instead of being flattened into `BackendError`.
    //
    // Given
    // -----
    // - `OptError::GradientDimMismatch { expected: 3, found: 2 }` converted
    //   into `argmin::core::Error`.
    //
    // Expect
    // ------
    // - Converting back yields the identical variant.
    fn from_argmin_error_recovers_wrapped_opt_error() {
        let original = OptError::GradientDimMismatch { expected: 3, found: 2 };
        let boxed: Error = original.clone().into();

        let recovered = OptError::from(boxed);

        assert_eq!(recovered, original);
    }

    #[test]
    // Purpose
    // -------
    // Ensure argmin's own error enum maps onto the matching wrapper variant.
    //
    // Given
    // -----
    // - `ArgminError::InvalidParameter` with a short message.
    // - `ArgminError::NotInitialized`.
    //
    // Expect
    // ------
    // - `OptError::InvalidParameter` carrying the same text.
    // - `OptError::Argmin` tagged `not initialized`.
    fn from_argmin_error_maps_invalid_parameter() {
        let boxed: Error = ArgminError::InvalidParameter { text: "bad".to_string() }.into();
        let other: Error = ArgminError::NotInitialized { text: "state".to_string() }.into();

        let mapped = OptError::from(boxed);
        let tagged = OptError::from(other);

        assert_eq!(mapped, OptError::InvalidParameter { text: "bad".to_string() });
        assert!(matches!(tagged, OptError::Argmin { kind: "not initialized", .. }));
    }

    #[test]
    // Purpose
    // -------
    // Verify the network-to-optimizer conversion keeps length mismatches
    // structured and stringifies the rest.
    //
    // Given
    // -----
    // - `NetError::ParamLengthMismatch { expected: 10, actual: 9 }`.
    // - `NetError::EmptyDataset`.
    //
    // Expect
    // ------
    // - The first maps to `ThetaLengthMismatch` with the same numbers.
    // - The second maps to `Oracle` whose text is the network error message.
    fn from_net_error_preserves_length_mismatch() {
        let mismatch = OptError::from(NetError::ParamLengthMismatch { expected: 10, actual: 9 });
        let other = OptError::from(NetError::EmptyDataset);

        assert_eq!(mismatch, OptError::ThetaLengthMismatch { expected: 10, actual: 9 });
        assert_eq!(other, OptError::Oracle { text: NetError::EmptyDataset.to_string() });
    }
}
