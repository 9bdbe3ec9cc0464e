//! network — single-hidden-layer sigmoid classifier.
//!
//! Purpose
//! -------
//! Model a feed-forward network `input → hidden → output` with logistic
//! activations, trained by minimizing a regularized cross-entropy cost whose
//! gradient comes from backpropagation.
//!
//! Key behaviors
//! -------------
//! - [`data`] builds validated [`TrainingSet`]s from raw arrays or CSV files.
//! - [`shape`] owns the layout of the unrolled parameter vector.
//! - [`cost`] evaluates the cost and gradient ([`NeuralCost`]), which plugs
//!   directly into the conjugate-gradient minimizer.
//! - [`init`] draws seeded initial weights; [`predict`] turns weights into
//!   class predictions and accuracy; [`trainer`] runs the whole pipeline.
//!
//! Invariants & assumptions
//! ------------------------
//! - Feature matrices are bias-augmented exactly once, when a `TrainingSet`
//!   is built.
//! - Raw labels are 1-indexed; predictions are 0-indexed.
//! - All fallible operations return [`NetResult`]; nothing here panics on
//!   bad input.
//!
//! Conventions
//! -----------
//! - `Theta1` is `hidden × (input + 1)`, `Theta2` is `labels × (hidden + 1)`,
//!   both row-major inside `θ`, bias in column 0.
//!
//! Downstream usage
//! ----------------
//! - Most callers only need [`load_csv`] or [`TrainingSet::from_raw`],
//!   [`TrainingOptions`], and [`train`].
//! - Callers that drive the optimizer themselves build a [`NeuralCost`] and
//!   pass it to [`minimize`](crate::optimization::conjugate_gradient::minimize).
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests for its local contract.
//! - Gradient agreement with finite differences and end-to-end training on a
//!   synthetic digit-like dataset are integration tests under `tests/`.

pub mod activation;
pub mod cost;
pub mod data;
pub mod errors;
pub mod init;
pub mod predict;
pub mod shape;
pub mod trainer;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::cost::NeuralCost;
pub use self::data::{TrainingSet, load_csv};
pub use self::errors::{NetError, NetResult};
pub use self::init::{initial_params, rand_initialize_weights};
pub use self::predict::{accuracy, predict, predict_from_params, row_argmax};
pub use self::shape::NetworkShape;
pub use self::trainer::{TrainingOptions, TrainingReport, train};

pub mod prelude {
    pub use super::cost::NeuralCost;
    pub use super::data::{TrainingSet, load_csv};
    pub use super::errors::{NetError, NetResult};
    pub use super::shape::NetworkShape;
    pub use super::trainer::{TrainingOptions, TrainingReport, train};
}
