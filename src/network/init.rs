//! init — seeded symmetric-uniform weight initialization.
//!
//! Weights are drawn from `U[-0.12, 0.12]` to break the symmetry between
//! hidden units. Draws are reproducible: the same seed always yields the
//! same matrix.
use ndarray::Array2;
use ndarray_rand::RandomExt;
use rand::{SeedableRng, rngs::StdRng};
use rand_distr::Uniform;

use crate::network::{errors::NetResult, shape::NetworkShape};
use crate::optimization::conjugate_gradient::Theta;

/// Half-width of the initialization interval.
pub const EPSILON_INIT: f64 = 0.12;

/// Default seed used by the trainer.
pub const DEFAULT_SEED: u64 = 100;

/// Random `l_out × (l_in + 1)` weight matrix (bias column included) with
/// entries in `[-EPSILON_INIT, EPSILON_INIT]`.
pub fn rand_initialize_weights(l_in: usize, l_out: usize, seed: u64) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let dist = Uniform::new_inclusive(-EPSILON_INIT, EPSILON_INIT);
    Array2::random_using((l_out, l_in + 1), dist, &mut rng)
}

/// Unrolled initial parameters for `shape`.
///
/// `Theta1` is drawn with `seed` and `Theta2` with `2·seed` (wrapping). The
/// two streams differ for every seed except `0`, where both matrices start
/// from the same stream.
pub fn initial_params(shape: &NetworkShape, seed: u64) -> NetResult<Theta> {
    let theta1 = rand_initialize_weights(shape.input, shape.hidden, seed);
    let theta2 = rand_initialize_weights(shape.hidden, shape.labels, seed.wrapping_mul(2));
    shape.unroll(&theta1, &theta2)
}
