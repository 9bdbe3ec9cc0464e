//! Step-size rules of the line search.
//!
//! Both helpers are pure functions of the bracket state, expressed along
//! the search direction `s`:
//! - `z1` is the distance already travelled from the start of the search,
//! - `z3` is the signed offset from the current point back to the other
//!   bracket end (`f3`, `d3` are the cost and slope there),
//! - `f2`, `d2` are the cost and slope at the current point,
//! - `limit` is the largest known acceptable `z1`, or a negative sentinel
//!   when no upper bound has been found yet.
//!
//! [`interpolate_step`] shrinks the step when the current point violates the
//! Wolfe-Powell conditions; [`extrapolate_step`] grows it when the slope is
//! still too steep.
use crate::optimization::conjugate_gradient::traits::LineSearchParams;

/// Negative values of `limit` mean "no upper bound yet".
pub const NO_LIMIT: f64 = -1.0;

/// Point of the bracket on the far side of the current step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BracketEnd {
    pub f: f64,
    pub d: f64,
    pub z: f64,
}

/// Offset to move back into the bracket after a rejected point.
///
/// Fits a quadratic through `(f3, d3)` and `f2` if the cost went up
/// (`f2 > f1`), otherwise a cubic through both values and slopes. A
/// non-finite fit falls back to bisection. The result is clamped so the new
/// point stays at least `int·|z3|` away from either end, i.e. into
/// `[(1 − int)·z3, int·z3]` (note `z3 < 0` here).
pub fn interpolate_step(
    p: &LineSearchParams, f1: f64, f2: f64, d2: f64, end: BracketEnd,
) -> f64 {
    let BracketEnd { f: f3, d: d3, z: z3 } = end;
    let z2 = if f2 > f1 {
        z3 - (0.5 * d3 * z3 * z3) / (d3 * z3 + f2 - f3)
    } else {
        let (a, b) = cubic_coefficients(f2, d2, end);
        ((b * b - a * d2 * z3 * z3).sqrt() - b) / a
    };
    let z2 = if z2.is_finite() { z2 } else { z3 / 2.0 };
    z2.min(p.int * z3).max((1.0 - p.int) * z3)
}

/// Additional offset when the current point satisfies sufficient decrease
/// but the slope is still too negative.
///
/// Uses cubic extrapolation from the two most recent points, then bounds
/// the step:
/// - a non-finite or negative fit becomes `z1·(ext − 1)` without a limit or
///   bisection towards `limit` otherwise,
/// - never past `limit`, never beyond `ext` times the current step,
/// - never closer than `int·|z3|` to the current point or to `limit`.
pub fn extrapolate_step(
    p: &LineSearchParams, f2: f64, d2: f64, z1: f64, limit: f64, end: BracketEnd,
) -> f64 {
    let z3 = end.z;
    let (a, b) = cubic_coefficients(f2, d2, end);
    let z2 = -d2 * z3 * z3 / (b + (b * b - a * d2 * z3 * z3).sqrt());
    let has_limit = limit > -0.5;

    if !z2.is_finite() || z2 < 0.0 {
        if has_limit { (limit - z1) / 2.0 } else { z1 * (p.ext - 1.0) }
    } else if has_limit && z2 + z1 > limit {
        (limit - z1) / 2.0
    } else if !has_limit && z2 + z1 > z1 * p.ext {
        z1 * (p.ext - 1.0)
    } else if z2 < -z3 * p.int {
        -z3 * p.int
    } else if has_limit && z2 < (limit - z1) * (1.0 - p.int) {
        (limit - z1) * (1.0 - p.int)
    } else {
        z2
    }
}

fn cubic_coefficients(f2: f64, d2: f64, end: BracketEnd) -> (f64, f64) {
    let BracketEnd { f: f3, d: d3, z: z3 } = end;
    let a = 6.0 * (f2 - f3) / z3 + 3.0 * (d2 + d3);
    let b = 3.0 * (f3 - f2) - z3 * (d3 + 2.0 * d2);
    (a, b)
}
