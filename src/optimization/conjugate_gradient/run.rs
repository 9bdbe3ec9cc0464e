//! Execution loop of the Polack–Ribière conjugate-gradient minimizer.
//!
//! [`run_cg`] owns every working vector; the oracle is only ever borrowed.
//! Each outer iteration performs one line search along `s`, alternating
//! [`interpolate_step`] and [`extrapolate_step`] until the strong
//! Wolfe-Powell conditions hold, the per-search evaluation cap is hit, or a
//! step is rejected outright.
use std::time::Instant;

use ndarray::Zip;

use crate::optimization::{
    conjugate_gradient::{
        Budget, CgOptions, CgOutcome, Cost, CostGradient, Grad, Termination, Theta,
        line_search::{BracketEnd, NO_LIMIT, extrapolate_step, interpolate_step},
        types::REALMIN,
        validation::validate_grad_dim,
    },
    errors::OptResult,
};

/// Oracle wrapper that counts evaluations and checks gradient dimensions.
struct Evaluator<'a, F: CostGradient + ?Sized> {
    f: &'a F,
    dim: usize,
    calls: usize,
}

impl<'a, F: CostGradient + ?Sized> Evaluator<'a, F> {
    fn new(f: &'a F, dim: usize) -> Self {
        Self { f, dim, calls: 0 }
    }

    fn eval(&mut self, theta: &Theta) -> OptResult<(Cost, Grad)> {
        let (cost, grad) = self.f.evaluate(theta)?;
        validate_grad_dim(&grad, self.dim)?;
        self.calls += 1;
        Ok((cost, grad))
    }
}

/// `x += alpha * s`, in place.
fn step(x: &mut Theta, alpha: f64, s: &Grad) {
    Zip::from(x).and(s).for_each(|xi, &si| *xi += alpha * si);
}

/// Run the minimizer from `theta0`.
///
/// `opts` is assumed validated; the budget is re-derived from its sign.
///
/// # Errors
/// - `InvalidBudget` if `opts.length == 0`.
/// - Any error returned by the oracle, including
///   [`GradientDimMismatch`](crate::optimization::errors::OptError::GradientDimMismatch)
///   for a gradient of the wrong length. The run stops at the first such
///   error.
pub fn run_cg<F>(f: &F, theta0: Theta, opts: &CgOptions) -> OptResult<CgOutcome>
where
    F: CostGradient + ?Sized,
{
    let started = Instant::now();
    let budget = opts.budget()?;
    let limit_i = budget.limit();
    let p = &opts.params;
    let by_evals = budget.counts_evaluations();
    let tick = |i: &mut usize, evals: bool| {
        if evals == by_evals {
            *i += 1;
        }
    };

    let mut oracle = Evaluator::new(f, theta0.len());
    let mut x = theta0;
    let mut i = 0usize;
    let mut ls_failed = false;
    let mut trace: Vec<Cost> = Vec::new();
    let mut termination = Termination::BudgetExhausted;

    let (mut f1, mut df1) = oracle.eval(&x)?;
    tick(&mut i, true);
    let mut s: Grad = -&df1;
    let mut d1 = -s.dot(&s);
    let mut z1 = opts.red / (1.0 - d1);

    while i < limit_i {
        tick(&mut i, false);

        let x0 = x.clone();
        let f0 = f1;
        let df0 = df1.clone();

        step(&mut x, z1, &s);
        let (mut f2, mut df2) = oracle.eval(&x)?;
        tick(&mut i, true);
        let mut d2 = df2.dot(&s);

        let mut end = BracketEnd { f: f1, d: d1, z: -z1 };
        let mut m = match budget {
            Budget::LineSearches(_) => p.max_evals,
            Budget::Evaluations(n) => p.max_evals.min(n.saturating_sub(i)),
        };
        let mut limit = NO_LIMIT;

        let success = loop {
            while (f2 > f1 + z1 * p.rho * d1 || d2 > -p.sig * d1) && m > 0 {
                limit = z1;
                let z2 = interpolate_step(p, f1, f2, d2, end);
                z1 += z2;
                step(&mut x, z2, &s);
                (f2, df2) = oracle.eval(&x)?;
                m -= 1;
                tick(&mut i, true);
                d2 = df2.dot(&s);
                end.z -= z2;
            }

            if f2 > f1 + z1 * p.rho * d1 || d2 > -p.sig * d1 {
                break false;
            } else if d2 > p.sig * d1 {
                break true;
            } else if m == 0 {
                break false;
            }

            let z2 = extrapolate_step(p, f2, d2, z1, limit, end);
            end = BracketEnd { f: f2, d: d2, z: -z2 };
            z1 += z2;
            step(&mut x, z2, &s);
            (f2, df2) = oracle.eval(&x)?;
            m -= 1;
            tick(&mut i, true);
            d2 = df2.dot(&s);
        };

        if success {
            f1 = f2;
            trace.push(f1);
            log::debug!("Iteration {} | Cost: {}", i, f1);

            // Polack-Ribiere direction
            let beta = (df2.dot(&df2) - df1.dot(&df2)) / df1.dot(&df1);
            s = &s * beta - &df2;
            std::mem::swap(&mut df1, &mut df2);
            d2 = df1.dot(&s);
            if d2 > 0.0 {
                s = -&df1;
                d2 = -s.dot(&s);
            }
            z1 *= p.ratio.min(d1 / (d2 - REALMIN));
            d1 = d2;
            ls_failed = false;
        } else {
            x = x0;
            f1 = f0;
            df1 = df0;
            if ls_failed || i > limit_i {
                termination = Termination::LineSearchStalled;
                break;
            }
            std::mem::swap(&mut df1, &mut df2);
            s = -&df1;
            d1 = -s.dot(&s);
            z1 = 1.0 / (1.0 - d1);
            ls_failed = true;
        }
    }

    log::debug!(
        "optimization took {} ms and {} iterations ({} evaluations, {:?})",
        started.elapsed().as_millis(),
        i,
        oracle.calls,
        termination
    );
    Ok(CgOutcome::new(x, f1, &df1, trace, i, oracle.calls, termination))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::{conjugate_gradient::LineSearchParams, errors::OptError};
    use ndarray::array;
    use std::cell::Cell;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Convergence on simple smooth problems.
    // - Budget accounting for both signs of `length`.
    // - Termination on an oracle whose gradient contradicts its value.
    // - Error propagation from the oracle.
    // - Non-finite costs: `+inf` steps are rejected, `NaN` steps are accepted.
    // -------------------------------------------------------------------------

    fn shifted_quadratic(theta: &Theta) -> OptResult<(Cost, Grad)> {
        let r = theta.mapv(|v| v - 3.0);
        Ok((r.dot(&r), r * 2.0))
    }

    fn rosenbrock(theta: &Theta) -> OptResult<(Cost, Grad)> {
        let (x, y) = (theta[0], theta[1]);
        let cost = (1.0 - x).powi(2) + 100.0 * (y - x * x).powi(2);
        let grad = array![-2.0 * (1.0 - x) - 400.0 * x * (y - x * x), 200.0 * (y - x * x)];
        Ok((cost, grad))
    }

    #[test]
    // Purpose
    // -------
    // Check convergence on an isotropic quadratic.
    //
    // Given
    // -----
    // - `f(θ) = ‖θ − 3‖²` in two dimensions from the origin.
    // - Budget of 20 line searches.
    //
    // Expect
    // ------
    // - `θ̂` within `1e-6` of `[3, 3]` and a final cost below `1e-10`.
    fn converges_on_shifted_quadratic() {
        let opts = CgOptions::with_length(20).unwrap();

        let out = run_cg(&shifted_quadratic, array![0.0, 0.0], &opts).unwrap();

        for v in out.theta_hat.iter() {
            assert!((v - 3.0).abs() < 1e-6, "theta_hat = {}", out.theta_hat);
        }
        assert!(out.value < 1e-10);
        assert_eq!(out.trace.last().copied(), Some(out.value));
    }

    #[test]
    // Purpose
    // -------
    // Verify accepted line searches never raise the cost.
    //
    // Given
    // -----
    // - Rosenbrock from `(-1.2, 1)` with 100 line searches.
    //
    // Expect
    // ------
    // - The trace is non-increasing and ends well below the start value
    //   `24.2`.
    fn trace_is_monotone_on_rosenbrock() {
        let opts = CgOptions::with_length(100).unwrap();

        let out = run_cg(&rosenbrock, array![-1.2, 1.0], &opts).unwrap();

        assert!(!out.trace.is_empty());
        for w in out.trace.windows(2) {
            assert!(w[1] <= w[0], "trace increased: {} then {}", w[0], w[1]);
        }
        assert!(out.value < 1.0, "final cost {}", out.value);
    }

    #[test]
    // Purpose
    // -------
    // Check the line-search budget.
    //
    // Given
    // -----
    // - Rosenbrock with `length = 5`.
    //
    // Expect
    // ------
    // - At most 5 line searches counted and at most 5 trace entries.
    fn positive_length_caps_line_searches() {
        let opts = CgOptions::with_length(5).unwrap();

        let out = run_cg(&rosenbrock, array![-1.2, 1.0], &opts).unwrap();

        assert!(out.iterations <= 5);
        assert!(out.trace.len() <= 5);
        assert!(out.fn_evals > out.iterations);
    }

    #[test]
    // Purpose
    // -------
    // Check the evaluation budget, including the initial evaluation.
    //
    // Given
    // -----
    // - Rosenbrock with `length = -15`.
    //
    // Expect
    // ------
    // - No more than 15 oracle calls, and the reported iteration count equals
    //   the number of calls.
    fn negative_length_caps_evaluations() {
        let opts = CgOptions::with_length(-15).unwrap();

        let out = run_cg(&rosenbrock, array![-1.2, 1.0], &opts).unwrap();

        assert!(out.fn_evals <= 15, "fn_evals = {}", out.fn_evals);
        assert_eq!(out.iterations, out.fn_evals);
    }

    #[test]
    // Purpose
    // -------
    // Ensure an oracle whose gradient points uphill ends in a stall and
    // leaves the parameters where they started.
    //
    // Given
    // -----
    // - `f(θ) = θ²` reporting gradient `-2θ` (wrong sign), from `θ = 1`.
    //
    // Expect
    // ------
    // - `Termination::LineSearchStalled` with an empty trace.
    // - `θ̂ == θ₀`; two full line searches plus the initial call were spent.
    fn inconsistent_gradient_stalls() {
        let wrong = |theta: &Theta| -> OptResult<(Cost, Grad)> {
            Ok((theta.dot(theta), theta * -2.0))
        };
        let opts = CgOptions::with_length(50).unwrap();

        let out = run_cg(&wrong, array![1.0], &opts).unwrap();

        assert_eq!(out.termination, Termination::LineSearchStalled);
        assert!(out.trace.is_empty());
        assert_eq!(out.theta_hat, array![1.0]);
        let per_search = 1 + LineSearchParams::default().max_evals;
        assert_eq!(out.fn_evals, 1 + 2 * per_search);
    }

    #[test]
    // Purpose
    // -------
    // Verify a gradient of the wrong length aborts the run.
    //
    // Given
    // -----
    // - An oracle returning a 1-element gradient for a 2-element `θ`.
    //
    // Expect
    // ------
    // - `OptError::GradientDimMismatch { expected: 2, found: 1 }`.
    fn wrong_gradient_length_is_an_error() {
        let short = |theta: &Theta| -> OptResult<(Cost, Grad)> {
            Ok((theta.dot(theta), array![0.0]))
        };
        let opts = CgOptions::default();

        let err = run_cg(&short, array![1.0, 2.0], &opts).unwrap_err();

        assert_eq!(err, OptError::GradientDimMismatch { expected: 2, found: 1 });
    }

    #[test]
    // Purpose
    // -------
    // Check oracle errors are passed through untouched and stop the run
    // immediately.
    //
    // Given
    // -----
    // - An oracle that succeeds once and then fails.
    //
    // Expect
    // ------
    // - The oracle's error comes back and it was called exactly twice.
    fn oracle_errors_propagate() {
        let calls = Cell::new(0usize);
        let flaky = |theta: &Theta| -> OptResult<(Cost, Grad)> {
            calls.set(calls.get() + 1);
            if calls.get() > 1 {
                return Err(OptError::Oracle { text: "boom".to_string() });
            }
            Ok((theta.dot(theta), theta * 2.0))
        };
        let opts = CgOptions::default();

        let err = run_cg(&flaky, array![1.0], &opts).unwrap_err();

        assert_eq!(err, OptError::Oracle { text: "boom".to_string() });
        assert_eq!(calls.get(), 2);
    }

    #[test]
    // Purpose
    // -------
    // Pin what happens when the oracle returns `NaN` costs: the run completes,
    // but the comparisons cannot reject the step.
    //
    // Given
    // -----
    // - `f(x) = (x - 3)²` for `x ≤ 0.5` and `NaN` beyond, with the gradient
    //   `2(x - 3)` everywhere.
    // - Start `[0]`, five line searches.
    //
    // Expect
    // ------
    // - `Ok` with `BudgetExhausted`.
    // - Every accepted cost, and the final value, is `NaN`.
    fn nan_costs_are_accepted_into_the_trace() {
        let nan_wall = |theta: &Theta| -> OptResult<(Cost, Grad)> {
            let x = theta[0];
            let f = if x > 0.5 { f64::NAN } else { (x - 3.0).powi(2) };
            Ok((f, array![2.0 * (x - 3.0)]))
        };
        let opts = CgOptions::with_length(5).unwrap();

        let out = run_cg(&nan_wall, array![0.0], &opts).unwrap();

        assert_eq!(out.termination, Termination::BudgetExhausted);
        assert_eq!(out.trace.len(), 5);
        assert!(out.trace.iter().all(|f| f.is_nan()));
        assert!(out.value.is_nan());
    }

    #[test]
    // Purpose
    // -------
    // Check that a `+inf` cost is treated as a rejected step and the search
    // interpolates back to finite ground.
    //
    // Given
    // -----
    // - `f(x) = (x - 3)²` for `x ≤ 5` and `+inf` beyond.
    // - Start `[0]` with `red = 100`, so the first trial lands at `x ≈ 16`.
    //
    // Expect
    // ------
    // - The oracle returned `+inf` at least once.
    // - `Ok`, a non-empty trace of finite, non-increasing costs below `f(0)`.
    // - The final point stays on the finite side of the wall.
    fn infinite_costs_are_rejected() {
        let walls = Cell::new(0usize);
        let inf_wall = |theta: &Theta| -> OptResult<(Cost, Grad)> {
            let x = theta[0];
            let f = if x > 5.0 {
                walls.set(walls.get() + 1);
                f64::INFINITY
            } else {
                (x - 3.0).powi(2)
            };
            Ok((f, array![2.0 * (x - 3.0)]))
        };
        let opts = CgOptions::new(10, 100.0, LineSearchParams::default()).unwrap();

        let out = run_cg(&inf_wall, array![0.0], &opts).unwrap();

        assert!(walls.get() >= 1);
        assert!(!out.trace.is_empty());
        assert!(out.trace.iter().all(|f| f.is_finite() && *f < 9.0));
        assert!(out.trace.windows(2).all(|w| w[1] <= w[0]));
        assert!(out.theta_hat[0] <= 5.0);
        assert!(out.value.is_finite());
    }
}
