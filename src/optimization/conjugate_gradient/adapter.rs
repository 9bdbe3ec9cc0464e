//! Adapter that exposes an `argmin` problem as a [`CostGradient`] oracle.
//!
//! Any type implementing argmin's `CostFunction` and `Gradient` over
//! [`Theta`]/[`Grad`] can be handed to [`minimize`](super::minimize) by
//! wrapping it in [`ArgminOracle`]. Each evaluation calls `cost` and then
//! `gradient`; argmin errors are normalized through
//! `From<argmin::core::Error> for OptError`.
use argmin::core::{CostFunction, Gradient};

use crate::optimization::{
    conjugate_gradient::{Cost, CostGradient, Grad, Theta},
    errors::OptResult,
};

/// Borrowing wrapper around an argmin problem.
#[derive(Debug, Clone, Copy)]
pub struct ArgminOracle<'a, P> {
    pub problem: &'a P,
}

impl<'a, P> ArgminOracle<'a, P> {
    pub fn new(problem: &'a P) -> Self {
        Self { problem }
    }
}

impl<'a, P> CostGradient for ArgminOracle<'a, P>
where
    P: CostFunction<Param = Theta, Output = Cost> + Gradient<Param = Theta, Gradient = Grad>,
{
    fn evaluate(&self, theta: &Theta) -> OptResult<(Cost, Grad)> {
        let cost = self.problem.cost(theta)?;
        let grad = self.problem.gradient(theta)?;
        Ok((cost, grad))
    }
}
