use faer::Col;

use crate::algorithms::{Algorithm, Optimizer, Status};
use crate::error::SgCoreError;
use crate::routines::evaluation::objective::subgradient;
use crate::routines::evaluation::schedule::{Budget, Schedule};
use crate::structs::instance::Instance;
use crate::structs::trajectory::Trajectory;
use crate::structs::weights::Weights;

/// Entropic mirror descent.
///
/// From the uniform starting point, every step reweights the iterate
/// multiplicatively and renormalizes:
/// x_{i+1} proportional to x_i * exp(-alpha * g_i). The update never leaves
/// the simplex, so no projection is needed. The constant step and the
/// horizon come from [Schedule::entropic] and are fixed before the first
/// step.
///
/// The exponents are shifted by their maximum before exponentiation. The
/// largest factor is then exactly one, so the normalizing mass is bounded
/// below by the corresponding entry of x_i and cannot underflow to zero.
pub struct MDA<'a> {
    instance: &'a Instance,
    schedule: Schedule,
    status: Status,
}

impl<'a> MDA<'a> {
    /// Create the optimizer and resolve its schedule.
    ///
    /// Fails before any iteration if the budget is inconsistent or the
    /// instance geometry is degenerate.
    pub fn new(instance: &'a Instance, budget: Budget) -> Result<Self, SgCoreError> {
        let schedule = Schedule::entropic(instance, budget)?;

        Ok(Self {
            instance,
            schedule,
            status: Status::Init,
        })
    }
}

impl Optimizer for MDA<'_> {
    fn algorithm(&self) -> Algorithm {
        Algorithm::MDA
    }

    fn status(&self) -> &Status {
        &self.status
    }

    fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    fn run(&mut self) -> Result<Trajectory, SgCoreError> {
        let m = self.instance.dimension();
        let horizon = self.schedule.horizon();
        let step = self.schedule.step();

        tracing::debug!(
            "MDA: {} iterates with step {:.3e} on a {}x{} instance",
            horizon,
            step,
            self.instance.observations(),
            m
        );

        self.status = Status::Iterating;

        let mut trajectory = Trajectory::with_capacity(horizon);
        let mut x = Weights::uniform(m);
        trajectory.push(x.clone());

        for _ in 1..horizon {
            let g = subgradient(self.instance, x.weights())?;

            let wmax = g
                .iter()
                .fold(f64::NEG_INFINITY, |acc, &gj| (-step * gj).max(acc));

            let y = Col::from_fn(m, |j| x[j] * (-step * g[j] - wmax).exp());
            let total: f64 = y.iter().sum();

            if !total.is_finite() || total <= 0.0 {
                return Err(SgCoreError::Degenerate(format!(
                    "normalizing mass of the mirror step is {}, cannot renormalize the iterate",
                    total
                )));
            }

            x = Weights::from(Col::from_fn(m, |j| y[j] / total));
            trajectory.push(x.clone());
        }

        self.status = Status::Done;
        Ok(trajectory)
    }
}
