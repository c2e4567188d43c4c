use faer::Col;

use crate::algorithms::{Algorithm, Optimizer, Status};
use crate::error::SgCoreError;
use crate::routines::evaluation::objective::subgradient;
use crate::routines::evaluation::projection::project_to_simplex;
use crate::routines::evaluation::schedule::{Budget, Schedule};
use crate::structs::instance::Instance;
use crate::structs::trajectory::Trajectory;
use crate::structs::weights::Weights;

/// Projected subgradient descent.
///
/// From the uniform starting point, every step moves against a subgradient
/// in the Euclidean geometry and projects the result back onto the simplex:
/// x_{i+1} = project(x_i - alpha * g_i). The constant step and the horizon
/// come from [Schedule::euclidean] and are fixed before the first step.
pub struct PGD<'a> {
    instance: &'a Instance,
    schedule: Schedule,
    status: Status,
}

impl<'a> PGD<'a> {
    /// Create the optimizer and resolve its schedule.
    ///
    /// Fails before any iteration if the budget is inconsistent or the
    /// instance geometry is degenerate.
    pub fn new(instance: &'a Instance, budget: Budget) -> Result<Self, SgCoreError> {
        let schedule = Schedule::euclidean(instance, budget)?;

        Ok(Self {
            instance,
            schedule,
            status: Status::Init,
        })
    }
}

impl Optimizer for PGD<'_> {
    fn algorithm(&self) -> Algorithm {
        Algorithm::PGD
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
            "PGD: {} iterates with step {:.3e} on a {}x{} instance",
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
            let y = Col::from_fn(m, |j| x[j] - step * g[j]);
            x = Weights::from(project_to_simplex(&y)?);
            trajectory.push(x.clone());
        }

        self.status = Status::Done;
        Ok(trajectory)
    }
}
