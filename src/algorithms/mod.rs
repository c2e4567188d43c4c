use serde::{Deserialize, Serialize};

use crate::error::SgCoreError;
use crate::routines::evaluation::schedule::{Budget, Schedule};
use crate::structs::instance::Instance;
use crate::structs::trajectory::Trajectory;

use mda::MDA;
use pgd::PGD;

pub mod mda;
pub mod pgd;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum Algorithm {
    PGD,
    MDA,
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Algorithm::PGD => write!(f, "PGD"),
            Algorithm::MDA => write!(f, "MDA"),
        }
    }
}

/// Represents the lifecycle of an optimizer run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// The schedule is resolved but no step has been taken
    Init,
    /// Steps are being taken
    Iterating,
    /// The whole schedule completed and the trajectory was returned
    Done,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Init => write!(f, "Initialized"),
            Status::Iterating => write!(f, "Iterating"),
            Status::Done => write!(f, "Done"),
        }
    }
}

/// Common interface for the subgradient optimizers.
///
/// A run moves through [Status::Init], [Status::Iterating] and
/// [Status::Done]; it either completes the whole schedule or fails with an
/// error, there are no partial results. Construction already resolves the
/// schedule, so an optimizer that exists can report its horizon and step
/// before taking a single step.
pub trait Optimizer {
    fn algorithm(&self) -> Algorithm;
    fn status(&self) -> &Status;
    fn schedule(&self) -> &Schedule;
    fn run(&mut self) -> Result<Trajectory, SgCoreError>;
}

/// Create the optimizer selected by `algorithm` with its schedule resolved
/// against the instance geometry
pub fn dispatch_algorithm<'a>(
    algorithm: Algorithm,
    instance: &'a Instance,
    budget: Budget,
) -> Result<Box<dyn Optimizer + 'a>, SgCoreError> {
    match algorithm {
        Algorithm::PGD => Ok(Box::new(PGD::new(instance, budget)?)),
        Algorithm::MDA => Ok(Box::new(MDA::new(instance, budget)?)),
    }
}

/// Run projected subgradient descent on an instance under the given budget
pub fn run_pgd(instance: &Instance, budget: Budget) -> Result<Trajectory, SgCoreError> {
    PGD::new(instance, budget)?.run()
}

/// Run entropic mirror descent on an instance under the given budget
pub fn run_mda(instance: &Instance, budget: Budget) -> Result<Trajectory, SgCoreError> {
    MDA::new(instance, budget)?.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routines::initialization;

    #[test]
    fn algorithm_serde_uses_variant_names() {
        let json = serde_json::to_string(&vec![Algorithm::PGD, Algorithm::MDA]).unwrap();
        assert_eq!(json, "[\"PGD\",\"MDA\"]");
    }

    #[test]
    fn dispatch_selects_the_requested_algorithm() {
        let instance = initialization::generate(6, 3, 1).unwrap();

        for algorithm in [Algorithm::PGD, Algorithm::MDA] {
            let optimizer = dispatch_algorithm(algorithm, &instance, Budget::Horizon(5)).unwrap();
            assert_eq!(optimizer.algorithm(), algorithm);
        }
    }

    #[test]
    fn run_moves_status_to_done() {
        let instance = initialization::generate(8, 4, 7).unwrap();

        let mut optimizer =
            dispatch_algorithm(Algorithm::PGD, &instance, Budget::Horizon(5)).unwrap();
        assert_eq!(*optimizer.status(), Status::Init);

        let trajectory = optimizer.run().unwrap();
        assert_eq!(trajectory.len(), 5);
        assert_eq!(*optimizer.status(), Status::Done);
    }
}
