use faer::{Col, Mat};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use crate::error::SgCoreError;
use crate::structs::instance::Instance;

/// Generates a random problem instance with standard normal entries.
///
/// Draws the n x m measurement matrix and the n-entry target vector i.i.d.
/// from N(0, 1) with a generator seeded from `seed`, so the same arguments
/// always produce the same instance.
///
/// # Arguments
///
/// * `n` - Number of observations (matrix rows).
/// * `m` - Dimension of the decision variable (matrix columns).
/// * `seed` - Seed for the random number generator.
///
/// # Returns
///
/// A validated [Instance] of the requested shape.
///
/// # Errors
///
/// Returns [SgCoreError::InvalidInput] if either dimension is zero.
pub fn generate(n: usize, m: usize, seed: u64) -> Result<Instance, SgCoreError> {
    let mut rng = StdRng::seed_from_u64(seed);

    let draws: Vec<f64> = (0..n * m + n).map(|_| rng.sample(StandardNormal)).collect();

    let matrix = Mat::from_fn(n, m, |i, j| draws[i * m + j]);
    let target = Col::from_fn(n, |i| draws[n * m + i]);

    Instance::new(matrix, target)
}
