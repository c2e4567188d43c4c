use faer::Mat;

use crate::error::SgCoreError;
use crate::structs::instance::Instance;

/// Strong convexity modulus of the negative-entropy mirror map
const RHO: f64 = 1.0;

/// Largest horizon an accuracy budget may resolve to
const MAX_HORIZON: usize = 1_000_000_000;

/// The iteration budget for one optimizer run.
///
/// Exactly one of a target accuracy or a fixed horizon; the schedule
/// formulas convert either into a (horizon, step) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Budget {
    /// Target accuracy, must be positive and finite
    Accuracy(f64),
    /// Fixed number of iterates, must be at least one
    Horizon(usize),
}

/// A fully determined iteration schedule: horizon and constant step size.
///
/// Derived once per run from the instance geometry and the caller's budget,
/// and immutable afterwards. Both optimizers use the classical bound
/// f(mean iterate) - f* <= R * L / sqrt(T) to convert an accuracy target
/// into a horizon, with the radius R and subgradient bound L taken in the
/// geometry the optimizer works in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Schedule {
    horizon: usize,
    step: f64,
}

impl Schedule {
    /// Schedule for Euclidean projected subgradient descent.
    ///
    /// The subgradient bound is L = sqrt(lambda_max(A'A)), the spectral norm
    /// of the measurement matrix, and the Euclidean radius of the simplex is
    /// R = 1. An accuracy target resolves to T = round((R * L / eps)^2) and
    /// the step is alpha = (R / L) * sqrt(1 / T).
    ///
    /// # Errors
    ///
    /// Returns [SgCoreError::Degenerate] if the spectral norm is not positive
    /// and finite, and [SgCoreError::Config] for an invalid budget.
    pub fn euclidean(instance: &Instance, budget: Budget) -> Result<Self, SgCoreError> {
        let lipschitz = spectral_norm(instance)?;
        let radius = 1.0;

        let horizon = resolve_horizon(budget, radius, lipschitz, 1.0)?;
        let step = (radius / lipschitz) * (1.0 / horizon as f64).sqrt();

        Ok(Self { horizon, step })
    }

    /// Schedule for entropic mirror descent.
    ///
    /// The subgradient bound in the dual (max) norm is
    /// L = (1/n) * max_j sum_i |A[i, j]|, the largest column l1 norm, and the
    /// entropy radius of the simplex is R = sqrt(ln m). An accuracy target
    /// resolves to T = round(2 * (R * L / eps)^2 / rho) and the step is
    /// alpha = (R / L) * sqrt(2 * rho / T).
    ///
    /// For m = 1 the radius is zero and the step collapses to zero, which is
    /// consistent: the singleton simplex has nothing to optimize.
    ///
    /// # Errors
    ///
    /// Returns [SgCoreError::Degenerate] if the largest column norm is not
    /// positive and finite, and [SgCoreError::Config] for an invalid budget.
    pub fn entropic(instance: &Instance, budget: Budget) -> Result<Self, SgCoreError> {
        let lipschitz = max_column_norm(instance)?;
        let radius = (instance.dimension() as f64).ln().sqrt();

        let horizon = resolve_horizon(budget, radius, lipschitz, 2.0 / RHO)?;
        let step = (radius / lipschitz) * (2.0 * RHO / horizon as f64).sqrt();

        Ok(Self { horizon, step })
    }

    /// Total number of iterates, including the starting point
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Constant step size used for every step
    pub fn step(&self) -> f64 {
        self.step
    }
}

/// Convert a budget into a horizon using T = round(scale * (R * L / eps)^2)
///
/// The rounded horizon is clamped to at least one iterate so that a very
/// loose accuracy target still returns the starting point. Targets so tight
/// that the resolved horizon overflows f64 or exceeds [MAX_HORIZON] are
/// configuration errors.
fn resolve_horizon(
    budget: Budget,
    radius: f64,
    lipschitz: f64,
    scale: f64,
) -> Result<usize, SgCoreError> {
    match budget {
        Budget::Accuracy(epsilon) => {
            if !epsilon.is_finite() || epsilon <= 0.0 {
                return Err(SgCoreError::Config(format!(
                    "target accuracy must be positive and finite, got {}",
                    epsilon
                )));
            }
            let t = scale * (radius * lipschitz / epsilon).powi(2);
            if !t.is_finite() || t > MAX_HORIZON as f64 {
                return Err(SgCoreError::Config(format!(
                    "target accuracy {} resolves to {:.3e} iterates, beyond the supported maximum of {}; loosen the accuracy or supply a fixed horizon",
                    epsilon, t, MAX_HORIZON
                )));
            }
            Ok((t.round() as usize).max(1))
        }
        Budget::Horizon(0) => Err(SgCoreError::Config(
            "horizon must be at least one iterate".to_string(),
        )),
        Budget::Horizon(t) => Ok(t),
    }
}

/// Spectral norm of the measurement matrix, the square root of the largest
/// eigenvalue of the Gram matrix A'A.
///
/// The Gram matrix is symmetric positive semi-definite up to rounding, so a
/// self-adjoint eigensolver is used and the largest eigenvalue is checked
/// before taking the root.
fn spectral_norm(instance: &Instance) -> Result<f64, SgCoreError> {
    let a = instance.matrix();
    let gram: Mat<f64> = a.transpose() * a;

    let eigenvalues = gram
        .self_adjoint_eigenvalues(faer::Side::Lower)
        .map_err(|e| {
            SgCoreError::Degenerate(format!(
                "eigendecomposition of the Gram matrix failed: {:?}",
                e
            ))
        })?;

    let lambda_max = eigenvalues
        .iter()
        .cloned()
        .fold(f64::NEG_INFINITY, f64::max);

    if !lambda_max.is_finite() || lambda_max <= 0.0 {
        return Err(SgCoreError::Degenerate(format!(
            "largest eigenvalue of the Gram matrix is {}, expected a positive value",
            lambda_max
        )));
    }

    Ok(lambda_max.sqrt())
}

/// Largest column l1 norm of the measurement matrix scaled by 1/n, the
/// subgradient bound in the norm dual to the entropic geometry.
fn max_column_norm(instance: &Instance) -> Result<f64, SgCoreError> {
    let a = instance.matrix();
    let n = instance.observations() as f64;

    let mut lipschitz = 0.0_f64;
    for j in 0..a.ncols() {
        let mut sum = 0.0;
        for i in 0..a.nrows() {
            sum += a.get(i, j).abs();
        }
        lipschitz = lipschitz.max(sum / n);
    }

    if !lipschitz.is_finite() || lipschitz <= 0.0 {
        return Err(SgCoreError::Degenerate(format!(
            "largest column norm of the matrix is {}, expected a positive value",
            lipschitz
        )));
    }

    Ok(lipschitz)
}
