use faer::Col;

use crate::error::SgCoreError;
use crate::structs::instance::Instance;

/// Sign with `sign0(0) = 0`, the subgradient choice at the kinks of |.|
///
/// `f64::signum` returns 1.0 at 0.0, which would pull exactly-fit
/// observations into the subgradient.
fn sign0(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

fn residual(instance: &Instance, x: &Col<f64>) -> Result<Col<f64>, SgCoreError> {
    if x.nrows() != instance.dimension() {
        return Err(SgCoreError::InvalidInput(format!(
            "point has {} entries but the instance has dimension {}",
            x.nrows(),
            instance.dimension()
        )));
    }

    Ok(instance.matrix() * x - instance.target())
}

/// Mean absolute residual of the linear model at `x`.
///
/// Computes (1/n) * sum_i |a_i' x - b_i| over the n observations of the
/// instance. `x` is not required to lie on the simplex, which lets callers
/// evaluate arbitrary candidate points.
///
/// # Errors
///
/// Returns [SgCoreError::InvalidInput] if the length of `x` does not match
/// the instance dimension.
pub fn objective(instance: &Instance, x: &Col<f64>) -> Result<f64, SgCoreError> {
    let r = residual(instance, x)?;
    let n = instance.observations() as f64;

    Ok(r.iter().map(|ri| ri.abs()).sum::<f64>() / n)
}

/// A subgradient of the mean absolute residual at `x`.
///
/// Computes (1/n) * A' sign(A x - b) with sign(0) = 0, so observations with
/// an exactly zero residual contribute nothing.
///
/// # Errors
///
/// Returns [SgCoreError::InvalidInput] if the length of `x` does not match
/// the instance dimension.
pub fn subgradient(instance: &Instance, x: &Col<f64>) -> Result<Col<f64>, SgCoreError> {
    let r = residual(instance, x)?;
    let n = instance.observations() as f64;

    let s = Col::from_fn(r.nrows(), |i| sign0(r[i]) / n);

    Ok(instance.matrix().transpose() * &s)
}
