use faer::Col;

use crate::error::SgCoreError;

/// Projects a vector onto the probability simplex in the Euclidean norm.
///
/// Finds the closest point (in l2 distance) to `v` in the set of vectors
/// with nonnegative entries summing to one, using the sort-and-threshold
/// algorithm of Duchi et al. (2008), which runs in O(m log m):
///
/// 1. Sort the entries of `v` in descending order into `u`.
/// 2. Accumulate the running sums `s_k = u_0 + ... + u_k`.
/// 3. Take the largest index `k` with `u_k > (s_k - 1) / (k + 1)` and let
///    `theta` be that threshold.
/// 4. Return `max(v - theta, 0)` element-wise.
///
/// Step 3 deliberately keeps the largest qualifying index, which pins the
/// output down exactly when several indices hit the threshold at once. If
/// every entry is negative the result degenerates to a one-hot vector at the
/// largest coordinate.
///
/// # Arguments
///
/// * `v` - The vector to project; entries may be any real values and are not
///   required to lie on or near the simplex.
///
/// # Returns
///
/// The Euclidean projection of `v` onto the probability simplex.
///
/// # Errors
///
/// Returns [SgCoreError::InvalidInput] if `v` is empty or contains a
/// non-finite entry.
pub fn project_to_simplex(v: &Col<f64>) -> Result<Col<f64>, SgCoreError> {
    let m = v.nrows();

    if m == 0 {
        return Err(SgCoreError::InvalidInput(
            "cannot project an empty vector onto the simplex".to_string(),
        ));
    }

    if v.iter().any(|x| !x.is_finite()) {
        return Err(SgCoreError::InvalidInput(
            "projection input must have finite entries".to_string(),
        ));
    }

    let mut u: Vec<f64> = v.iter().cloned().collect();
    u.sort_by(|a, b| b.total_cmp(a));

    // The condition holds at index 0, so theta is always set at least once
    let mut cssv = 0.0;
    let mut theta = 0.0;
    for (k, &uk) in u.iter().enumerate() {
        cssv += uk;
        let t = (cssv - 1.0) / (k as f64 + 1.0);
        if uk > t {
            theta = t;
        }
    }

    Ok(Col::from_fn(m, |i| (v[i] - theta).max(0.0)))
}
