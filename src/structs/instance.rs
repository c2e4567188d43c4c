use faer::{Col, Mat};
use faer_ext::IntoFaer;
use ndarray::{Array1, Array2};

use crate::error::SgCoreError;

/// A robust regression problem instance
///
/// Holds the measurement matrix, with one row per observation and one column
/// per decision variable, and the target vector with one entry per
/// observation. Both are validated at construction and immutable afterwards;
/// optimizers borrow the instance for the duration of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    matrix: Mat<f64>,
    target: Col<f64>,
}

impl Instance {
    /// Create a new [Instance] from a measurement matrix and a target vector
    ///
    /// # Errors
    ///
    /// Returns [SgCoreError::InvalidInput] if the matrix is empty in either
    /// dimension, if the target length does not match the number of matrix
    /// rows, or if any entry is not finite.
    pub fn new(matrix: Mat<f64>, target: Col<f64>) -> Result<Self, SgCoreError> {
        if matrix.nrows() == 0 || matrix.ncols() == 0 {
            return Err(SgCoreError::InvalidInput(format!(
                "measurement matrix must be non-empty, got {}x{}",
                matrix.nrows(),
                matrix.ncols()
            )));
        }

        if target.nrows() != matrix.nrows() {
            return Err(SgCoreError::InvalidInput(format!(
                "target vector has {} entries but the matrix has {} rows",
                target.nrows(),
                matrix.nrows()
            )));
        }

        for j in 0..matrix.ncols() {
            for i in 0..matrix.nrows() {
                if !matrix.get(i, j).is_finite() {
                    return Err(SgCoreError::InvalidInput(format!(
                        "matrix entry ({}, {}) is {}",
                        i,
                        j,
                        matrix.get(i, j)
                    )));
                }
            }
        }

        for i in 0..target.nrows() {
            if !target.get(i).is_finite() {
                return Err(SgCoreError::InvalidInput(format!(
                    "target entry {} is {}",
                    i,
                    target.get(i)
                )));
            }
        }

        Ok(Self { matrix, target })
    }

    /// Create an [Instance] from ndarray containers
    pub fn from_ndarray(matrix: &Array2<f64>, target: &Array1<f64>) -> Result<Self, SgCoreError> {
        let matrix = matrix.view().into_faer().to_owned();
        let target = Col::from_fn(target.len(), |i| target[i]);
        Self::new(matrix, target)
    }

    /// Get a reference to the measurement matrix
    pub fn matrix(&self) -> &Mat<f64> {
        &self.matrix
    }

    /// Get a reference to the target vector
    pub fn target(&self) -> &Col<f64> {
        &self.target
    }

    /// Number of observations (matrix rows)
    pub fn observations(&self) -> usize {
        self.matrix.nrows()
    }

    /// Dimension of the decision variable (matrix columns)
    pub fn dimension(&self) -> usize {
        self.matrix.ncols()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faer::mat;

    #[test]
    fn rejects_empty_matrix() {
        let matrix: Mat<f64> = Mat::from_fn(0, 0, |_, _| 0.0);
        let target: Col<f64> = Col::from_fn(0, |_| 0.0);

        assert!(matches!(
            Instance::new(matrix, target),
            Err(SgCoreError::InvalidInput(_))
        ));
    }

    #[test]
    fn rejects_target_length_mismatch() {
        let matrix = mat![[1.0, 2.0], [3.0, 4.0]];
        let target = Col::from_fn(3, |_| 0.0);

        assert!(matches!(
            Instance::new(matrix, target),
            Err(SgCoreError::InvalidInput(_))
        ));
    }

    #[test]
    fn rejects_non_finite_entries() {
        let matrix = mat![[1.0, f64::NAN], [3.0, 4.0]];
        let target = Col::from_fn(2, |_| 0.0);
        assert!(matches!(
            Instance::new(matrix, target),
            Err(SgCoreError::InvalidInput(_))
        ));

        let matrix = mat![[1.0, 2.0]];
        let target = Col::from_fn(1, |_| f64::INFINITY);
        assert!(matches!(
            Instance::new(matrix, target),
            Err(SgCoreError::InvalidInput(_))
        ));
    }

    #[test]
    fn accessors_report_shape() {
        let matrix = mat![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let target = Col::from_fn(2, |i| i as f64);
        let instance = Instance::new(matrix, target).unwrap();

        assert_eq!(instance.observations(), 2);
        assert_eq!(instance.dimension(), 3);
        assert_eq!(*instance.matrix().get(1, 2), 6.0);
        assert_eq!(instance.target()[1], 1.0);
    }

    #[test]
    fn converts_from_ndarray() {
        let matrix = ndarray::array![[1.0, 2.0], [3.0, 4.0]];
        let target = ndarray::array![5.0, 6.0];
        let instance = Instance::from_ndarray(&matrix, &target).unwrap();

        assert_eq!(instance.observations(), 2);
        assert_eq!(*instance.matrix().get(0, 1), 2.0);
        assert_eq!(instance.target()[0], 5.0);
    }
}
