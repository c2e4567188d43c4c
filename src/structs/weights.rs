use faer::Col;
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// A point on the probability simplex.
///
/// One entry per decision variable. Every point an optimizer produces has
/// nonnegative entries summing to one; construction itself does not enforce
/// membership, use [Weights::on_simplex] to check it explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct Weights {
    weights: Col<f64>,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            weights: Col::from_fn(0, |_| 0.0),
        }
    }
}

impl Weights {
    pub fn new(weights: Col<f64>) -> Self {
        Self { weights }
    }

    /// Create a new [Weights] instance from a vector of weights.
    pub fn from_vec(weights: Vec<f64>) -> Self {
        Self {
            weights: Col::from_fn(weights.len(), |i| weights[i]),
        }
    }

    /// The uniform point, every entry equal to 1/m.
    pub fn uniform(m: usize) -> Self {
        Self {
            weights: Col::from_fn(m, |_| 1.0 / m as f64),
        }
    }

    /// Get a reference to the weights.
    pub fn weights(&self) -> &Col<f64> {
        &self.weights
    }

    /// Get the number of weights.
    pub fn len(&self) -> usize {
        self.weights.nrows()
    }

    /// Check if the point has no entries.
    pub fn is_empty(&self) -> bool {
        self.weights.nrows() == 0
    }

    /// Sum of all entries.
    pub fn sum(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Check simplex membership within a tolerance.
    ///
    /// Every entry must be at least `-tol` and the sum must be within `tol`
    /// of one.
    pub fn on_simplex(&self, tol: f64) -> bool {
        self.iter().all(|w| w >= -tol) && (self.sum() - 1.0).abs() <= tol
    }

    /// Get a vector representation of the weights.
    pub fn to_vec(&self) -> Vec<f64> {
        self.weights.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.weights.iter().cloned()
    }
}

impl Serialize for Weights {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_vec().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Weights {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let weights_vec = Vec::<f64>::deserialize(deserializer)?;
        Ok(Self::from_vec(weights_vec))
    }
}

impl From<Vec<f64>> for Weights {
    fn from(weights: Vec<f64>) -> Self {
        Self::from_vec(weights)
    }
}

impl From<Col<f64>> for Weights {
    fn from(weights: Col<f64>) -> Self {
        Self { weights }
    }
}

impl Index<usize> for Weights {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.weights[index]
    }
}
