use serde::Serialize;
use std::ops::Index;

use crate::structs::weights::Weights;

/// Largest up-front reservation; longer trajectories grow as they append
const PREALLOC_LIMIT: usize = 1 << 16;

/// The ordered sequence of iterates produced by one optimizer run.
///
/// The first point is always the uniform starting point and points are only
/// ever appended, so index i holds the iterate after i steps. The length
/// equals the schedule horizon once a run completes.
#[derive(Debug, Clone, Serialize)]
pub struct Trajectory {
    points: Vec<Weights>,
}

impl Trajectory {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub(crate) fn with_capacity(horizon: usize) -> Self {
        Self {
            points: Vec::with_capacity(horizon.min(PREALLOC_LIMIT)),
        }
    }

    pub(crate) fn push(&mut self, point: Weights) {
        self.points.push(point);
    }

    /// Get the recorded points in iteration order.
    pub fn points(&self) -> &[Weights] {
        &self.points
    }

    /// Number of recorded points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The most recent iterate, if any step has been recorded.
    pub fn last(&self) -> Option<&Weights> {
        self.points.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Weights> {
        self.points.iter()
    }

    /// The time-averaged (Cesaro mean) iterate.
    ///
    /// Subgradient methods converge through this average rather than through
    /// the final point, so reported objectives are evaluated here. Returns an
    /// empty point for an empty trajectory.
    pub fn mean(&self) -> Weights {
        let count = self.points.len();
        if count == 0 {
            return Weights::default();
        }

        let m = self.points[0].len();
        let mut acc = vec![0.0; m];
        for point in &self.points {
            for (j, value) in point.iter().enumerate() {
                acc[j] += value;
            }
        }

        Weights::from_vec(acc.into_iter().map(|v| v / count as f64).collect())
    }
}

impl Default for Trajectory {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<usize> for Trajectory {
    type Output = Weights;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_appends_in_order() {
        let mut trajectory = Trajectory::new();
        trajectory.push(Weights::from_vec(vec![1.0, 0.0]));
        trajectory.push(Weights::from_vec(vec![0.0, 1.0]));

        assert_eq!(trajectory.len(), 2);
        assert_eq!(trajectory[0][0], 1.0);
        assert_eq!(trajectory[1][1], 1.0);
        assert_eq!(trajectory.last().unwrap()[0], 0.0);
    }

    #[test]
    fn mean_averages_all_points() {
        let mut trajectory = Trajectory::new();
        trajectory.push(Weights::from_vec(vec![1.0, 0.0]));
        trajectory.push(Weights::from_vec(vec![0.0, 1.0]));
        trajectory.push(Weights::from_vec(vec![0.5, 0.5]));

        let mean = trajectory.mean();
        assert!((mean[0] - 0.5).abs() < 1e-15);
        assert!((mean[1] - 0.5).abs() < 1e-15);
    }

    #[test]
    fn mean_of_empty_trajectory_is_empty() {
        let trajectory = Trajectory::new();

        assert!(trajectory.is_empty());
        assert_eq!(trajectory.mean().len(), 0);
    }

    #[test]
    fn oversized_reservation_is_clamped() {
        let mut trajectory = Trajectory::with_capacity(usize::MAX);

        assert!(trajectory.is_empty());
        trajectory.push(Weights::from_vec(vec![1.0]));
        assert_eq!(trajectory.len(), 1);
    }
}
