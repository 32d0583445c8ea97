//! Reduction of per-correspondence scores into one weight per hypothesis.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::batch::check_len;
use crate::camera::PinholeCamera;
use crate::error::WeightError;
use crate::losses::RobustLoss;
use crate::params::ScoringParams;
use crate::pose::Pose;
use crate::projection::reprojection_residual;

/// How the robust scores of one hypothesis are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Aggregation {
    /// Average score, in `[0, 1]`.
    #[default]
    Mean,
    /// Summed score, in `[0, F]`.
    Sum,
}

impl Aggregation {
    /// Turn the score sum of `count` correspondences into a weight.
    ///
    /// Zero correspondences give a weight of `0.0`.
    #[inline]
    pub fn finish(&self, score_sum: f64, count: usize) -> f64 {
        match self {
            Aggregation::Sum => score_sum,
            Aggregation::Mean if count == 0 => 0.0,
            Aggregation::Mean => score_sum / count as f64,
        }
    }

    /// Weight of a hypothesis that reprojects all `count` points exactly.
    pub fn max_weight(&self, count: usize) -> f64 {
        self.finish(count as f64, count)
    }
}

/// Read-only state shared by every hypothesis of a batch.
///
/// Holds views into the caller's correspondence buffers; cloning it per
/// execution lane is free.
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    camera: PinholeCamera,
    image_points: &'a [[f64; 2]],
    world_points: &'a [[f64; 3]],
    params: &'a ScoringParams,
}

impl<'a> ScoringContext<'a> {
    /// Create a context over index-aligned correspondences.
    ///
    /// Fails with [`WeightError::MismatchedLengths`] when `world_points` does
    /// not have one entry per image point.
    pub fn new(
        intrinsics: &[[f64; 3]; 3],
        image_points: &'a [[f64; 2]],
        world_points: &'a [[f64; 3]],
        params: &'a ScoringParams,
    ) -> Result<Self, WeightError> {
        check_len("world points", image_points.len(), world_points.len())?;
        Ok(Self {
            camera: PinholeCamera::from_matrix(intrinsics),
            image_points,
            world_points,
            params,
        })
    }

    /// Number of correspondences.
    pub fn len(&self) -> usize {
        self.image_points.len()
    }

    /// Whether there are no correspondences.
    pub fn is_empty(&self) -> bool {
        self.image_points.is_empty()
    }

    /// Decode a pose record with the configured layout.
    #[inline]
    pub fn decode(&self, record: &[f64; 7]) -> Pose {
        self.params.layout.decode(record)
    }

    /// Robust score of a single correspondence, `0.0` when it cannot be projected.
    #[inline]
    pub fn score(&self, pose: &Pose, index: usize) -> f64 {
        let residual = reprojection_residual(
            pose,
            &self.camera,
            &self.world_points[index],
            &self.image_points[index],
            self.params.min_depth,
        )
        .unwrap_or(f64::INFINITY);
        self.params.loss.score(residual)
    }

    /// Sum of the robust scores over a range of correspondences, in index order.
    pub fn score_sum(&self, pose: &Pose, range: Range<usize>) -> f64 {
        range.fold(0.0, |acc, i| acc + self.score(pose, i))
    }

    /// Weight of one hypothesis against every correspondence.
    pub fn hypothesis_weight(&self, record: &[f64; 7]) -> f64 {
        let pose = self.decode(record);
        let sum = self.score_sum(&pose, 0..self.len());
        self.params.aggregation.finish(sum, self.len())
    }

    /// Residual of every correspondence for one hypothesis; `None` marks unseen points.
    pub fn residuals(&self, record: &[f64; 7]) -> Vec<Option<f64>> {
        let pose = self.decode(record);
        let residuals: Vec<_> = self
            .world_points
            .iter()
            .zip(self.image_points)
            .map(|(w, x)| {
                reprojection_residual(&pose, &self.camera, w, x, self.params.min_depth)
            })
            .collect();
        log::trace!(
            "hypothesis has {} unseen points out of {}",
            residuals.iter().filter(|r| r.is_none()).count(),
            residuals.len()
        );
        residuals
    }
}
