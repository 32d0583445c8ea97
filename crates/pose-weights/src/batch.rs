//! The input/output record of one scoring call.

use crate::error::WeightError;

/// Borrowed view over the buffers of one weight update.
///
/// The caller owns every buffer. `weights` is the only field written by the
/// scorers; all other buffers are shared read-only between execution lanes.
///
/// Correspondence `i` pairs `image_points[i]` with `world_points[i]`.
#[derive(Debug)]
pub struct WeightBatch<'a> {
    /// One output weight per hypothesis (N).
    pub weights: &'a mut [f64],
    /// One 7-component pose record per hypothesis (N).
    pub poses: &'a [[f64; 7]],
    /// Row-major 3x3 camera intrinsics shared by every hypothesis.
    pub intrinsics: &'a [[f64; 3]; 3],
    /// Observed pixel coordinates (F).
    pub image_points: &'a [[f64; 2]],
    /// World points matching `image_points` (F).
    pub world_points: &'a [[f64; 3]],
    /// Declared hypothesis count N.
    pub num_hypotheses: usize,
    /// Declared correspondence count F.
    pub num_correspondences: usize,
}

impl<'a> WeightBatch<'a> {
    /// Create a batch whose cardinalities are taken from `poses` and `image_points`.
    ///
    /// The remaining buffers are still checked by [`WeightBatch::validate`].
    pub fn new(
        weights: &'a mut [f64],
        poses: &'a [[f64; 7]],
        intrinsics: &'a [[f64; 3]; 3],
        image_points: &'a [[f64; 2]],
        world_points: &'a [[f64; 3]],
    ) -> Self {
        Self {
            num_hypotheses: poses.len(),
            num_correspondences: image_points.len(),
            weights,
            poses,
            intrinsics,
            image_points,
            world_points,
        }
    }

    /// Number of hypotheses N.
    pub fn num_hypotheses(&self) -> usize {
        self.num_hypotheses
    }

    /// Number of correspondences F.
    pub fn num_correspondences(&self) -> usize {
        self.num_correspondences
    }

    /// Check that every buffer matches its declared cardinality.
    pub fn validate(&self) -> Result<(), WeightError> {
        check_len("weights", self.num_hypotheses, self.weights.len())?;
        check_len("poses", self.num_hypotheses, self.poses.len())?;
        check_len("image points", self.num_correspondences, self.image_points.len())?;
        check_len("world points", self.num_correspondences, self.world_points.len())?;
        Ok(())
    }
}

pub(crate) fn check_len(name: &'static str, expected: usize, actual: usize) -> Result<(), WeightError> {
    if expected != actual {
        return Err(WeightError::MismatchedLengths {
            name,
            expected,
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const K: [[f64; 3]; 3] = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

    #[test]
    fn test_new_infers_cardinalities() {
        let mut weights = vec![0.0; 2];
        let poses = [[1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]; 2];
        let image = [[0.0, 0.0]; 3];
        let world = [[0.0, 0.0, 1.0]; 3];
        let batch = WeightBatch::new(&mut weights, &poses, &K, &image, &world);
        assert_eq!(batch.num_hypotheses(), 2);
        assert_eq!(batch.num_correspondences(), 3);
        assert!(batch.validate().is_ok());
    }

    #[test]
    fn test_validate_weights_mismatch() {
        let mut weights = vec![0.0; 1];
        let poses = [[1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]; 2];
        let batch = WeightBatch::new(&mut weights, &poses, &K, &[], &[]);
        assert_eq!(
            batch.validate(),
            Err(WeightError::MismatchedLengths {
                name: "weights",
                expected: 2,
                actual: 1,
            })
        );
    }

    #[test]
    fn test_validate_world_points_mismatch() {
        let mut weights = vec![0.0; 1];
        let poses = [[1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]; 1];
        let image = [[0.0, 0.0]; 3];
        let world = [[0.0, 0.0, 1.0]; 2];
        let batch = WeightBatch::new(&mut weights, &poses, &K, &image, &world);
        assert!(matches!(
            batch.validate(),
            Err(WeightError::MismatchedLengths {
                name: "world points",
                expected: 3,
                actual: 2,
            })
        ));
    }

    #[test]
    fn test_validate_declared_count_mismatch() {
        let mut weights = vec![0.0; 2];
        let poses = [[1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]; 2];
        let mut batch = WeightBatch::new(&mut weights, &poses, &K, &[], &[]);
        batch.num_correspondences = 4;
        assert!(matches!(
            batch.validate(),
            Err(WeightError::MismatchedLengths {
                name: "image points",
                ..
            })
        ));
    }
}
