//! Single-threaded reference scorer.

use crate::aggregation::ScoringContext;
use crate::batch::WeightBatch;
use crate::error::WeightError;
use crate::params::ScoringParams;

/// Update every weight of the batch on the calling thread, in hypothesis order.
///
/// This is the reference implementation the parallel scorer is checked
/// against. Parameters and buffer lengths are validated first; on error no
/// weight is written.
///
/// # Arguments
///
/// * `batch` - The poses, correspondences and output weights.
/// * `params` - Pose layout, robust kernel and aggregation.
///
/// # Example
///
/// ```
/// use pose_weights::{update_weights_sequential, ScoringParams, WeightBatch};
///
/// let k = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
/// let poses = [[1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]];
/// let image = [[0.0, 0.0]];
/// let world = [[0.0, 0.0, 2.0]];
/// let mut weights = [0.0];
///
/// let mut batch = WeightBatch::new(&mut weights, &poses, &k, &image, &world);
/// update_weights_sequential(&mut batch, &ScoringParams::default())?;
/// assert_eq!(weights[0], 1.0);
/// # Ok::<(), pose_weights::WeightError>(())
/// ```
pub fn update_weights_sequential(
    batch: &mut WeightBatch<'_>,
    params: &ScoringParams,
) -> Result<(), WeightError> {
    params.validate()?;
    batch.validate()?;

    log::debug!(
        "sequential weight update: {} hypotheses, {} correspondences",
        batch.num_hypotheses,
        batch.num_correspondences
    );

    let ctx = ScoringContext::new(batch.intrinsics, batch.image_points, batch.world_points, params)?;
    for (weight, pose) in batch.weights.iter_mut().zip(batch.poses) {
        *weight = ctx.hypothesis_weight(pose);
    }
    Ok(())
}
