//! Rayon-backed scorer with selectable execution strategies.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::aggregation::ScoringContext;
use crate::batch::WeightBatch;
use crate::error::WeightError;
use crate::params::ScoringParams;

/// Controls how the parallel scorer distributes the hypothesis × correspondence workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExecutionStrategy {
    /// Use the global Rayon thread pool with one work item per hypothesis.
    ///
    /// Every work item owns exactly one output weight, so no synchronization
    /// is needed. Produces bit-identical results to the sequential scorer.
    #[default]
    PerHypothesis,

    /// Also split the correspondences of each hypothesis into chunks of the
    /// given size and tree-reduce their partial sums.
    ///
    /// Useful when N is small and F is large. The summation order differs
    /// from the sequential scorer, so results agree within rounding.
    SplitCorrespondences(usize),

    /// Run [`ExecutionStrategy::PerHypothesis`] on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    Fixed(usize),
}

/// Update every weight of the batch using the Rayon thread pool.
///
/// Computes the same weights as
/// [`update_weights_sequential`](crate::update_weights_sequential). All
/// validation, including thread pool creation, happens before the first
/// weight is written: the call either fills every weight or returns an error.
///
/// # Arguments
///
/// * `batch` - The poses, correspondences and output weights.
/// * `params` - Pose layout, robust kernel and aggregation.
/// * `strategy` - How work is partitioned across threads.
pub fn update_weights_parallel(
    batch: &mut WeightBatch<'_>,
    params: &ScoringParams,
    strategy: ExecutionStrategy,
) -> Result<(), WeightError> {
    params.validate()?;
    batch.validate()?;

    log::debug!(
        "parallel weight update: {} hypotheses, {} correspondences, {:?}",
        batch.num_hypotheses,
        batch.num_correspondences,
        strategy
    );

    let ctx = ScoringContext::new(batch.intrinsics, batch.image_points, batch.world_points, params)?;
    let poses = batch.poses;
    let weights = &mut *batch.weights;

    match strategy {
        ExecutionStrategy::PerHypothesis => {
            per_hypothesis(&ctx, poses, weights);
        }
        ExecutionStrategy::SplitCorrespondences(chunk) => {
            if chunk == 0 {
                return Err(WeightError::InvalidChunkSize(chunk));
            }
            split_correspondences(&ctx, poses, weights, chunk, params);
        }
        ExecutionStrategy::Fixed(n) => {
            if n == 0 {
                return Err(WeightError::InvalidThreadCount(n));
            }
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| WeightError::ThreadPoolBuild(e.to_string()))?;

            pool.install(|| per_hypothesis(&ctx, poses, weights));
        }
    }
    Ok(())
}

fn per_hypothesis(ctx: &ScoringContext<'_>, poses: &[[f64; 7]], weights: &mut [f64]) {
    poses
        .par_iter()
        .zip(weights.par_iter_mut())
        .for_each(|(pose, weight)| *weight = ctx.hypothesis_weight(pose));
}

fn split_correspondences(
    ctx: &ScoringContext<'_>,
    poses: &[[f64; 7]],
    weights: &mut [f64],
    chunk: usize,
    params: &ScoringParams,
) {
    let count = ctx.len();
    let num_chunks = count.div_ceil(chunk);
    poses
        .par_iter()
        .zip(weights.par_iter_mut())
        .for_each(|(record, weight)| {
            let pose = ctx.decode(record);
            let sum: f64 = (0..num_chunks)
                .into_par_iter()
                .map(|c| {
                    let start = c * chunk;
                    ctx.score_sum(&pose, start..(start + chunk).min(count))
                })
                .sum();
            *weight = params.aggregation.finish(sum, count);
        });
}
