#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Pose weights
//!
//! Scores a batch of camera pose hypotheses against a shared set of 2D-3D
//! correspondences. Each hypothesis receives one weight: the robust
//! reprojection consistency of all correspondences under that pose. The
//! outer loop (particle filter, RANSAC refinement, ...) reads the weights
//! back to resample or select hypotheses.
//!
//! Two entry points compute the same weights:
//!
//! - [`update_weights_sequential`]: one thread, hypotheses in index order.
//! - [`update_weights_parallel`]: Rayon fan-out across hypotheses, optionally
//!   splitting correspondences as well.
//!
//! ## Example
//!
//! ```rust
//! use pose_weights::{
//!     update_weights_parallel, update_weights_sequential, ExecutionStrategy, ScoringParams,
//!     WeightBatch,
//! };
//!
//! let k = [[800.0, 0.0, 320.0], [0.0, 800.0, 240.0], [0.0, 0.0, 1.0]];
//! let world = [[0.0, 0.0, 4.0], [0.5, 0.0, 4.0], [0.0, 0.5, 4.0]];
//! let image = [[320.0, 240.0], [420.0, 240.0], [320.0, 340.0]];
//!
//! // [qw, qx, qy, qz, tx, ty, tz]
//! let poses = [
//!     [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
//!     [1.0, 0.0, 0.0, 0.0, 0.1, 0.0, 0.0],
//! ];
//!
//! let params = ScoringParams::default();
//! let mut seq = [0.0; 2];
//! let mut par = [0.0; 2];
//! update_weights_sequential(&mut WeightBatch::new(&mut seq, &poses, &k, &image, &world), &params)?;
//! update_weights_parallel(
//!     &mut WeightBatch::new(&mut par, &poses, &k, &image, &world),
//!     &params,
//!     ExecutionStrategy::PerHypothesis,
//! )?;
//!
//! assert_eq!(seq[0], 1.0);
//! assert!(seq[1] < seq[0]);
//! assert_eq!(seq, par);
//! # Ok::<(), pose_weights::WeightError>(())
//! ```

/// Reduction of per-correspondence scores and the shared per-hypothesis scoring routine.
pub mod aggregation;

/// The borrowed input/output record of one scoring call.
pub mod batch;

/// Pinhole camera projection.
pub mod camera;

/// Error types.
pub mod error;

/// Robust kernels.
pub mod losses;

/// Rayon-based scorer.
pub mod parallel;

/// Scoring configuration.
pub mod params;

/// Pose record layouts.
pub mod pose;

/// Reprojection residuals.
pub mod projection;

/// Single-threaded reference scorer.
pub mod sequential;

pub use aggregation::{Aggregation, ScoringContext};
pub use batch::WeightBatch;
pub use camera::PinholeCamera;
pub use error::WeightError;
pub use losses::{CauchyLoss, HuberLoss, InverseLoss, LossKind, RobustLoss};
pub use parallel::{update_weights_parallel, ExecutionStrategy};
pub use params::ScoringParams;
pub use pose::{Pose, PoseLayout};
pub use projection::reprojection_residual;
pub use sequential::update_weights_sequential;
