//! Scoring configuration shared by both scorers.

use serde::{Deserialize, Serialize};

use crate::aggregation::Aggregation;
use crate::error::WeightError;
use crate::losses::LossKind;
use crate::pose::PoseLayout;

/// Parameters shared by the sequential and the parallel scorer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringParams {
    /// Layout of the 7-component pose records.
    pub layout: PoseLayout,
    /// Robust kernel applied to every residual.
    pub loss: LossKind,
    /// Reduction of the per-correspondence scores.
    pub aggregation: Aggregation,
    /// Points whose camera-frame depth is not above this value are treated as unseen.
    pub min_depth: f64,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            layout: PoseLayout::default(),
            loss: LossKind::default(),
            aggregation: Aggregation::default(),
            min_depth: 0.0,
        }
    }
}

impl ScoringParams {
    /// Check the parameters before any scoring happens.
    pub fn validate(&self) -> Result<(), WeightError> {
        self.loss.validate()?;
        if !self.min_depth.is_finite() {
            return Err(WeightError::InvalidMinDepth(self.min_depth));
        }
        Ok(())
    }
}
