//! Robust kernels turning a reprojection residual into a score.

use serde::{Deserialize, Serialize};

use crate::error::WeightError;

/// Trait for robust kernels mapping a residual magnitude to a score in `[0, 1]`.
///
/// Implementations must be non-increasing in the residual, return `1.0` for a
/// zero residual and `0.0` for `f64::INFINITY`, the worst-case residual. Every
/// finite residual scores strictly above zero, even when the kernel underflows.
pub trait RobustLoss: Send + Sync {
    /// Score a non-negative residual magnitude in pixels.
    fn score(&self, residual: f64) -> f64;
}

/// Clamp the score of a finite residual to the smallest positive normal value.
#[inline]
fn floor_finite(residual: f64, score: f64) -> f64 {
    if residual.is_finite() {
        score.max(f64::MIN_POSITIVE)
    } else {
        score
    }
}

/// Cauchy kernel: `1 / (1 + r² / σ²)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CauchyLoss {
    /// Residual scale σ in pixels.
    pub scale: f64,
}

impl CauchyLoss {
    /// Create new Cauchy loss. Panics if scale <= 0.
    pub fn new(scale: f64) -> Self {
        assert!(scale > 0.0, "Cauchy scale must be positive, got {}", scale);
        CauchyLoss { scale }
    }
}

impl RobustLoss for CauchyLoss {
    #[inline]
    fn score(&self, residual: f64) -> f64 {
        let u = residual / self.scale;
        // u² overflows past ~1e154·σ
        floor_finite(residual, 1.0 / u.mul_add(u, 1.0))
    }
}

/// Huber kernel: `1` inside the threshold, `δ / r` outside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HuberLoss {
    /// Threshold δ in pixels.
    pub delta: f64,
}

impl HuberLoss {
    /// Create new Huber loss. Panics if delta <= 0.
    pub fn new(delta: f64) -> Self {
        assert!(delta > 0.0, "Huber delta must be positive, got {}", delta);
        HuberLoss { delta }
    }
}

impl RobustLoss for HuberLoss {
    #[inline]
    fn score(&self, residual: f64) -> f64 {
        if residual <= self.delta {
            1.0
        } else {
            floor_finite(residual, self.delta / residual)
        }
    }
}

/// Inverse kernel: `1 / (1 + r / σ)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InverseLoss {
    /// Residual scale σ in pixels.
    pub scale: f64,
}

impl InverseLoss {
    /// Create new inverse loss. Panics if scale <= 0.
    pub fn new(scale: f64) -> Self {
        assert!(scale > 0.0, "Inverse scale must be positive, got {}", scale);
        InverseLoss { scale }
    }
}

impl RobustLoss for InverseLoss {
    #[inline]
    fn score(&self, residual: f64) -> f64 {
        floor_finite(residual, 1.0 / (1.0 + residual / self.scale))
    }
}

/// Serializable selection of the robust kernel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LossKind {
    /// See [`CauchyLoss`].
    Cauchy {
        /// Residual scale σ in pixels.
        scale: f64,
    },
    /// See [`HuberLoss`].
    Huber {
        /// Threshold δ in pixels.
        delta: f64,
    },
    /// See [`InverseLoss`].
    Inverse {
        /// Residual scale σ in pixels.
        scale: f64,
    },
}

impl Default for LossKind {
    fn default() -> Self {
        LossKind::Cauchy { scale: 1.0 }
    }
}

impl LossKind {
    /// Check that the kernel parameter is positive and finite.
    pub fn validate(&self) -> Result<(), WeightError> {
        let (name, value) = match *self {
            LossKind::Cauchy { scale } => ("scale", scale),
            LossKind::Huber { delta } => ("delta", delta),
            LossKind::Inverse { scale } => ("scale", scale),
        };
        if !(value.is_finite() && value > 0.0) {
            return Err(WeightError::InvalidLossParameter { name, value });
        }
        Ok(())
    }
}

impl RobustLoss for LossKind {
    #[inline]
    fn score(&self, residual: f64) -> f64 {
        match *self {
            LossKind::Cauchy { scale } => CauchyLoss { scale }.score(residual),
            LossKind::Huber { delta } => HuberLoss { delta }.score(residual),
            LossKind::Inverse { scale } => InverseLoss { scale }.score(residual),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kernels() -> [LossKind; 3] {
        [
            LossKind::Cauchy { scale: 2.0 },
            LossKind::Huber { delta: 1.5 },
            LossKind::Inverse { scale: 0.5 },
        ]
    }

    #[test]
    fn test_cauchy_loss_scores() {
        let cauchy = CauchyLoss::new(1.0);
        assert_eq!(cauchy.score(0.0), 1.0);
        assert!((cauchy.score(0.1) - (1.0 / 1.01)).abs() < 1e-12);
        assert!((cauchy.score(3.0) - 0.1).abs() < 1e-12);
        assert!(cauchy.score(1e5) > 0.0 && cauchy.score(1e5) < 1e-9);
    }

    #[test]
    fn test_huber_loss_scores() {
        let huber = HuberLoss::new(1.0);
        assert_eq!(huber.score(0.0), 1.0);
        assert_eq!(huber.score(1.0), 1.0);
        assert!((huber.score(4.0) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_inverse_loss_scores() {
        let inverse = InverseLoss::new(2.0);
        assert_eq!(inverse.score(0.0), 1.0);
        assert!((inverse.score(2.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    #[should_panic(expected = "Cauchy scale must be positive")]
    fn test_cauchy_loss_zero_scale_panics() {
        CauchyLoss::new(0.0);
    }

    #[test]
    #[should_panic(expected = "Huber delta must be positive")]
    fn test_huber_loss_negative_delta_panics() {
        HuberLoss::new(-1.0);
    }

    #[test]
    fn test_kernels_are_bounded_and_monotonic() {
        let residuals = [0.0, 1e-3, 0.5, 1.0, 2.0, 10.0, 1e3, 1e8, f64::INFINITY];
        for loss in kernels() {
            assert_eq!(loss.score(0.0), 1.0);
            assert_eq!(loss.score(f64::INFINITY), 0.0);
            for pair in residuals.windows(2) {
                let (a, b) = (loss.score(pair[0]), loss.score(pair[1]));
                assert!(a >= b, "{loss:?}: score({}) < score({})", pair[0], pair[1]);
                assert!((0.0..=1.0).contains(&b));
            }
            assert!(loss.score(1e8) > 0.0);
        }
    }

    #[test]
    fn test_huge_finite_residual_stays_positive() {
        for loss in kernels() {
            for residual in [1e160, 1e300, f64::MAX] {
                let score = loss.score(residual);
                assert!(score > 0.0, "{loss:?}: score({residual}) = {score}");
                assert!(score <= loss.score(1e8));
            }
            assert_eq!(loss.score(f64::INFINITY), 0.0);
        }
        assert_eq!(CauchyLoss::new(1.0).score(1e160), f64::MIN_POSITIVE);
    }

    #[test]
    fn test_loss_kind_validate() {
        assert!(LossKind::default().validate().is_ok());
        assert_eq!(
            LossKind::Huber { delta: 0.0 }.validate(),
            Err(WeightError::InvalidLossParameter {
                name: "delta",
                value: 0.0
            })
        );
        assert!(LossKind::Cauchy { scale: f64::NAN }.validate().is_err());
        assert!(LossKind::Inverse { scale: f64::INFINITY }.validate().is_err());
    }
}
