//! Decoding of 7-component pose records.

use glam::{DMat3, DQuat, DVec3};
use serde::{Deserialize, Serialize};

/// How the seven components of a pose record are laid out.
///
/// Every layout describes the **world → camera** transform
/// `p_c = s * R * p_w + t`, where `s == 1` for the quaternion layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PoseLayout {
    /// `[qw, qx, qy, qz, tx, ty, tz]`
    #[default]
    QuaternionWxyz,
    /// `[qx, qy, qz, qw, tx, ty, tz]`
    QuaternionXyzw,
    /// `[rx, ry, rz, tx, ty, tz, s]` with a Rodrigues rotation vector and a uniform scale.
    AxisAngleScale,
}

/// A decoded rigid (or similarity) world → camera transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Rotation matrix.
    pub rotation: DMat3,
    /// Translation vector.
    pub translation: DVec3,
    /// Uniform scale applied before the translation.
    pub scale: f64,
}

impl Pose {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        rotation: DMat3::IDENTITY,
        translation: DVec3::ZERO,
        scale: 1.0,
    };

    /// Map a world point into the camera frame.
    #[inline]
    pub fn transform_point(&self, world: DVec3) -> DVec3 {
        self.scale * (self.rotation * world) + self.translation
    }
}

impl PoseLayout {
    /// Decode a pose record.
    ///
    /// Quaternions are used exactly as given: callers are expected to pass
    /// unit quaternions, no normalization happens here.
    pub fn decode(&self, record: &[f64; 7]) -> Pose {
        match self {
            PoseLayout::QuaternionWxyz => {
                let [w, x, y, z, tx, ty, tz] = *record;
                Pose {
                    rotation: DMat3::from_quat(DQuat::from_xyzw(x, y, z, w)),
                    translation: DVec3::new(tx, ty, tz),
                    scale: 1.0,
                }
            }
            PoseLayout::QuaternionXyzw => {
                let [x, y, z, w, tx, ty, tz] = *record;
                Pose {
                    rotation: DMat3::from_quat(DQuat::from_xyzw(x, y, z, w)),
                    translation: DVec3::new(tx, ty, tz),
                    scale: 1.0,
                }
            }
            PoseLayout::AxisAngleScale => {
                let [rx, ry, rz, tx, ty, tz, s] = *record;
                Pose {
                    rotation: DMat3::from_quat(DQuat::from_scaled_axis(DVec3::new(rx, ry, rz))),
                    translation: DVec3::new(tx, ty, tz),
                    scale: s,
                }
            }
        }
    }

    /// Encode the identity transform in this layout.
    pub fn identity(&self) -> [f64; 7] {
        match self {
            PoseLayout::QuaternionWxyz => [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            PoseLayout::QuaternionXyzw => [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0],
            PoseLayout::AxisAngleScale => [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0],
        }
    }
}
