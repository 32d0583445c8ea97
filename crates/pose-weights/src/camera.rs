//! Pinhole projection through a 3x3 intrinsics matrix.

use glam::{DMat3, DVec2, DVec3};

/// A pinhole camera described by its calibration matrix `K`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinholeCamera {
    k: DMat3,
}

impl PinholeCamera {
    /// Create a camera from a row-major intrinsics matrix
    /// `[[fx, s, cx], [0, fy, cy], [0, 0, 1]]`.
    ///
    /// The matrix is not validated; a singular `K` yields non-finite
    /// projections, which [`PinholeCamera::project`] reports as `None`.
    pub fn from_matrix(k: &[[f64; 3]; 3]) -> Self {
        // glam stores columns, the input is row-major.
        Self {
            k: DMat3::from_cols_array_2d(k).transpose(),
        }
    }

    /// Create a camera from focal lengths and principal point.
    pub fn new(fx: f64, fy: f64, cx: f64, cy: f64) -> Self {
        Self::from_matrix(&[[fx, 0.0, cx], [0.0, fy, cy], [0.0, 0.0, 1.0]])
    }

    /// Return the intrinsics as a row-major matrix.
    pub fn to_matrix(&self) -> [[f64; 3]; 3] {
        self.k.transpose().to_cols_array_2d()
    }

    /// Project a camera-frame point to pixel coordinates.
    ///
    /// Returns `None` when the point's depth is not greater than `min_depth`
    /// or when the projection is not finite.
    #[inline]
    pub fn project(&self, camera_point: DVec3, min_depth: f64) -> Option<DVec2> {
        if camera_point.z.is_nan() || camera_point.z <= min_depth {
            return None;
        }
        let h = self.k * camera_point;
        let inv_z = 1.0 / h.z;
        let pixel = DVec2::new(h.x * inv_z, h.y * inv_z);
        pixel.is_finite().then_some(pixel)
    }
}
