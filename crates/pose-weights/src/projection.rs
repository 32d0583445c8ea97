//! Reprojection residual of a single correspondence.

use glam::{DVec2, DVec3};

use crate::camera::PinholeCamera;
use crate::pose::Pose;

/// Compute the pixel distance between the observed and the predicted point.
///
/// Returns `None` for points the camera cannot see (depth not above
/// `min_depth`, or a non-finite projection). Scorers treat `None` as an
/// infinite residual.
#[inline]
pub fn reprojection_residual(
    pose: &Pose,
    camera: &PinholeCamera,
    world_point: &[f64; 3],
    image_point: &[f64; 2],
    min_depth: f64,
) -> Option<f64> {
    let pc = pose.transform_point(DVec3::from_array(*world_point));
    let predicted = camera.project(pc, min_depth)?;
    let d = predicted - DVec2::from_array(*image_point);
    let residual = d.x.hypot(d.y);
    // observations may carry NaN/inf; those count as unexplained
    residual.is_finite().then_some(residual)
}
