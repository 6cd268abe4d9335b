//! Re-expressing a sensor's output in another sensor's frame.

use crate::core::transform::RigidTransform;
use crate::core::types::{PointCloud3D, PositionTrack};

/// Apply a rigid transform to a position track and point cloud in place.
///
/// Coordinates of both arrays are rewritten; reflectivity and point order
/// are untouched. The caller is responsible for tracking that the result
/// is now expressed in the target sensor's frame.
pub fn merge_into_frame(
    transform: &RigidTransform,
    track: &mut PositionTrack,
    cloud: &mut PointCloud3D,
) {
    let (xs, ys, zs) = transform.apply(&track.xs, &track.ys, &track.zs);
    track.xs = xs;
    track.ys = ys;
    track.zs = zs;

    let (xs, ys, zs) = transform.apply(&cloud.xs, &cloud.ys, &cloud.zs);
    cloud.xs = xs;
    cloud.ys = ys;
    cloud.zs = zs;
}
