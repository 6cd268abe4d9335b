//! Point cloud synthesis from raw scan samples.

use crate::core::types::{MountOffset, PointCloud3D, PositionTrack, ScanSample, Trajectory};
use crate::error::Result;

/// Synthesize one sensor's position track and world-frame point cloud.
///
/// For every sample the vehicle pose is interpolated at the sample
/// timestamp, composed with the static mount offset to get the sensor's
/// instantaneous pose, and the (angle, range) reading is converted to a
/// world point:
///
/// - the local beam offset is `(range*cos(angle), range*sin(angle), 0)` in
///   the sensor scan plane, range along the beam axis;
/// - `reversed_mount` negates the scan angle before rotation, mirroring the
///   scan plane for a sensor mounted on the opposite side of the tray;
/// - the offset is rotated by the sensor's instantaneous attitude and
///   translated by its position.
///
/// Reflectivity passes through unchanged. Zero-range samples yield a point
/// coincident with the sensor position; nothing is filtered here. Any
/// sample timestamp outside the trajectory span fails the whole sensor
/// with [`crate::ExtractError::OutOfRange`].
pub fn synthesize(
    trajectory: &Trajectory,
    samples: &[ScanSample],
    mount: &MountOffset,
    reversed_mount: bool,
) -> Result<(PositionTrack, PointCloud3D)> {
    let mut track = PositionTrack::with_capacity(samples.len());
    let mut cloud = PointCloud3D::with_capacity(samples.len());
    let mut cursor = trajectory.cursor();

    for sample in samples {
        let vehicle = cursor.pose_at(sample.timestamp)?;
        let sensor = vehicle.with_mount(mount);
        track.push(sensor.x, sensor.y, sensor.z);

        let angle = if reversed_mount {
            -sample.angle
        } else {
            sample.angle
        };
        let local_x = sample.range * angle.cos();
        let local_y = sample.range * angle.sin();
        let (dx, dy, dz) = sensor.rotate_local(local_x, local_y, 0.0);
        cloud.push(
            sensor.x + dx,
            sensor.y + dy,
            sensor.z + dz,
            sample.reflectivity,
        );
    }

    Ok((track, cloud))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Pose, TrajectorySample};
    use crate::error::ExtractError;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn straight_track() -> Trajectory {
        Trajectory::new(vec![
            TrajectorySample::new(0.0, Pose::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0)),
            TrajectorySample::new(10.0, Pose::new(10.0, 0.0, 0.0, 0.0, 0.0, 0.0)),
        ])
        .unwrap()
    }

    #[test]
    fn test_forward_beam_worked_scenario() {
        // Sensor halfway along the track at (5,0,0); a zero-angle beam of
        // range 5 lands at (10,0,0).
        let samples = [ScanSample::new(5.0, 0.0, 5.0, 120.0)];
        let (track, cloud) =
            synthesize(&straight_track(), &samples, &MountOffset::zero(), false).unwrap();
        assert_eq!(track.len(), 1);
        assert_eq!(cloud.len(), 1);
        assert_relative_eq!(track.xs[0], 5.0, epsilon = 1e-12);
        assert_relative_eq!(cloud.xs[0], 10.0, epsilon = 1e-12);
        assert_relative_eq!(cloud.ys[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(cloud.zs[0], 0.0, epsilon = 1e-12);
        assert_eq!(cloud.reflectivity[0], 120.0);
    }

    #[test]
    fn test_zero_range_point_coincides_with_sensor() {
        let samples = [ScanSample::new(2.5, 1.234, 0.0, 0.0)];
        let (track, cloud) =
            synthesize(&straight_track(), &samples, &MountOffset::zero(), false).unwrap();
        assert_relative_eq!(cloud.xs[0], track.xs[0], epsilon = 1e-12);
        assert_relative_eq!(cloud.ys[0], track.ys[0], epsilon = 1e-12);
        assert_relative_eq!(cloud.zs[0], track.zs[0], epsilon = 1e-12);
    }

    #[test]
    fn test_reversed_mount_mirrors_lateral_axis() {
        let samples = [ScanSample::new(5.0, FRAC_PI_2 / 3.0, 4.0, 0.0)];
        let track = straight_track();
        let (_, normal) = synthesize(&track, &samples, &MountOffset::zero(), false).unwrap();
        let (_, mirrored) = synthesize(&track, &samples, &MountOffset::zero(), true).unwrap();
        assert_relative_eq!(mirrored.xs[0], normal.xs[0], epsilon = 1e-12);
        assert_relative_eq!(mirrored.ys[0], -normal.ys[0], epsilon = 1e-12);
        assert_relative_eq!(mirrored.zs[0], normal.zs[0], epsilon = 1e-12);
    }

    #[test]
    fn test_mount_offset_shifts_sensor_position() {
        let mount = MountOffset::new(0.0, 1.0, 0.5, 0.0, 0.0, 0.0);
        let samples = [ScanSample::new(5.0, 0.0, 2.0, 0.0)];
        let (track, cloud) = synthesize(&straight_track(), &samples, &mount, false).unwrap();
        assert_relative_eq!(track.ys[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(track.zs[0], 0.5, epsilon = 1e-12);
        assert_relative_eq!(cloud.xs[0], 7.0, epsilon = 1e-12);
        assert_relative_eq!(cloud.ys[0], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_vehicle_yaw_rotates_beam() {
        let track = Trajectory::new(vec![
            TrajectorySample::new(0.0, Pose::new(0.0, 0.0, 0.0, 0.0, 0.0, 90.0)),
            TrajectorySample::new(1.0, Pose::new(0.0, 1.0, 0.0, 0.0, 0.0, 90.0)),
        ])
        .unwrap();
        let samples = [ScanSample::new(0.5, 0.0, 3.0, 0.0)];
        let (track_out, cloud) =
            synthesize(&track, &samples, &MountOffset::zero(), false).unwrap();
        assert_relative_eq!(track_out.ys[0], 0.5, epsilon = 1e-12);
        // Forward beam points along +y when the vehicle is yawed 90 degrees.
        assert_relative_eq!(cloud.xs[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(cloud.ys[0], 3.5, epsilon = 1e-12);
    }

    #[test]
    fn test_sample_outside_span_fails_whole_run() {
        let samples = [
            ScanSample::new(5.0, 0.0, 1.0, 0.0),
            ScanSample::new(11.0, 0.0, 1.0, 0.0),
        ];
        let err =
            synthesize(&straight_track(), &samples, &MountOffset::zero(), false).unwrap_err();
        assert!(matches!(err, ExtractError::OutOfRange { .. }));
    }

    #[test]
    fn test_empty_samples() {
        let (track, cloud) =
            synthesize(&straight_track(), &[], &MountOffset::zero(), false).unwrap();
        assert!(track.is_empty());
        assert!(cloud.is_empty());
    }
}
