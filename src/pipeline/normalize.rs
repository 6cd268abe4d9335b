//! Fixed-precision rounding of exported metric values.
//!
//! All metric coordinates are rounded to a fixed decimal precision just
//! before export, after every geometric composition, so rounding error can
//! never feed back into a transform. Two runs on identical input produce
//! byte-identical output.

use crate::core::types::{PointCloud3D, PositionTrack};

/// Decimal places kept in exported metric values.
pub const EXPORT_DECIMALS: u32 = 6;

/// Round one value to `decimals` places, half away from zero.
///
/// Matches `f64::round` tie behavior: 1.2345005 at 6 decimals resolves to
/// 1.234501 (up for positive values, down for negative), every run.
#[inline]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

/// Round a slice in place.
pub fn round_slice(values: &mut [f64], decimals: u32) {
    for v in values.iter_mut() {
        *v = round_to(*v, decimals);
    }
}

/// Round a position track's coordinates.
pub fn normalize_track(track: &mut PositionTrack, decimals: u32) {
    round_slice(&mut track.xs, decimals);
    round_slice(&mut track.ys, decimals);
    round_slice(&mut track.zs, decimals);
}

/// Round a point cloud's coordinates. Reflectivity is not a metric value
/// and is left untouched.
pub fn normalize_cloud(cloud: &mut PointCloud3D, decimals: u32) {
    round_slice(&mut cloud.xs, decimals);
    round_slice(&mut cloud.ys, decimals);
    round_slice(&mut cloud.zs, decimals);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_six_decimals() {
        assert_eq!(round_to(1.23456789, 6), 1.234568);
        assert_eq!(round_to(-1.23456749, 6), -1.234567);
        assert_eq!(round_to(0.0, 6), 0.0);
    }

    #[test]
    fn test_rounding_is_stable() {
        let v = 3.14159265358979;
        let once = round_to(v, 6);
        let twice = round_to(once, 6);
        assert_eq!(once.to_bits(), twice.to_bits());
    }

    #[test]
    fn test_half_away_from_zero_at_boundary() {
        assert_eq!(round_to(1.2345005, 6), 1.234501);
        assert_eq!(round_to(-1.2345005, 6), -1.234501);
    }

    #[test]
    fn test_reflectivity_untouched() {
        let mut cloud = PointCloud3D::new();
        cloud.push(1.00000049, 2.0, 3.0, 187.123456789);
        normalize_cloud(&mut cloud, 6);
        assert_eq!(cloud.xs[0], 1.0);
        assert_eq!(cloud.reflectivity[0], 187.123456789);
    }

    #[test]
    fn test_track_rounding() {
        let mut track = PositionTrack::new();
        track.push(0.1234564, 0.1234566, -0.9999995);
        normalize_track(&mut track, 6);
        assert_eq!(track.xs[0], 0.123456);
        assert_eq!(track.ys[0], 0.123457);
        assert_eq!(track.zs[0], -1.0);
    }
}
