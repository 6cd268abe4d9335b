//! Angular arithmetic in the degree domain.
//!
//! Trajectory attitudes are recorded in degrees, so normalization and
//! shortest-arc interpolation operate on degrees directly.

/// Normalize an angle to [-180, 180] degrees.
#[inline]
pub fn normalize_angle_deg(angle: f64) -> f64 {
    let mut a = angle % 360.0;
    if a > 180.0 {
        a -= 360.0;
    } else if a < -180.0 {
        a += 360.0;
    }
    a
}

/// Shortest signed angular difference from `a` to `b`, in degrees.
#[inline]
pub fn angle_diff_deg(a: f64, b: f64) -> f64 {
    normalize_angle_deg(b - a)
}

/// Interpolate between two angles along the shortest arc.
///
/// `t` is in [0, 1] where 0 returns `a` and 1 returns `b`. Crossing the
/// -180/180 boundary takes the short way around, never the long one.
#[inline]
pub fn angle_lerp_deg(a: f64, b: f64, t: f64) -> f64 {
    normalize_angle_deg(a + angle_diff_deg(a, b) * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_normalize_zero() {
        assert_relative_eq!(normalize_angle_deg(0.0), 0.0);
    }

    #[test]
    fn test_normalize_wraps_positive() {
        assert_relative_eq!(normalize_angle_deg(360.0), 0.0);
        assert_relative_eq!(normalize_angle_deg(540.0), 180.0);
        assert_relative_eq!(normalize_angle_deg(190.0), -170.0);
    }

    #[test]
    fn test_normalize_wraps_negative() {
        assert_relative_eq!(normalize_angle_deg(-360.0), 0.0);
        assert_relative_eq!(normalize_angle_deg(-190.0), 170.0);
    }

    #[test]
    fn test_angle_diff_crossing_boundary() {
        assert_relative_eq!(angle_diff_deg(179.0, -179.0), 2.0, epsilon = 1e-9);
        assert_relative_eq!(angle_diff_deg(-179.0, 179.0), -2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_angle_lerp_simple() {
        assert_relative_eq!(angle_lerp_deg(0.0, 90.0, 0.0), 0.0);
        assert_relative_eq!(angle_lerp_deg(0.0, 90.0, 1.0), 90.0);
        assert_relative_eq!(angle_lerp_deg(0.0, 90.0, 0.5), 45.0);
    }

    #[test]
    fn test_angle_lerp_wraparound() {
        // 179 and -179 are only 2 degrees apart; the midpoint is the
        // boundary itself, never ~0.
        let mid = angle_lerp_deg(179.0, -179.0, 0.5);
        assert_relative_eq!(mid.abs(), 180.0, epsilon = 1e-9);

        let quarter = angle_lerp_deg(179.0, -179.0, 0.25);
        assert_relative_eq!(quarter, 179.5, epsilon = 1e-9);
    }
}
