//! Vehicle pose and static sensor mount offsets.

use nalgebra::{Rotation3, Vector3};
use serde::{Deserialize, Serialize};

use crate::core::math::normalize_angle_deg;

/// Vehicle pose: position in meters, attitude in degrees.
///
/// Right-handed convention, attitude applied as fixed-axis yaw, then pitch,
/// then roll. Immutable once read from the trajectory; new poses are only
/// produced by interpolation or mount composition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// X position in meters
    pub x: f64,
    /// Y position in meters
    pub y: f64,
    /// Z position in meters
    pub z: f64,
    /// Roll in degrees
    pub roll: f64,
    /// Pitch in degrees
    pub pitch: f64,
    /// Yaw in degrees
    pub yaw: f64,
}

impl Pose {
    /// Create a new pose.
    pub fn new(x: f64, y: f64, z: f64, roll: f64, pitch: f64, yaw: f64) -> Self {
        Self {
            x,
            y,
            z,
            roll,
            pitch,
            yaw,
        }
    }

    /// Pose at the origin with zero attitude.
    pub fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0)
    }

    /// Rotation matrix for this attitude: Rz(yaw) * Ry(pitch) * Rx(roll).
    pub fn rotation(&self) -> Rotation3<f64> {
        Rotation3::from_euler_angles(
            self.roll.to_radians(),
            self.pitch.to_radians(),
            self.yaw.to_radians(),
        )
    }

    /// Rotate a local-frame offset into this pose's parent frame.
    pub fn rotate_local(&self, x: f64, y: f64, z: f64) -> (f64, f64, f64) {
        let v = self.rotation() * Vector3::new(x, y, z);
        (v.x, v.y, v.z)
    }

    /// Compose this pose with a static mount offset.
    ///
    /// The offset translation is rotated by this pose's attitude and the
    /// attitude angles are summed component-wise, yielding the mounted
    /// sensor's instantaneous pose in this pose's parent frame.
    pub fn with_mount(&self, mount: &MountOffset) -> Pose {
        let (mx, my, mz) = self.rotate_local(mount.x, mount.y, mount.z);
        Pose::new(
            self.x + mx,
            self.y + my,
            self.z + mz,
            normalize_angle_deg(self.roll + mount.roll),
            normalize_angle_deg(self.pitch + mount.pitch),
            normalize_angle_deg(self.yaw + mount.yaw),
        )
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

/// Static rigid offset of a sensor relative to the vehicle reference frame.
///
/// Same shape as [`Pose`] but never time-varying: read once from the
/// archive's static frame chain and only consumed to derive transforms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MountOffset {
    /// X offset in meters
    pub x: f64,
    /// Y offset in meters
    pub y: f64,
    /// Z offset in meters
    pub z: f64,
    /// Roll offset in degrees
    pub roll: f64,
    /// Pitch offset in degrees
    pub pitch: f64,
    /// Yaw offset in degrees
    pub yaw: f64,
}

impl MountOffset {
    /// Create a new mount offset.
    pub fn new(x: f64, y: f64, z: f64, roll: f64, pitch: f64, yaw: f64) -> Self {
        Self {
            x,
            y,
            z,
            roll,
            pitch,
            yaw,
        }
    }

    /// Zero offset (sensor coincident with the reference frame).
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0)
    }
}

impl Default for MountOffset {
    fn default() -> Self {
        Self::zero()
    }
}
