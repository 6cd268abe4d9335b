//! Rigid-body transforms between sensor reference frames.

use std::path::Path;

use nalgebra::{Matrix4, Rotation3, Vector3};

use super::types::MountOffset;
use crate::error::{ExtractError, Result};

/// 4x4 homogeneous rigid transform: "frame B expressed in frame A".
///
/// Built either algebraically from static mount offsets or loaded verbatim
/// from a calibration artifact. Composable and invertible; applying the
/// identity is an exact no-op.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidTransform {
    matrix: Matrix4<f64>,
}

impl RigidTransform {
    /// The identity transform.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Build from a translation and yaw/pitch/roll angles in radians.
    ///
    /// Rotation composition is fixed-axis Rz(yaw) * Ry(pitch) * Rx(roll).
    pub fn build(dx: f64, dy: f64, dz: f64, yaw: f64, pitch: f64, roll: f64) -> Self {
        let rotation = Rotation3::from_euler_angles(roll, pitch, yaw);
        let mut matrix = Matrix4::identity();
        matrix
            .fixed_view_mut::<3, 3>(0, 0)
            .copy_from(rotation.matrix());
        matrix[(0, 3)] = dx;
        matrix[(1, 3)] = dy;
        matrix[(2, 3)] = dz;
        Self { matrix }
    }

    /// Derive the transform mapping `other`'s frame into `reference`'s frame
    /// from their static mount offsets.
    ///
    /// The mount deltas use a Z convention opposite to the export frame, so
    /// the Z delta and all three angle deltas are negated (and the angles
    /// converted from degrees to radians) before building the matrix. This
    /// sign flip must match the rig's calibration exactly.
    pub fn from_mount_offsets(reference: &MountOffset, other: &MountOffset) -> Self {
        let dx = other.x - reference.x;
        let dy = other.y - reference.y;
        let dz = -(other.z - reference.z);
        let yaw = -(other.yaw - reference.yaw).to_radians();
        let pitch = -(other.pitch - reference.pitch).to_radians();
        let roll = -(other.roll - reference.roll).to_radians();
        Self::build(dx, dy, dz, yaw, pitch, roll)
    }

    /// Build from row-major rows, validating the exact 4x4 shape.
    ///
    /// `source` names the calibration artifact for the error message.
    pub fn from_rows(rows: &[Vec<f64>], source: &Path) -> Result<Self> {
        if rows.len() != 4 || rows.iter().any(|row| row.len() != 4) {
            let shape = match rows.first() {
                Some(row) => format!("{}x{}", rows.len(), row.len()),
                None => "0x0".to_string(),
            };
            return Err(ExtractError::MalformedCalibration {
                path: source.to_path_buf(),
                detail: format!("expected a 4x4 matrix, got {}", shape),
            });
        }
        let mut matrix = Matrix4::zeros();
        for (i, row) in rows.iter().enumerate() {
            for (j, value) in row.iter().enumerate() {
                matrix[(i, j)] = *value;
            }
        }
        Ok(Self { matrix })
    }

    /// Compose two transforms: the result applies `other` first, then `self`.
    pub fn compose(&self, other: &RigidTransform) -> RigidTransform {
        RigidTransform {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Rigid inverse: transposed rotation, negated rotated translation.
    pub fn inverse(&self) -> RigidTransform {
        let rotation = self.matrix.fixed_view::<3, 3>(0, 0).transpose();
        let translation = Vector3::new(self.matrix[(0, 3)], self.matrix[(1, 3)], self.matrix[(2, 3)]);
        let inverted = -(rotation * translation);
        let mut matrix = Matrix4::identity();
        matrix.fixed_view_mut::<3, 3>(0, 0).copy_from(&rotation);
        matrix[(0, 3)] = inverted.x;
        matrix[(1, 3)] = inverted.y;
        matrix[(2, 3)] = inverted.z;
        RigidTransform { matrix }
    }

    /// Transform parallel coordinate arrays.
    ///
    /// The three slices must have equal length; empty input yields empty
    /// output.
    pub fn apply(&self, xs: &[f64], ys: &[f64], zs: &[f64]) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        debug_assert_eq!(xs.len(), ys.len());
        debug_assert_eq!(xs.len(), zs.len());
        let m = &self.matrix;
        let mut out_x = Vec::with_capacity(xs.len());
        let mut out_y = Vec::with_capacity(xs.len());
        let mut out_z = Vec::with_capacity(xs.len());
        for i in 0..xs.len() {
            let (x, y, z) = (xs[i], ys[i], zs[i]);
            out_x.push(m[(0, 0)] * x + m[(0, 1)] * y + m[(0, 2)] * z + m[(0, 3)]);
            out_y.push(m[(1, 0)] * x + m[(1, 1)] * y + m[(1, 2)] * z + m[(1, 3)]);
            out_z.push(m[(2, 0)] * x + m[(2, 1)] * y + m[(2, 2)] * z + m[(2, 3)]);
        }
        (out_x, out_y, out_z)
    }

    /// The underlying homogeneous matrix.
    pub fn matrix(&self) -> &Matrix4<f64> {
        &self.matrix
    }
}

impl Default for RigidTransform {
    fn default() -> Self {
        Self::identity()
    }
}
