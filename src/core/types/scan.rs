//! Scan samples, point clouds and sensor records.

use serde::{Deserialize, Serialize};

use super::pose::MountOffset;

/// One raw range reading from a scanning sensor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanSample {
    /// Timestamp in seconds, synchronized with the vehicle trajectory
    pub timestamp: f64,
    /// Beam angle in the sensor scan plane, radians
    pub angle: f64,
    /// Measured range along the beam, meters
    pub range: f64,
    /// Reflectivity in sensor units, carried through unmodified
    #[serde(default)]
    pub reflectivity: f64,
}

impl ScanSample {
    /// Create a new scan sample.
    pub fn new(timestamp: f64, angle: f64, range: f64, reflectivity: f64) -> Self {
        Self {
            timestamp,
            angle,
            range,
            reflectivity,
        }
    }
}

/// Synthesized 3D point cloud in a single reference frame.
///
/// Parallel-array (SoA) layout: `xs`, `ys`, `zs` and `reflectivity` always
/// have the same length, in scan order. The frame identity is tracked by
/// the caller, not embedded per point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointCloud3D {
    /// X coordinates in meters
    pub xs: Vec<f64>,
    /// Y coordinates in meters
    pub ys: Vec<f64>,
    /// Z coordinates in meters
    pub zs: Vec<f64>,
    /// Per-point reflectivity, same length as the coordinate arrays
    pub reflectivity: Vec<f64>,
}

impl PointCloud3D {
    /// Create an empty cloud.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty cloud with reserved capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            xs: Vec::with_capacity(capacity),
            ys: Vec::with_capacity(capacity),
            zs: Vec::with_capacity(capacity),
            reflectivity: Vec::with_capacity(capacity),
        }
    }

    /// Append one point.
    #[inline]
    pub fn push(&mut self, x: f64, y: f64, z: f64, reflectivity: f64) {
        self.xs.push(x);
        self.ys.push(y);
        self.zs.push(z);
        self.reflectivity.push(reflectivity);
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// True if the cloud holds no points.
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }
}

/// Sensor position at each scan sample, in scan order.
///
/// Distinct from [`PointCloud3D`]: the track records where the sensor was,
/// not what its beam hit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionTrack {
    /// X coordinates in meters
    pub xs: Vec<f64>,
    /// Y coordinates in meters
    pub ys: Vec<f64>,
    /// Z coordinates in meters
    pub zs: Vec<f64>,
}

impl PositionTrack {
    /// Create an empty track.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty track with reserved capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            xs: Vec::with_capacity(capacity),
            ys: Vec::with_capacity(capacity),
            zs: Vec::with_capacity(capacity),
        }
    }

    /// Append one position.
    #[inline]
    pub fn push(&mut self, x: f64, y: f64, z: f64) {
        self.xs.push(x);
        self.ys.push(y);
        self.zs.push(z);
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// True if the track holds no positions.
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }
}

/// Identity of a scanning sensor on the rig.
///
/// `Lms1` is the reference sensor other sensors are merged into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorId {
    /// Reference sensor
    #[serde(rename = "lms_1")]
    Lms1,
    /// Second sensor, same head as the reference
    #[serde(rename = "lms_2")]
    Lms2,
    /// Third sensor, mounted on the auxiliary head
    #[serde(rename = "lms_3")]
    Lms3,
}

impl SensorId {
    /// Stable label used in output stream names.
    pub fn label(&self) -> &'static str {
        match self {
            SensorId::Lms1 => "lms_1",
            SensorId::Lms2 => "lms_2",
            SensorId::Lms3 => "lms_3",
        }
    }

    /// True for the sensor whose frame is the merge target.
    pub fn is_reference(&self) -> bool {
        matches!(self, SensorId::Lms1)
    }
}

impl std::fmt::Display for SensorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One sensor's raw data as provided by the archive reader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorRecord {
    /// Which sensor this is
    pub id: SensorId,
    /// Static mount offset relative to the vehicle reference frame
    pub mount: MountOffset,
    /// Raw scan samples in time order
    pub samples: Vec<ScanSample>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cloud_push_keeps_arrays_parallel() {
        let mut cloud = PointCloud3D::new();
        cloud.push(1.0, 2.0, 3.0, 42.0);
        cloud.push(4.0, 5.0, 6.0, 7.0);
        assert_eq!(cloud.len(), 2);
        assert_eq!(cloud.xs.len(), cloud.reflectivity.len());
        assert_eq!(cloud.reflectivity[0], 42.0);
    }

    #[test]
    fn test_sensor_labels() {
        assert_eq!(SensorId::Lms1.label(), "lms_1");
        assert_eq!(SensorId::Lms3.label(), "lms_3");
        assert!(SensorId::Lms1.is_reference());
        assert!(!SensorId::Lms2.is_reference());
    }

    #[test]
    fn test_sensor_id_serde_labels() {
        let id: SensorId = serde_json::from_str("\"lms_2\"").unwrap();
        assert_eq!(id, SensorId::Lms2);
        assert_eq!(serde_json::to_string(&SensorId::Lms3).unwrap(), "\"lms_3\"");
    }
}
