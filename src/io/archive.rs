//! Archive reader interface and the JSON archive implementation.
//!
//! The pipeline only depends on the [`ScanArchive`] trait: a run exposes a
//! plot identifier, the vehicle trajectory, the per-sensor raw data and an
//! opaque metadata payload. `JsonArchive` is the bundled implementation for
//! pre-extracted runs serialized as a single JSON document.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::types::{SensorRecord, Trajectory, TrajectorySample};
use crate::error::{ExtractError, Result};

/// Interface the pipeline needs from an archive reader.
pub trait ScanArchive {
    /// Plot identifier, used to prefix output stream names.
    fn plot_id(&self) -> &str;

    /// Synchronized vehicle trajectory covering all scans.
    fn trajectory(&self) -> &Trajectory;

    /// All sensors in the run, with their mounts and raw samples.
    fn sensors(&self) -> &[SensorRecord];

    /// Run metadata, opaque to the pipeline.
    fn metadata(&self) -> &serde_json::Value;
}

#[derive(Debug, Serialize, Deserialize)]
struct ArchiveDocument {
    plot_id: String,
    #[serde(default)]
    metadata: serde_json::Value,
    trajectory: Vec<TrajectorySample>,
    sensors: Vec<SensorRecord>,
}

/// Scan archive backed by a single JSON document on disk.
#[derive(Debug)]
pub struct JsonArchive {
    plot_id: String,
    metadata: serde_json::Value,
    trajectory: Trajectory,
    sensors: Vec<SensorRecord>,
}

impl JsonArchive {
    /// Open and validate an archive file.
    pub fn open(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| ExtractError::Archive(format!("{}: {}", path.display(), e)))?;
        let doc: ArchiveDocument = serde_json::from_str(&text)
            .map_err(|e| ExtractError::Archive(format!("{}: {}", path.display(), e)))?;
        let trajectory = Trajectory::new(doc.trajectory)?;
        Ok(Self {
            plot_id: doc.plot_id,
            metadata: doc.metadata,
            trajectory,
            sensors: doc.sensors,
        })
    }
}

impl ScanArchive for JsonArchive {
    fn plot_id(&self) -> &str {
        &self.plot_id
    }

    fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    fn sensors(&self) -> &[SensorRecord] {
        &self.sensors
    }

    fn metadata(&self) -> &serde_json::Value {
        &self.metadata
    }
}

/// Write the human-readable run metadata sidecar.
pub fn write_metadata_sidecar(path: &Path, metadata: &serde_json::Value) -> Result<()> {
    let text = serde_json::to_string_pretty(metadata)?;
    fs::write(path, text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_open_minimal_archive() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            br#"{
                "plot_id": "567001_1",
                "metadata": {"session": "april"},
                "trajectory": [
                    {"t": 0.0, "x": 0.0, "y": 0.0, "z": 0.0, "roll": 0.0, "pitch": 0.0, "yaw": 0.0},
                    {"t": 1.0, "x": 1.0, "y": 0.0, "z": 0.0, "roll": 0.0, "pitch": 0.0, "yaw": 0.0}
                ],
                "sensors": [
                    {
                        "id": "lms_1",
                        "mount": {"x": 0.0, "y": 0.0, "z": 0.0, "roll": 0.0, "pitch": 0.0, "yaw": 0.0},
                        "samples": [{"timestamp": 0.5, "angle": 0.0, "range": 2.0, "reflectivity": 10.0}]
                    }
                ]
            }"#,
        )
        .unwrap();

        let archive = JsonArchive::open(file.path()).unwrap();
        assert_eq!(archive.plot_id(), "567001_1");
        assert_eq!(archive.sensors().len(), 1);
        assert_eq!(archive.trajectory().end_time(), 1.0);
        assert_eq!(archive.metadata()["session"], "april");
    }

    #[test]
    fn test_open_reports_source_on_parse_failure() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"not json").unwrap();
        let err = JsonArchive::open(file.path()).unwrap_err();
        match err {
            ExtractError::Archive(msg) => {
                assert!(msg.contains(file.path().to_str().unwrap()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_metadata_sidecar_roundtrip() {
        let file = NamedTempFile::new().unwrap();
        let metadata = serde_json::json!({"plot": {"id": "567001_1"}, "sensors": 3});
        write_metadata_sidecar(file.path(), &metadata).unwrap();
        let read_back: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(file.path()).unwrap()).unwrap();
        assert_eq!(read_back, metadata);
    }
}
