//! Error types for lidar extraction.

use std::path::PathBuf;

/// Result type alias
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Extraction error types
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// A trajectory query fell outside the recorded span.
    ///
    /// Extrapolating the vehicle pose would fabricate geometry, so this
    /// aborts processing for the affected sensor.
    #[error("timestamp {t} outside trajectory span [{first}, {last}]")]
    OutOfRange {
        /// Queried timestamp in seconds
        t: f64,
        /// First recorded timestamp
        first: f64,
        /// Last recorded timestamp
        last: f64,
    },

    /// A supplied calibration matrix is not 4x4.
    #[error("calibration matrix {}: {detail}", .path.display())]
    MalformedCalibration {
        /// Path of the calibration artifact
        path: PathBuf,
        /// What was wrong with it
        detail: String,
    },

    /// An unsupported configuration value was supplied.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The trajectory track itself is unusable (empty or non-monotonic).
    #[error("invalid trajectory: {0}")]
    Trajectory(String),

    /// Archive ingestion failure, with the source identifier.
    #[error("archive error: {0}")]
    Archive(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for ExtractError {
    fn from(e: serde_json::Error) -> Self {
        ExtractError::Archive(e.to_string())
    }
}
