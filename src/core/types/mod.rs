//! Core data types shared across the pipeline.

mod pose;
mod scan;
mod trajectory;

pub use pose::{MountOffset, Pose};
pub use scan::{PointCloud3D, PositionTrack, ScanSample, SensorId, SensorRecord};
pub use trajectory::{Trajectory, TrajectoryCursor, TrajectorySample};
