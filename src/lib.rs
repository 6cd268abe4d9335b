//! lidar-extract - georeferenced point cloud extraction for vehicle rigs
//!
//! Converts raw multi-sensor range-scan records captured by a moving
//! vehicle-mounted rig into georeferenced 3D point clouds and per-sensor
//! position tracks.
//!
//! # Architecture
//!
//! The crate is organized into 3 logical layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                      io/                            │  ← Infrastructure
//! │          (archive, calibration, sinks)              │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                   pipeline/                         │  ← Orchestration
//! │        (synthesize, merge, normalize, run)          │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                     core/                           │  ← Foundation
//! │             (types, transforms, math)               │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Pipeline
//!
//! Per sensor: the vehicle trajectory is interpolated at each scan sample's
//! timestamp, the sample's polar reading is converted to a world-frame
//! point, secondary sensors are optionally re-expressed in the reference
//! sensor's frame via a rigid transform, all metric values are rounded to a
//! fixed 6-decimal precision, and the result is exported as LAS or XYZ.

pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod pipeline;

pub use config::{ExtractionConfig, OutputFormat};
pub use core::transform::RigidTransform;
pub use core::types::{
    MountOffset, PointCloud3D, Pose, PositionTrack, ScanSample, SensorId, SensorRecord,
    Trajectory, TrajectoryCursor, TrajectorySample,
};
pub use error::{ExtractError, Result};
pub use io::{JsonArchive, LasSink, OutputSink, ScanArchive, XyzSink};
pub use pipeline::run_extraction;
