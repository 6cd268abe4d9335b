//! Infrastructure layer: archives, calibration artifacts and output sinks.

pub mod archive;
pub mod calibration;
pub mod sink;

pub use archive::{JsonArchive, ScanArchive};
pub use sink::{LasSink, OutputSink, XyzSink};
