//! Foundation layer: geometric types, transforms and angular math.

pub mod math;
pub mod transform;
pub mod types;
