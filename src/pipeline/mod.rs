//! Per-sensor extraction pipeline.
//!
//! Orchestrates the stages in dependency order: synthesis from the shared
//! trajectory, optional merge into the reference sensor's frame, fixed
//! precision normalization, then export. Sensors have no data dependency on
//! each other beyond the read-only trajectory and transforms, so they are
//! processed in sequence with identical results to any parallel schedule.

pub mod merge;
pub mod normalize;
pub mod synthesizer;

use crate::config::ExtractionConfig;
use crate::core::transform::RigidTransform;
use crate::core::types::{MountOffset, SensorId};
use crate::error::{ExtractError, Result};
use crate::io::{calibration, OutputSink, ScanArchive};

pub use merge::merge_into_frame;
pub use synthesizer::synthesize;

/// Run the full extraction for every sensor in the archive.
///
/// A geometric failure in one sensor (for example a scan timestamp outside
/// the trajectory span) aborts the run; no degraded partial output is
/// produced for that sensor. Calibration matrices are resolved up front so
/// a malformed artifact fails before any processing starts.
pub fn run_extraction(
    archive: &dyn ScanArchive,
    config: &ExtractionConfig,
    sink: &mut dyn OutputSink,
) -> Result<()> {
    let transforms = if config.merge {
        Some(resolve_transforms(archive, config)?)
    } else {
        None
    };

    let prefix = format!("uplot_{}_", archive.plot_id());
    for sensor in archive.sensors() {
        log::info!("Computing '{}' positions and point cloud...", sensor.id);
        let reversed = config.reversed_mount && sensor.id == SensorId::Lms3;
        let (mut track, mut cloud) = synthesize(
            archive.trajectory(),
            &sensor.samples,
            &sensor.mount,
            reversed,
        )?;

        if let Some(transforms) = &transforms {
            if let Some(transform) = transforms.for_sensor(sensor.id) {
                log::info!("Merging '{}' into the reference sensor frame...", sensor.id);
                merge_into_frame(transform, &mut track, &mut cloud);
            }
        }

        normalize::normalize_track(&mut track, config.decimals);
        normalize::normalize_cloud(&mut cloud, config.decimals);

        log::info!("Exporting '{}' positions and point cloud...", sensor.id);
        sink.write_positions(&format!("{}{}_pos", prefix, sensor.id.label()), &track)?;
        sink.write_points(
            &format!("{}{}_point_cloud", prefix, sensor.id.label()),
            &cloud,
        )?;
    }

    Ok(())
}

/// Cross-sensor alignment transforms for a merged run.
///
/// A transform is only resolved for sensors actually present in the
/// archive.
#[derive(Debug, Default)]
pub struct MergeTransforms {
    mat2to1: Option<RigidTransform>,
    mat3to1: Option<RigidTransform>,
}

impl MergeTransforms {
    /// Transform for a non-reference sensor, `None` for the reference.
    pub fn for_sensor(&self, id: SensorId) -> Option<&RigidTransform> {
        match id {
            SensorId::Lms1 => None,
            SensorId::Lms2 => self.mat2to1.as_ref(),
            SensorId::Lms3 => self.mat3to1.as_ref(),
        }
    }
}

/// Resolve the merge transforms: an explicitly supplied calibration file
/// wins and is never silently replaced; otherwise the transform is derived
/// from the static mount offsets.
fn resolve_transforms(
    archive: &dyn ScanArchive,
    config: &ExtractionConfig,
) -> Result<MergeTransforms> {
    let mut transforms = MergeTransforms::default();
    let present = |id| archive.sensors().iter().any(|sensor| sensor.id == id);

    if present(SensorId::Lms2) {
        transforms.mat2to1 = Some(match &config.mat2to1 {
            Some(path) => calibration::load_transform(path)?,
            None => {
                log::info!("Deriving transformation matrix 2 to 1 from mount offsets");
                RigidTransform::from_mount_offsets(
                    mount_of(archive, SensorId::Lms1)?,
                    mount_of(archive, SensorId::Lms2)?,
                )
            }
        });
    }
    if present(SensorId::Lms3) {
        transforms.mat3to1 = Some(match &config.mat3to1 {
            Some(path) => calibration::load_transform(path)?,
            None => {
                log::info!("Deriving transformation matrix 3 to 1 from mount offsets");
                RigidTransform::from_mount_offsets(
                    mount_of(archive, SensorId::Lms1)?,
                    mount_of(archive, SensorId::Lms3)?,
                )
            }
        });
    }
    Ok(transforms)
}

fn mount_of(archive: &dyn ScanArchive, id: SensorId) -> Result<&MountOffset> {
    archive
        .sensors()
        .iter()
        .find(|sensor| sensor.id == id)
        .map(|sensor| &sensor.mount)
        .ok_or_else(|| {
            ExtractError::Archive(format!("sensor '{}' required for merge is missing", id))
        })
}
