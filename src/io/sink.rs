//! Output sinks for position tracks and point clouds.
//!
//! The pipeline hands each sink a named stream of fixed-width numeric
//! records: 3 fields for a position track, 4 for a point cloud with
//! reflectivity. Point order is preserved exactly, so two runs on the same
//! input diff line-for-line (or byte-for-byte).

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::core::types::{PointCloud3D, PositionTrack};
use crate::error::Result;

/// Destination for the pipeline's numeric record streams.
pub trait OutputSink {
    /// Write a named 3-field position stream.
    fn write_positions(&mut self, name: &str, track: &PositionTrack) -> Result<()>;

    /// Write a named 4-field point stream with reflectivity.
    fn write_points(&mut self, name: &str, cloud: &PointCloud3D) -> Result<()>;
}

/// Sink writing space-separated text columns, one `<name>.xyz` per stream.
pub struct XyzSink {
    directory: PathBuf,
}

impl XyzSink {
    /// Create a sink writing into `directory`.
    pub fn new(directory: impl AsRef<Path>) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
        }
    }

    fn create(&self, name: &str) -> Result<BufWriter<File>> {
        let path = self.directory.join(format!("{}.xyz", name));
        log::debug!("Writing {}", path.display());
        Ok(BufWriter::new(File::create(path)?))
    }
}

impl OutputSink for XyzSink {
    fn write_positions(&mut self, name: &str, track: &PositionTrack) -> Result<()> {
        let mut writer = self.create(name)?;
        writeln!(writer, "lidar_x lidar_y lidar_z")?;
        for i in 0..track.len() {
            writeln!(writer, "{} {} {}", track.xs[i], track.ys[i], track.zs[i])?;
        }
        writer.flush()?;
        Ok(())
    }

    fn write_points(&mut self, name: &str, cloud: &PointCloud3D) -> Result<()> {
        let mut writer = self.create(name)?;
        writeln!(writer, "pt_x pt_y pt_z reflectivity")?;
        for i in 0..cloud.len() {
            writeln!(
                writer,
                "{} {} {} {}",
                cloud.xs[i], cloud.ys[i], cloud.zs[i], cloud.reflectivity[i]
            )?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Sink writing minimal LAS 1.2 files (point data format 0), one
/// `<name>.las` per stream.
///
/// Coordinates are stored as scaled integers with a 1e-6 scale factor,
/// matching the export rounding precision, offset at the per-axis minimum.
pub struct LasSink {
    directory: PathBuf,
}

const LAS_HEADER_SIZE: u16 = 227;
const LAS_POINT_RECORD_LEN: u16 = 20;
const LAS_SCALE: f64 = 1e-6;

impl LasSink {
    /// Create a sink writing into `directory`.
    pub fn new(directory: impl AsRef<Path>) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
        }
    }

    fn write_las(
        &self,
        name: &str,
        xs: &[f64],
        ys: &[f64],
        zs: &[f64],
        intensity: Option<&[f64]>,
    ) -> Result<()> {
        let path = self.directory.join(format!("{}.las", name));
        log::debug!("Writing {}", path.display());
        let mut writer = BufWriter::new(File::create(path)?);

        let (min_x, max_x) = bounds(xs);
        let (min_y, max_y) = bounds(ys);
        let (min_z, max_z) = bounds(zs);
        let count = xs.len() as u32;

        // Public header block, LAS 1.2, 227 bytes.
        writer.write_all(b"LASF")?;
        writer.write_all(&0u16.to_le_bytes())?; // file source id
        writer.write_all(&0u16.to_le_bytes())?; // global encoding
        writer.write_all(&[0u8; 16])?; // project GUID
        writer.write_all(&[1u8, 2u8])?; // version 1.2
        writer.write_all(&padded::<32>(b"OTHER"))?; // system identifier
        writer.write_all(&padded::<32>(b"lidar-extract"))?; // generating software
        writer.write_all(&0u16.to_le_bytes())?; // creation day of year
        writer.write_all(&0u16.to_le_bytes())?; // creation year
        writer.write_all(&LAS_HEADER_SIZE.to_le_bytes())?;
        writer.write_all(&(LAS_HEADER_SIZE as u32).to_le_bytes())?; // point data offset
        writer.write_all(&0u32.to_le_bytes())?; // number of VLRs
        writer.write_all(&[0u8])?; // point data format 0
        writer.write_all(&LAS_POINT_RECORD_LEN.to_le_bytes())?;
        writer.write_all(&count.to_le_bytes())?;
        writer.write_all(&count.to_le_bytes())?; // points by return, first return
        for _ in 0..4 {
            writer.write_all(&0u32.to_le_bytes())?;
        }
        for scale in [LAS_SCALE; 3] {
            writer.write_all(&scale.to_le_bytes())?;
        }
        for offset in [min_x, min_y, min_z] {
            writer.write_all(&offset.to_le_bytes())?;
        }
        for value in [max_x, min_x, max_y, min_y, max_z, min_z] {
            writer.write_all(&value.to_le_bytes())?;
        }

        // Point records, format 0, 20 bytes each.
        for i in 0..xs.len() {
            let ix = (((xs[i] - min_x) / LAS_SCALE).round()) as i32;
            let iy = (((ys[i] - min_y) / LAS_SCALE).round()) as i32;
            let iz = (((zs[i] - min_z) / LAS_SCALE).round()) as i32;
            let intensity_value = intensity
                .map(|values| values[i].round().clamp(0.0, u16::MAX as f64) as u16)
                .unwrap_or(0);
            writer.write_all(&ix.to_le_bytes())?;
            writer.write_all(&iy.to_le_bytes())?;
            writer.write_all(&iz.to_le_bytes())?;
            writer.write_all(&intensity_value.to_le_bytes())?;
            writer.write_all(&[0x09u8])?; // return 1 of 1
            writer.write_all(&[0u8])?; // classification: created, never classified
            writer.write_all(&[0u8])?; // scan angle rank
            writer.write_all(&[0u8])?; // user data
            writer.write_all(&0u16.to_le_bytes())?; // point source id
        }

        writer.flush()?;
        Ok(())
    }
}

impl OutputSink for LasSink {
    fn write_positions(&mut self, name: &str, track: &PositionTrack) -> Result<()> {
        self.write_las(name, &track.xs, &track.ys, &track.zs, None)
    }

    fn write_points(&mut self, name: &str, cloud: &PointCloud3D) -> Result<()> {
        self.write_las(
            name,
            &cloud.xs,
            &cloud.ys,
            &cloud.zs,
            Some(&cloud.reflectivity),
        )
    }
}

fn bounds(values: &[f64]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        min = min.min(v);
        max = max.max(v);
    }
    if values.is_empty() {
        (0.0, 0.0)
    } else {
        (min, max)
    }
}

fn padded<const N: usize>(text: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out[..text.len()].copy_from_slice(text);
    out
}
