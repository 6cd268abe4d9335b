//! Run configuration for the extraction pipeline.
//!
//! Every option is an explicit, typed field with a default; nothing is
//! passed through string-keyed option maps.

use std::path::PathBuf;

use clap::ValueEnum;

use crate::error::{ExtractError, Result};
use crate::pipeline::normalize::EXPORT_DECIMALS;

/// Point cloud output container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Binary LAS 1.2 point cloud container
    Las,
    /// Space-separated text columns
    Xyz,
}

impl OutputFormat {
    /// Parse a format name, failing with `InvalidConfiguration` for
    /// anything other than `las` or `xyz`.
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "las" => Ok(OutputFormat::Las),
            "xyz" => Ok(OutputFormat::Xyz),
            other => Err(ExtractError::InvalidConfiguration(format!(
                "output format '{}' is not valid (must be 'las' or 'xyz')",
                other
            ))),
        }
    }

    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Las => "las",
            OutputFormat::Xyz => "xyz",
        }
    }
}

/// Configuration values consumed by the pipeline (already parsed and
/// validated by the CLI layer).
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    /// Merge secondary sensors into the reference sensor's frame
    pub merge: bool,
    /// Apply the reversed-mount correction to the third sensor
    pub reversed_mount: bool,
    /// Output container format
    pub output_format: OutputFormat,
    /// Decimal places for exported metric values
    pub decimals: u32,
    /// Pre-supplied sensor-2-to-1 calibration matrix, if any.
    /// When absent the transform is derived from the static mounts.
    pub mat2to1: Option<PathBuf>,
    /// Pre-supplied sensor-3-to-1 calibration matrix, if any.
    pub mat3to1: Option<PathBuf>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            merge: false,
            reversed_mount: false,
            output_format: OutputFormat::Las,
            decimals: EXPORT_DECIMALS,
            mat2to1: None,
            mat3to1: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_formats() {
        assert_eq!(OutputFormat::parse("las").unwrap(), OutputFormat::Las);
        assert_eq!(OutputFormat::parse("xyz").unwrap(), OutputFormat::Xyz);
    }

    #[test]
    fn test_parse_unknown_format_fails() {
        let err = OutputFormat::parse("ply").unwrap_err();
        assert!(matches!(err, ExtractError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_defaults() {
        let config = ExtractionConfig::default();
        assert!(!config.merge);
        assert_eq!(config.output_format, OutputFormat::Las);
        assert_eq!(config.decimals, 6);
    }
}
