//! Loading calibration matrices from text artifacts.

use std::fs;
use std::path::Path;

use crate::core::transform::RigidTransform;
use crate::error::{ExtractError, Result};

/// Load a 4x4 transformation matrix from a whitespace-separated text file.
///
/// Blank lines and `#` comment lines are skipped. Anything that does not
/// parse as exactly four rows of four floats fails with
/// [`ExtractError::MalformedCalibration`]; an explicitly supplied matrix is
/// never silently replaced by a derived one.
pub fn load_transform(path: &Path) -> Result<RigidTransform> {
    let text = fs::read_to_string(path)?;
    let mut rows = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let row: Vec<f64> = line
            .split_whitespace()
            .map(|token| {
                token
                    .parse::<f64>()
                    .map_err(|_| ExtractError::MalformedCalibration {
                        path: path.to_path_buf(),
                        detail: format!("value '{}' is not a number", token),
                    })
            })
            .collect::<Result<_>>()?;
        rows.push(row);
    }
    RigidTransform::from_rows(&rows, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_identity() {
        let file = write_file("1 0 0 0\n0 1 0 0\n0 0 1 0\n0 0 0 1\n");
        let t = load_transform(file.path()).unwrap();
        assert_eq!(t, RigidTransform::identity());
    }

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let file = write_file("# calibration 2 to 1\n\n1 0 0 0.5\n0 1 0 0\n0 0 1 0\n0 0 0 1\n");
        let t = load_transform(file.path()).unwrap();
        assert_eq!(t.matrix()[(0, 3)], 0.5);
    }

    #[test]
    fn test_three_by_three_rejected() {
        let file = write_file("1 0 0\n0 1 0\n0 0 1\n");
        let err = load_transform(file.path()).unwrap_err();
        assert!(matches!(err, ExtractError::MalformedCalibration { .. }));
    }

    #[test]
    fn test_non_numeric_token_rejected() {
        let file = write_file("1 0 0 0\n0 one 0 0\n0 0 1 0\n0 0 0 1\n");
        let err = load_transform(file.path()).unwrap_err();
        assert!(matches!(err, ExtractError::MalformedCalibration { .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_transform(Path::new("/nonexistent/mat.txt")).unwrap_err();
        assert!(matches!(err, ExtractError::Io(_)));
    }
}
