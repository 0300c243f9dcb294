//! The `KEY=integer` version file.
//!
//! The file holds exactly three lines in fixed order:
//!
//! ```text
//! VERSION_MAJOR=1
//! VERSION_MINOR=2
//! VERSION_PATCH=3
//! ```

use crate::boundary::BoundaryWarning;
use crate::domain::Version;
use crate::error::{ReleaseBumpError, Result};
use std::fs;
use std::path::Path;

/// Keys of the version file, in the order they must appear
pub const VERSION_KEYS: [&str; 3] = ["VERSION_MAJOR", "VERSION_MINOR", "VERSION_PATCH"];

/// Version read from a version file together with non-fatal findings
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedVersionFile {
    pub version: Version,
    pub warnings: Vec<BoundaryWarning>,
}

/// Parse version file content.
///
/// Only the first three lines are read. Each is split on its first `=` and the
/// trimmed remainder must be a non-negative integer. A key other than the
/// expected one is reported as a warning; the value is still used.
///
/// # Returns
/// * `Ok(ParsedVersionFile)` - The parsed version and any key warnings
/// * `Err` - If fewer than three lines exist, a line has no `=`, or a value is not an integer
pub fn parse_version_file(content: &str) -> Result<ParsedVersionFile> {
    let lines: Vec<&str> = content.lines().take(VERSION_KEYS.len()).collect();
    if lines.len() < VERSION_KEYS.len() {
        return Err(ReleaseBumpError::version_file(format!(
            "expected {} lines, found {}",
            VERSION_KEYS.len(),
            lines.len()
        )));
    }

    let mut values = [0u64; 3];
    let mut warnings = Vec::new();

    for (index, (line, expected_key)) in lines.iter().zip(VERSION_KEYS).enumerate() {
        let (key, value) = line.split_once('=').ok_or_else(|| {
            ReleaseBumpError::version_file(format!(
                "line {} has no '=' delimiter: '{}'",
                index + 1,
                line
            ))
        })?;

        values[index] = value.trim().parse::<u64>().map_err(|_| {
            ReleaseBumpError::version_file(format!(
                "line {}: '{}' is not a non-negative integer",
                index + 1,
                value.trim()
            ))
        })?;

        if key.trim() != expected_key {
            warnings.push(BoundaryWarning::UnexpectedVersionKey {
                line: index + 1,
                expected: expected_key.to_string(),
                found: key.trim().to_string(),
            });
        }
    }

    Ok(ParsedVersionFile {
        version: Version::new(values[0], values[1], values[2]),
        warnings,
    })
}

/// Render the full version file content for `version`.
pub fn render_version_file(version: &Version) -> String {
    let [major_key, minor_key, patch_key] = VERSION_KEYS;
    format!(
        "{}={}\n{}={}\n{}={}\n",
        major_key, version.major, minor_key, version.minor, patch_key, version.patch
    )
}

/// Read and parse the version file at `path`.
pub fn read_version_file(path: &Path) -> Result<ParsedVersionFile> {
    let content = fs::read_to_string(path).map_err(|e| {
        ReleaseBumpError::version_file(format!("cannot read '{}': {}", path.display(), e))
    })?;
    parse_version_file(&content)
}
