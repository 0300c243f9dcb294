use std::fmt;

/// Non-fatal conditions found while planning a release.
/// These are reported to the user and the release continues.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The changelog has no heading starting with the unreleased marker
    MarkerNotFound { path: String, marker: String },
    /// The changelog already has a section for the version being closed
    DuplicateRelease { version: String },
    /// A version file line carries a key other than the expected one
    UnexpectedVersionKey {
        line: usize,
        expected: String,
        found: String,
    },
    /// The changelog content did not change, so there is nothing to commit
    UnchangedChangelog { path: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::MarkerNotFound { path, marker } => {
                write!(f, "Marker '{}' not found in '{}'; changelog left unchanged", marker, path)
            }
            BoundaryWarning::DuplicateRelease { version } => {
                write!(f, "Changelog already contains a section for version {}", version)
            }
            BoundaryWarning::UnexpectedVersionKey {
                line,
                expected,
                found,
            } => {
                write!(
                    f,
                    "Version file line {} has key '{}' (expected '{}')",
                    line, found, expected
                )
            }
            BoundaryWarning::UnchangedChangelog { path } => {
                write!(f, "'{}' is unchanged; skipping its commit", path)
            }
        }
    }
}
