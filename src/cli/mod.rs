//! Command-line surface: argument parsing and the release workflow it drives.

pub mod orchestration;

use crate::domain::Version;

/// Command-line arguments. All three components are required.
#[derive(clap::Parser, Debug, Clone, PartialEq)]
#[command(
    name = "release-bump",
    version,
    about = "Close the Unreleased changelog section and bump the version file"
)]
pub struct Args {
    #[arg(long, help = "Major component of the new version")]
    pub major: u64,

    #[arg(long, help = "Minor component of the new version")]
    pub minor: u64,

    #[arg(long, help = "Patch component of the new version")]
    pub patch: u64,
}

impl Args {
    /// The requested target version
    pub fn target(&self) -> Version {
        Version::new(self.major, self.minor, self.patch)
    }
}
