//! Domain logic - versions, the version file and the changelog, independent of git

pub mod changelog;
pub mod version;
pub mod version_file;

pub use changelog::{Changelog, ReleaseHeading, Section};
pub use version::Version;
pub use version_file::{parse_version_file, read_version_file, render_version_file};
