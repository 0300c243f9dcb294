//! Pure formatting functions for UI output.
//!
//! Styling comes from `console`, which drops colors when the stream is not a
//! terminal, so the plain text stays stable for scripts and tests.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::domain::Version;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().for_stderr(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow().for_stderr(), warning);
}

pub fn format_active_branch(branch: &str) -> String {
    format!("Currently active branch: {}", branch)
}

/// Print the branch the release commits will land on.
pub fn display_active_branch(branch: &str) {
    println!("{}", format_active_branch(branch));
}

pub fn format_version_change(current: &Version, target: &Version) -> String {
    format!("version updated {} -> {}", current, target)
}

/// Print the closing summary line of a release.
pub fn display_version_change(current: &Version, target: &Version) {
    println!("{}", format_version_change(current, target));
}
