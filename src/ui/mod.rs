//! User interface module - terminal output for the release workflow.
//!
//! The tool never prompts; everything here is output. Formatting lives in
//! [formatter] and is re-exported for convenience.

pub mod formatter;

pub use formatter::{
    display_active_branch, display_boundary_warning, display_error, display_status,
    display_success, display_version_change, format_active_branch, format_version_change,
};
