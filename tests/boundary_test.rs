use release_bump::boundary::BoundaryWarning;
use release_bump::ui;

// ============================================================================
// BoundaryWarning Display Tests
// ============================================================================

#[test]
fn test_boundary_warning_marker_not_found_display() {
    let warning = BoundaryWarning::MarkerNotFound {
        path: "CHANGELOG.md".to_string(),
        marker: "## [Unreleased]".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("## [Unreleased]"),
        "Message should contain the marker, got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("CHANGELOG.md"),
        "Message should contain the path, got: {}",
        display_msg
    );
    assert!(display_msg.contains("unchanged"));
}

#[test]
fn test_boundary_warning_duplicate_release_display() {
    let warning = BoundaryWarning::DuplicateRelease {
        version: "1.2.3".to_string(),
    };

    assert_eq!(
        warning.to_string(),
        "Changelog already contains a section for version 1.2.3"
    );
}

#[test]
fn test_boundary_warning_unexpected_key_display() {
    let warning = BoundaryWarning::UnexpectedVersionKey {
        line: 2,
        expected: "VERSION_MINOR".to_string(),
        found: "MINOR".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(display_msg.contains("line 2"), "got: {}", display_msg);
    assert!(display_msg.contains("'MINOR'"), "got: {}", display_msg);
    assert!(display_msg.contains("'VERSION_MINOR'"), "got: {}", display_msg);
}

#[test]
fn test_boundary_warning_unchanged_changelog_display() {
    let warning = BoundaryWarning::UnchangedChangelog {
        path: "CHANGELOG.md".to_string(),
    };

    assert!(warning.to_string().contains("skipping its commit"));
}

#[test]
fn test_display_boundary_warning_does_not_panic() {
    // Visual verification test - output is printed to stderr
    ui::display_boundary_warning(&BoundaryWarning::DuplicateRelease {
        version: "0.1.0".to_string(),
    });
}
