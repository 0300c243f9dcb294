//! Release workflow orchestration
//!
//! A release runs in two phases. [plan_release] reads the version file and
//! the changelog, enforces the version guard and computes every new file
//! content in memory without side effects. [apply_release] then writes and
//! commits in a fixed order:
//!
//! 1. write the changelog
//! 2. commit the changelog
//! 3. write the version file
//! 4. commit the version file
//!
//! If step N fails, steps 1..N-1 have already taken effect and are not
//! reverted. A failing version-file commit, for example, leaves the changelog
//! committed and the version file written but uncommitted.

use chrono::NaiveDate;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::domain::{read_version_file, render_version_file, Changelog, Version};
use crate::error::{ReleaseBumpError, Result};
use crate::git::{CommitInfo, RepositoryClient};
use crate::ui;

/// Progress of a release through its steps
///
/// Planning passes through `VersionRead` and `Validated`; applying walks the
/// remaining stages. A failure leaves the release at the last stage reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReleaseStage {
    VersionRead,
    Validated,
    ChangelogWritten,
    ChangelogCommitted,
    VersionFileWritten,
    VersionFileCommitted,
    Done,
}

impl fmt::Display for ReleaseStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReleaseStage::VersionRead => "version read",
            ReleaseStage::Validated => "validated",
            ReleaseStage::ChangelogWritten => "changelog written",
            ReleaseStage::ChangelogCommitted => "changelog committed",
            ReleaseStage::VersionFileWritten => "version file written",
            ReleaseStage::VersionFileCommitted => "version file committed",
            ReleaseStage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Everything a release will write, computed before anything is touched
#[derive(Debug, Clone, PartialEq)]
pub struct ReleasePlan {
    /// Version read from the version file
    pub current: Version,

    /// Version requested on the command line
    pub target: Version,

    /// Changelog path relative to the repository root
    pub changelog_path: PathBuf,

    /// Version file path relative to the repository root
    pub version_file_path: PathBuf,

    pub changelog_before: String,
    pub changelog_after: String,
    pub version_file_after: String,

    /// Whether the unreleased marker was found in the changelog
    pub marker_found: bool,

    /// Non-fatal findings to report before applying
    pub warnings: Vec<BoundaryWarning>,
}

impl ReleasePlan {
    pub fn changelog_changed(&self) -> bool {
        self.changelog_before != self.changelog_after
    }
}

/// Commits made by [apply_release]
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedRelease {
    /// `None` when the changelog was unchanged and its commit was skipped
    pub changelog_commit: Option<CommitInfo>,
    pub version_commit: CommitInfo,
    pub warnings: Vec<BoundaryWarning>,
}

/// Result of a successful release workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// Branch the commits were made on
    pub branch: String,

    pub current: Version,
    pub target: Version,

    pub changelog_commit: Option<CommitInfo>,
    pub version_commit: CommitInfo,

    /// Every warning raised while planning and applying
    pub warnings: Vec<BoundaryWarning>,
}

/// Compute a release without side effects.
///
/// Reads the version file and the changelog under `root`, checks that
/// `target` is strictly greater than the current version and renders both
/// new file contents. Nothing is written.
///
/// # Returns
/// * `Ok(ReleasePlan)` - The contents to write and any warnings
/// * `Err` - If a file cannot be read or parsed, the guard refuses the target,
///   or the marker is missing while `behavior.require_unreleased_marker` is set
pub fn plan_release(
    root: &Path,
    config: &Config,
    target: Version,
    today: NaiveDate,
) -> Result<ReleasePlan> {
    let version_file_path = PathBuf::from(&config.files.version_file);
    let changelog_path = PathBuf::from(&config.files.changelog);

    let parsed = read_version_file(&root.join(&version_file_path))?;
    let current = parsed.version;
    let mut warnings = parsed.warnings;
    log::debug!("{}: current version {}", ReleaseStage::VersionRead, current);

    current.ensure_precedes(&target)?;
    log::debug!("{}: {} -> {}", ReleaseStage::Validated, current, target);

    let changelog_before = fs::read_to_string(root.join(&changelog_path)).map_err(|e| {
        ReleaseBumpError::changelog(format!(
            "cannot read '{}': {}",
            changelog_path.display(),
            e
        ))
    })?;

    let mut changelog = Changelog::parse(&changelog_before);
    let marker = &config.changelog.unreleased_marker;

    if changelog.has_release(&current) {
        warnings.push(BoundaryWarning::DuplicateRelease {
            version: current.to_string(),
        });
    }

    let marker_found =
        changelog.close_unreleased(marker, &current, today, &config.changelog.subsections);

    if !marker_found {
        if config.behavior.require_unreleased_marker {
            return Err(ReleaseBumpError::changelog(format!(
                "marker '{}' not found in '{}'",
                marker,
                changelog_path.display()
            )));
        }
        warnings.push(BoundaryWarning::MarkerNotFound {
            path: config.files.changelog.clone(),
            marker: marker.clone(),
        });
    }

    Ok(ReleasePlan {
        current,
        target,
        changelog_path,
        version_file_path,
        changelog_before,
        changelog_after: changelog.render(),
        version_file_after: render_version_file(&target),
        marker_found,
        warnings,
    })
}

/// Write and commit a planned release.
///
/// The changelog is always rewritten; its commit is skipped when its content
/// did not change, since there would be nothing to commit.
pub fn apply_release<R: RepositoryClient + ?Sized>(
    root: &Path,
    config: &Config,
    plan: &ReleasePlan,
    repo: &R,
) -> Result<AppliedRelease> {
    let mut stage = ReleaseStage::Validated;

    let result = apply_steps(root, config, plan, repo, &mut stage);
    if let Err(e) = &result {
        log::debug!("release aborted after stage '{}': {}", stage, e);
    }
    result
}

fn apply_steps<R: RepositoryClient + ?Sized>(
    root: &Path,
    config: &Config,
    plan: &ReleasePlan,
    repo: &R,
    stage: &mut ReleaseStage,
) -> Result<AppliedRelease> {
    let mut warnings = Vec::new();

    fs::write(root.join(&plan.changelog_path), &plan.changelog_after)?;
    advance(stage, ReleaseStage::ChangelogWritten);

    let changelog_commit = if plan.changelog_changed() {
        repo.stage_file(&plan.changelog_path)?;
        let message = config
            .messages
            .changelog_message(&plan.current, &config.files.changelog);
        let commit = repo.commit(&message)?;
        log::debug!("committed {} \"{}\"", commit.short_hash(), commit.message);
        Some(commit)
    } else {
        let warning = BoundaryWarning::UnchangedChangelog {
            path: config.files.changelog.clone(),
        };
        ui::display_boundary_warning(&warning);
        warnings.push(warning);
        None
    };
    advance(stage, ReleaseStage::ChangelogCommitted);

    fs::write(root.join(&plan.version_file_path), &plan.version_file_after)?;
    advance(stage, ReleaseStage::VersionFileWritten);

    repo.stage_file(&plan.version_file_path)?;
    let message = config
        .messages
        .version_message(&plan.target, &config.files.version_file);
    let version_commit = repo.commit(&message)?;
    log::debug!(
        "committed {} \"{}\"",
        version_commit.short_hash(),
        version_commit.message
    );
    advance(stage, ReleaseStage::VersionFileCommitted);

    Ok(AppliedRelease {
        changelog_commit,
        version_commit,
        warnings,
    })
}

fn advance(stage: &mut ReleaseStage, next: ReleaseStage) {
    log::debug!("{} -> {}", stage, next);
    *stage = next;
}

/// Main release workflow
///
/// Orchestrates the whole release:
/// 1. Report the active branch
/// 2. Plan the release (read, validate, render)
/// 3. Report planning warnings
/// 4. Apply the plan (write and commit both files)
///
/// # Arguments
///
/// * `root` - Repository root the configured file paths are relative to
/// * `config` - Release configuration
/// * `target` - Version to advance to
/// * `today` - Date stamped on the closed changelog section
/// * `repo` - Version-control backend
pub fn run_release_workflow<R: RepositoryClient + ?Sized>(
    root: &Path,
    config: &Config,
    target: Version,
    today: NaiveDate,
    repo: &R,
) -> Result<WorkflowResult> {
    let branch = repo.active_branch()?;
    ui::display_active_branch(&branch);

    let plan = plan_release(root, config, target, today)?;
    for warning in &plan.warnings {
        ui::display_boundary_warning(warning);
    }

    ui::display_status(&format!(
        "Closing {} in {} and bumping {} to {}",
        plan.current, config.files.changelog, config.files.version_file, plan.target
    ));
    let applied = apply_release(root, config, &plan, repo)?;
    log::debug!("{}", ReleaseStage::Done);

    let mut warnings = plan.warnings;
    warnings.extend(applied.warnings);

    Ok(WorkflowResult {
        branch,
        current: plan.current,
        target: plan.target,
        changelog_commit: applied.changelog_commit,
        version_commit: applied.version_commit,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockRepository;
    use tempfile::TempDir;

    const CHANGELOG: &str = "# Changelog\n\n## [Unreleased]\n### Added\n- Thing\n";

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn setup(version_file: &str, changelog: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("version.pri"), version_file).unwrap();
        fs::write(dir.path().join("CHANGELOG.md"), changelog).unwrap();
        dir
    }

    const V123: &str = "VERSION_MAJOR=1\nVERSION_MINOR=2\nVERSION_PATCH=3\n";

    #[test]
    fn test_plan_has_no_side_effects() {
        let dir = setup(V123, CHANGELOG);
        let plan = plan_release(dir.path(), &Config::default(), Version::new(1, 3, 0), today())
            .unwrap();

        assert_eq!(plan.current, Version::new(1, 2, 3));
        assert!(plan.marker_found);
        assert!(plan.changelog_changed());
        assert!(plan.changelog_after.contains("## [1.2.3] - 2024-05-01\n### Added\n- Thing\n"));
        assert_eq!(
            plan.version_file_after,
            "VERSION_MAJOR=1\nVERSION_MINOR=3\nVERSION_PATCH=0\n"
        );

        assert_eq!(fs::read_to_string(dir.path().join("CHANGELOG.md")).unwrap(), CHANGELOG);
        assert_eq!(fs::read_to_string(dir.path().join("version.pri")).unwrap(), V123);
    }

    #[test]
    fn test_plan_strict_marker_fails() {
        let dir = setup(V123, "# Changelog\n");
        let mut config = Config::default();
        config.behavior.require_unreleased_marker = true;

        let err = plan_release(dir.path(), &config, Version::new(1, 3, 0), today()).unwrap_err();
        assert!(matches!(err, ReleaseBumpError::Changelog(_)));
    }

    #[test]
    fn test_plan_missing_changelog_fails() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("version.pri"), V123).unwrap();
        let err = plan_release(dir.path(), &Config::default(), Version::new(2, 0, 0), today())
            .unwrap_err();
        assert!(err.to_string().contains("CHANGELOG.md"));
    }

    #[test]
    fn test_plan_reports_duplicate_release() {
        let changelog = "## [Unreleased]\n\n## [1.2.3] - 2024-01-01\n";
        let dir = setup(V123, changelog);
        let plan = plan_release(dir.path(), &Config::default(), Version::new(1, 2, 4), today())
            .unwrap();
        assert!(plan.warnings.contains(&BoundaryWarning::DuplicateRelease {
            version: "1.2.3".to_string()
        }));
    }

    #[test]
    fn test_apply_commits_in_order() {
        let dir = setup(V123, CHANGELOG);
        let config = Config::default();
        let repo = MockRepository::new("main");
        let plan = plan_release(dir.path(), &config, Version::new(1, 3, 0), today()).unwrap();

        let applied = apply_release(dir.path(), &config, &plan, &repo).unwrap();

        assert!(applied.changelog_commit.is_some());
        let messages: Vec<String> = repo.commits().into_iter().map(|c| c.message).collect();
        assert_eq!(
            messages,
            vec!["Close version 1.2.3 in CHANGELOG.md", "Bump to version 1.3.0"]
        );
    }

    #[test]
    fn test_apply_failure_keeps_earlier_steps() {
        let dir = setup(V123, CHANGELOG);
        let config = Config::default();
        let repo = MockRepository::new("main").fail_on_commit(2);
        let plan = plan_release(dir.path(), &config, Version::new(1, 3, 0), today()).unwrap();

        assert!(apply_release(dir.path(), &config, &plan, &repo).is_err());

        assert_eq!(repo.commits().len(), 1);
        assert_eq!(
            fs::read_to_string(dir.path().join("CHANGELOG.md")).unwrap(),
            plan.changelog_after
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("version.pri")).unwrap(),
            plan.version_file_after
        );
        assert_eq!(repo.staged(), vec![PathBuf::from("version.pri")]);
    }

    #[test]
    fn test_release_stage_order() {
        assert!(ReleaseStage::VersionRead < ReleaseStage::Validated);
        assert!(ReleaseStage::Validated < ReleaseStage::ChangelogWritten);
        assert!(ReleaseStage::VersionFileCommitted < ReleaseStage::Done);
        assert_eq!(ReleaseStage::ChangelogCommitted.to_string(), "changelog committed");
    }
}
