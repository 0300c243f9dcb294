use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::changelog::default_subsections;
use crate::domain::Version;
use crate::error::{ReleaseBumpError, Result};

/// Name of the project-local configuration file
pub const LOCAL_CONFIG_FILE: &str = "releasebump.toml";

/// Name of the per-user configuration file inside the user config directory
pub const USER_CONFIG_FILE: &str = "release-bump.toml";

/// Represents the complete configuration for release-bump.
///
/// Contains file locations, changelog conventions, commit message templates and behavior options.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub files: FilesConfig,

    #[serde(default)]
    pub changelog: ChangelogConfig,

    #[serde(default)]
    pub messages: MessagesConfig,

    #[serde(default)]
    pub behavior: BehaviorConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// File the configuration was read from, `None` for defaults
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

fn default_version_file() -> String {
    "version.pri".to_string()
}

fn default_changelog_file() -> String {
    "CHANGELOG.md".to_string()
}

/// Locations of the two managed files, relative to the repository root.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FilesConfig {
    #[serde(default = "default_version_file")]
    pub version_file: String,

    #[serde(default = "default_changelog_file")]
    pub changelog: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        FilesConfig {
            version_file: default_version_file(),
            changelog: default_changelog_file(),
        }
    }
}

fn default_unreleased_marker() -> String {
    "## [Unreleased]".to_string()
}

/// Changelog conventions.
///
/// The marker is matched against the start of level-2 heading lines; the
/// subsections are opened, empty, under the marker when a release is closed.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ChangelogConfig {
    #[serde(default = "default_unreleased_marker")]
    pub unreleased_marker: String,

    #[serde(default = "default_subsections")]
    pub subsections: Vec<String>,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        ChangelogConfig {
            unreleased_marker: default_unreleased_marker(),
            subsections: default_subsections(),
        }
    }
}

fn default_changelog_commit() -> String {
    "Close version {version} in {file}".to_string()
}

fn default_version_commit() -> String {
    "Bump to version {version}".to_string()
}

/// Commit message templates. `{version}` and `{file}` are substituted.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct MessagesConfig {
    #[serde(default = "default_changelog_commit")]
    pub changelog_commit: String,

    #[serde(default = "default_version_commit")]
    pub version_commit: String,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        MessagesConfig {
            changelog_commit: default_changelog_commit(),
            version_commit: default_version_commit(),
        }
    }
}

impl MessagesConfig {
    /// Message for the commit closing `version` in the changelog at `file`
    pub fn changelog_message(&self, version: &Version, file: &str) -> String {
        render_template(&self.changelog_commit, version, file)
    }

    /// Message for the commit bumping the version file at `file` to `version`
    pub fn version_message(&self, version: &Version, file: &str) -> String {
        render_template(&self.version_commit, version, file)
    }
}

fn render_template(template: &str, version: &Version, file: &str) -> String {
    template
        .replace("{version}", &version.to_string())
        .replace("{file}", file)
}

/// Configuration for behavior customization.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct BehaviorConfig {
    /// Treat a changelog without the unreleased marker as an error instead of a warning
    #[serde(default)]
    pub require_unreleased_marker: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
        }
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> Result<LevelFilter> {
        self.level.parse::<LevelFilter>().map_err(|_| {
            ReleaseBumpError::config(format!("invalid logging level '{}'", self.level))
        })
    }
}

impl Config {
    /// Check the settings that would otherwise only fail halfway through a release.
    pub fn validate(&self) -> Result<()> {
        if !self.changelog.unreleased_marker.starts_with("## ") {
            return Err(ReleaseBumpError::config(format!(
                "unreleased marker '{}' must be a level-2 heading starting with '## '",
                self.changelog.unreleased_marker
            )));
        }

        for (name, template) in [
            ("changelog_commit", &self.messages.changelog_commit),
            ("version_commit", &self.messages.version_commit),
        ] {
            if !template.contains("{version}") {
                return Err(ReleaseBumpError::config(format!(
                    "message template '{}' must contain {{version}}",
                    name
                )));
            }
        }

        if self.files.version_file.trim().is_empty() || self.files.changelog.trim().is_empty() {
            return Err(ReleaseBumpError::config("file paths must not be empty"));
        }

        self.logging.level_filter()?;
        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. `releasebump.toml` in `root`
/// 2. `release-bump.toml` in the user config directory
/// 3. Default configuration if no file found
///
/// The result is validated before it is returned; `source` records the file used.
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read, parsed or validated
pub fn load_config(root: &Path) -> Result<Config> {
    let local_path = root.join(LOCAL_CONFIG_FILE);

    let path = if local_path.exists() {
        Some(local_path)
    } else {
        dirs::config_dir()
            .map(|dir| dir.join(USER_CONFIG_FILE))
            .filter(|path| path.exists())
    };

    let config = match path {
        Some(path) => read_config_file(&path)?,
        None => Config::default(),
    };

    config.validate()?;
    Ok(config)
}

/// Read and parse one configuration file without validating it.
pub fn read_config_file(path: &Path) -> Result<Config> {
    let config_str = fs::read_to_string(path).map_err(|e| {
        ReleaseBumpError::config(format!("cannot read '{}': {}", path.display(), e))
    })?;
    let mut config = toml::from_str::<Config>(&config_str).map_err(|e| {
        ReleaseBumpError::config(format!("cannot parse '{}': {}", path.display(), e))
    })?;
    config.source = Some(path.to_path_buf());
    Ok(config)
}
