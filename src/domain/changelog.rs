//! Structured view of a "Keep a Changelog" style document.
//!
//! A document is a preamble followed by level-2 (`## `) sections. Headings
//! may be indented with spaces or tabs. Every line keeps its original
//! indentation and terminator, and a leading byte order mark is kept aside, so
//! an untouched document renders back byte for byte.

use chrono::NaiveDate;
use regex::Regex;

use crate::domain::Version;

/// Date format used in release headings
pub const RELEASE_DATE_FORMAT: &str = "%Y-%m-%d";

const SECTION_PREFIX: &str = "## ";

const BYTE_ORDER_MARK: char = '\u{feff}';

fn indent_len(line: &str) -> usize {
    line.len() - line.trim_start_matches([' ', '\t']).len()
}

/// A level-2 heading line and the lines below it up to the next one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub heading: String,
    pub body: Vec<String>,
}

impl Section {
    /// The heading line without its indentation or line terminator
    pub fn title(&self) -> &str {
        self.heading[indent_len(&self.heading)..].trim_end_matches(['\r', '\n'])
    }
}

/// A released section heading such as `## [1.2.3] - 2024-01-31`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseHeading {
    pub version: String,
    pub date: Option<NaiveDate>,
}

/// Parsed changelog document
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Changelog {
    byte_order_mark: bool,
    preamble: Vec<String>,
    sections: Vec<Section>,
}

impl Changelog {
    /// Split `text` into preamble and sections. Parsing never fails.
    pub fn parse(text: &str) -> Self {
        let mut changelog = Changelog::default();

        let text = match text.strip_prefix(BYTE_ORDER_MARK) {
            Some(rest) => {
                changelog.byte_order_mark = true;
                rest
            }
            None => text,
        };

        for line in text.split_inclusive('\n') {
            if line[indent_len(line)..].starts_with(SECTION_PREFIX) {
                changelog.sections.push(Section {
                    heading: line.to_string(),
                    body: Vec::new(),
                });
            } else if let Some(section) = changelog.sections.last_mut() {
                section.body.push(line.to_string());
            } else {
                changelog.preamble.push(line.to_string());
            }
        }

        changelog
    }

    /// Serialize back to text
    pub fn render(&self) -> String {
        let mut out = String::new();
        if self.byte_order_mark {
            out.push(BYTE_ORDER_MARK);
        }
        for line in &self.preamble {
            out.push_str(line);
        }
        for section in &self.sections {
            out.push_str(&section.heading);
            for line in &section.body {
                out.push_str(line);
            }
        }
        out
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Index of the first section whose heading, past its indentation, starts with `marker`
    pub fn find_unreleased(&self, marker: &str) -> Option<usize> {
        self.sections.iter().position(|section| {
            section.heading[indent_len(&section.heading)..].starts_with(marker)
        })
    }

    /// All sections with a `## [version]` heading, in document order.
    ///
    /// The unreleased section matches the heading shape too and is included
    /// with its bracketed label as the version.
    pub fn releases(&self) -> Vec<ReleaseHeading> {
        let mut releases = Vec::new();

        if let Ok(re) =
            Regex::new(r"^## \[(?P<version>[^\]]+)\](?: - (?P<date>\d{4}-\d{2}-\d{2}))?")
        {
            for section in &self.sections {
                if let Some(captures) = re.captures(section.title()) {
                    let date = captures.name("date").and_then(|m| {
                        NaiveDate::parse_from_str(m.as_str(), RELEASE_DATE_FORMAT).ok()
                    });
                    releases.push(ReleaseHeading {
                        version: captures["version"].to_string(),
                        date,
                    });
                }
            }
        }

        releases
    }

    /// Whether a release section already exists for `version`
    pub fn has_release(&self, version: &Version) -> bool {
        let label = version.to_string();
        self.releases().iter().any(|release| release.version == label)
    }

    /// Close the unreleased section as release `version` dated `date`.
    ///
    /// The unreleased heading stays in place with a fresh set of empty
    /// `subsections`, and the previous unreleased content moves under a new
    /// `## [version] - date` heading directly after it. Any text that followed
    /// the marker on its heading line is carried onto the new heading, and
    /// the marker keeps its indentation.
    ///
    /// Returns `false` and leaves the document untouched when no heading
    /// starts with `marker`.
    pub fn close_unreleased(
        &mut self,
        marker: &str,
        version: &Version,
        date: NaiveDate,
        subsections: &[String],
    ) -> bool {
        let Some(index) = self.find_unreleased(marker) else {
            return false;
        };

        let closed = self.sections.remove(index);
        let indent = indent_len(&closed.heading);
        let heading_rest = &closed.heading[indent + marker.len()..];

        let fresh = Section {
            heading: format!("{}{}\n", &closed.heading[..indent], marker),
            body: subsections
                .iter()
                .flat_map(|name| [format!("### {}\n", name), "\n".to_string()])
                .collect(),
        };

        let release = Section {
            heading: format!(
                "## [{}] - {}{}",
                version,
                date.format(RELEASE_DATE_FORMAT),
                heading_rest
            ),
            body: closed.body,
        };

        self.sections.insert(index, release);
        self.sections.insert(index, fresh);
        true
    }
}

/// Default empty subsections opened under a fresh unreleased heading
pub fn default_subsections() -> Vec<String> {
    vec!["Added".to_string(), "Changed".to_string(), "Fixed".to_string()]
}
