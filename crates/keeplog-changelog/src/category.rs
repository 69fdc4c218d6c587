//! The fixed registry of change categories
//!
//! Keep a Changelog defines a closed set of six change kinds. Each carries
//! a markdown heading (what `### ...` sections must spell), a friendlier
//! title and an emoji for release notes, and the semantic-version bump
//! weight it implies.

use serde::{Deserialize, Serialize};

use crate::version::BumpLevel;

/// A change category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// New functionality
    Added,
    /// Changes to existing functionality
    Changed,
    /// Soon-to-be-removed functionality
    Deprecated,
    /// Removed functionality
    Removed,
    /// Bug fixes
    Fixed,
    /// Vulnerability fixes
    Security,
}

impl Category {
    /// All categories, in registry order.
    pub const ALL: [Category; 6] = [
        Self::Added,
        Self::Changed,
        Self::Deprecated,
        Self::Removed,
        Self::Fixed,
        Self::Security,
    ];

    /// Lowercase identifier, as used in the JSON export and on the CLI.
    pub fn identifier(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Changed => "changed",
            Self::Deprecated => "deprecated",
            Self::Removed => "removed",
            Self::Fixed => "fixed",
            Self::Security => "security",
        }
    }

    /// Markdown section heading. This is the only spelling the layout
    /// validator accepts at depth 3, and what the writer emits.
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Added => "Added",
            Self::Changed => "Changed",
            Self::Deprecated => "Deprecated",
            Self::Removed => "Removed",
            Self::Fixed => "Fixed",
            Self::Security => "Security",
        }
    }

    /// Human-readable title, used in GitHub release notes.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Added => "New Features",
            Self::Changed => "Updated Features",
            Self::Deprecated => "Deprecation",
            Self::Removed => "Removed",
            Self::Fixed => "Bug Fixes",
            Self::Security => "Security Changes",
        }
    }

    /// Emoji shortcode shown next to the title in release notes.
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Added => "rocket",
            Self::Changed => "scissors",
            Self::Deprecated => "warning",
            Self::Removed => "no_entry_sign",
            Self::Fixed => "bug",
            Self::Security => "closed_lock_with_key",
        }
    }

    /// Version bump weight this category implies on release.
    pub fn bump(&self) -> BumpLevel {
        match self {
            Self::Added | Self::Security => BumpLevel::Minor,
            Self::Removed => BumpLevel::Major,
            Self::Changed | Self::Deprecated | Self::Fixed => BumpLevel::Patch,
        }
    }

    /// Look up a category by its markdown heading.
    pub fn from_heading(heading: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.heading() == heading)
    }

    /// Comma-separated list of accepted headings, for error messages.
    pub fn accepted_headings() -> String {
        Self::ALL
            .map(|category| category.heading())
            .join(", ")
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.identifier())
    }
}

impl std::str::FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "added" => Ok(Self::Added),
            "changed" => Ok(Self::Changed),
            "deprecated" => Ok(Self::Deprecated),
            "removed" => Ok(Self::Removed),
            "fixed" => Ok(Self::Fixed),
            "security" => Ok(Self::Security),
            _ => Err(()),
        }
    }
}
