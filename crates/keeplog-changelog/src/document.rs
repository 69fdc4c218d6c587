//! In-memory changelog document model
//!
//! A [`Changelog`] is an explicit ordered association list of version
//! blocks: the `unreleased` block first when present, then released
//! versions in descending order. The ordering is owned by this module,
//! not by an incidental container property; mutations re-pin the head
//! block through [`Changelog::move_to_front`].

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use keeplog_core::error::{ChangelogError, Result};

use crate::category::Category;
use crate::clock::Clock;
use crate::version::{BumpLevel, SemanticVersion};

/// Version key of the pending, not-yet-released block.
pub const UNRELEASED: &str = "unreleased";

/// Default changelog file name.
pub const DEFAULT_CHANGELOG_FILE: &str = "CHANGELOG.md";

/// Metadata of a version block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockMetadata {
    /// Version key: `unreleased` or a `MAJOR.MINOR.PATCH` string
    pub version: String,
    /// Release date, absent for the unreleased block
    pub release_date: Option<NaiveDate>,
    /// Decomposed version, present for released blocks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semantic_version: Option<SemanticVersion>,
}

/// One version's worth of categorized changes
#[derive(Debug, Clone, PartialEq)]
pub struct VersionBlock {
    pub metadata: BlockMetadata,
    /// Category to entry messages, insertion order preserved
    changes: Vec<(Category, Vec<String>)>,
}

impl VersionBlock {
    /// New empty unreleased block.
    pub fn unreleased() -> Self {
        Self {
            metadata: BlockMetadata {
                version: UNRELEASED.to_string(),
                release_date: None,
                semantic_version: None,
            },
            changes: Vec::new(),
        }
    }

    /// New released block with the given key and date.
    pub fn released(version: SemanticVersion, release_date: NaiveDate) -> Self {
        Self {
            metadata: BlockMetadata {
                version: version.to_string(),
                release_date: Some(release_date),
                semantic_version: Some(version),
            },
            changes: Vec::new(),
        }
    }

    /// The block's version key.
    pub fn key(&self) -> &str {
        &self.metadata.version
    }

    pub fn is_unreleased(&self) -> bool {
        self.metadata.version == UNRELEASED
    }

    /// Categories and their messages, in insertion order.
    pub fn changes(&self) -> &[(Category, Vec<String>)] {
        &self.changes
    }

    /// Messages recorded under `category`, if any.
    pub fn entries(&self, category: Category) -> Option<&[String]> {
        self.changes
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, messages)| messages.as_slice())
    }

    /// Append a message, creating the category sequence if absent.
    pub fn push(&mut self, category: Category, message: impl Into<String>) {
        let index = match self.changes.iter().position(|(c, _)| *c == category) {
            Some(index) => index,
            None => {
                self.changes.push((category, Vec::new()));
                self.changes.len() - 1
            }
        };
        self.changes[index].1.push(message.into());
    }

    /// Highest bump weight among the categories present.
    pub fn max_bump(&self) -> Option<BumpLevel> {
        self.changes.iter().map(|(c, _)| c.bump()).max()
    }
}

/// An ordered changelog document bound to a file path
#[derive(Debug, Clone)]
pub struct Changelog {
    path: PathBuf,
    blocks: Vec<VersionBlock>,
}

impl Changelog {
    /// New empty document for the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            blocks: Vec::new(),
        }
    }

    /// Document constructed from already-parsed blocks.
    pub fn from_blocks(path: impl Into<PathBuf>, blocks: Vec<VersionBlock>) -> Self {
        Self {
            path: path.into(),
            blocks,
        }
    }

    /// The changelog file this document is bound to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the changelog file exists on disk.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// All version blocks, most recent first.
    pub fn blocks(&self) -> &[VersionBlock] {
        &self.blocks
    }

    /// Look up a block by version key.
    pub fn get(&self, version: &str) -> Result<&VersionBlock> {
        self.blocks
            .iter()
            .find(|block| block.key() == version)
            .ok_or_else(|| {
                ChangelogError::UnknownVersion {
                    path: self.path.clone(),
                    version: version.to_string(),
                }
                .into()
            })
    }

    /// Append a message to the unreleased block, creating it if absent.
    ///
    /// Never fails: the category set is closed and the unreleased block is
    /// materialized on demand and re-pinned to the front.
    pub fn add(&mut self, category: Category, message: impl Into<String>) {
        if !self.blocks.iter().any(VersionBlock::is_unreleased) {
            self.blocks.push(VersionBlock::unreleased());
        }

        // Both lookups succeed: the block was just ensured above.
        let block = self
            .blocks
            .iter_mut()
            .find(|block| block.is_unreleased())
            .unwrap();
        block.push(category, message);

        self.move_to_front(UNRELEASED);
    }

    /// The most recent released version.
    pub fn current_version(&self) -> Result<SemanticVersion> {
        let mut released = self.blocks.iter().filter(|block| !block.is_unreleased());

        match released.next() {
            Some(block) => SemanticVersion::parse(block.key()).map_err(Into::into),
            None if self.blocks.is_empty() => Err(ChangelogError::NoVersions {
                path: self.path.clone(),
            }
            .into()),
            None => Err(ChangelogError::OnlyUnreleased {
                path: self.path.clone(),
            }
            .into()),
        }
    }

    /// The second most recent released version.
    pub fn previous_version(&self) -> Result<SemanticVersion> {
        let mut released = self.blocks.iter().filter(|block| !block.is_unreleased());

        match released.nth(1) {
            Some(block) => SemanticVersion::parse(block.key()).map_err(Into::into),
            None => Err(ChangelogError::NoPreviousVersions {
                path: self.path.clone(),
            }
            .into()),
        }
    }

    /// Suggest the next version from the unreleased categories.
    ///
    /// A changelog without releases bootstraps at `0.0.1`. Otherwise the
    /// highest bump weight present wins and is applied exactly once,
    /// defaulting to a patch bump.
    pub fn suggest_future_version(&self) -> Result<SemanticVersion> {
        if self.has_only_unreleased() {
            return Ok(SemanticVersion::initial());
        }

        let unreleased = self.get(UNRELEASED)?;
        let current = self.current_version()?;

        let bump = unreleased.max_bump().unwrap_or(BumpLevel::Patch);
        debug!(%bump, current = %current, "suggesting future version");
        Ok(current.bump(bump))
    }

    /// Convert the unreleased block into a dated release.
    ///
    /// The target is the override (leading `v` accepted) or the suggested
    /// future version. Re-releases and backwards releases are rejected;
    /// the backwards check is skipped when no release exists yet.
    pub fn release(
        &mut self,
        override_version: Option<&str>,
        clock: &dyn Clock,
    ) -> Result<SemanticVersion> {
        if !self.blocks.iter().any(VersionBlock::is_unreleased) {
            return Err(ChangelogError::MissingUnreleased {
                path: self.path.clone(),
            }
            .into());
        }

        let version = match override_version {
            Some(version) => SemanticVersion::parse(version)?,
            None => self.suggest_future_version()?,
        };

        let key = version.to_string();
        if self.blocks.iter().any(|block| block.key() == key) {
            return Err(ChangelogError::AlreadyReleased {
                path: self.path.clone(),
                version: key,
            }
            .into());
        }

        if !self.has_only_unreleased() {
            let current = self.current_version()?;
            if version < current {
                return Err(ChangelogError::OlderThanCurrent {
                    path: self.path.clone(),
                    version: version.to_string(),
                    current: current.to_string(),
                }
                .into());
            }
        }

        let block = self
            .blocks
            .iter_mut()
            .find(|block| block.is_unreleased())
            .unwrap();
        block.metadata = BlockMetadata {
            version: key.clone(),
            release_date: Some(clock.today()),
            semantic_version: Some(version.clone()),
        };

        self.move_to_front(&key);
        debug!(version = %version, "released unreleased changes");
        Ok(version)
    }

    /// True when the only block is the unreleased one.
    fn has_only_unreleased(&self) -> bool {
        self.blocks.len() == 1 && self.blocks[0].is_unreleased()
    }

    /// Re-position the block with `key` as the first entry.
    fn move_to_front(&mut self, key: &str) {
        if let Some(index) = self.blocks.iter().position(|block| block.key() == key) {
            let block = self.blocks.remove(index);
            self.blocks.insert(0, block);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use keeplog_core::error::KeeplogError;

    fn fixed_clock() -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(2100, 12, 3).unwrap())
    }

    fn released_block(version: &str, date: (i32, u32, u32)) -> VersionBlock {
        VersionBlock::released(
            SemanticVersion::parse(version).unwrap(),
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        )
    }

    /// Unreleased {added, changed}, 1.0.0 {removed, fixed}, 0.9.4 {deprecated}.
    fn sample() -> Changelog {
        let mut unreleased = VersionBlock::unreleased();
        unreleased.push(Category::Added, "New feature");
        unreleased.push(Category::Changed, "Changed another feature");

        let mut one = released_block("1.0.0", (2022, 3, 14));
        one.push(Category::Removed, "Removed deprecated API call");
        one.push(Category::Fixed, "Fixed some bug");

        let mut nine = released_block("0.9.4", (2022, 3, 13));
        nine.push(Category::Deprecated, "Deprecated public API call");

        Changelog::from_blocks("CHANGELOG.md", vec![unreleased, one, nine])
    }

    #[test]
    fn test_add_creates_unreleased_first() {
        let mut changelog = Changelog::from_blocks(
            "CHANGELOG.md",
            vec![released_block("1.0.0", (2022, 3, 14))],
        );

        changelog.add(Category::Fixed, "Fix the thing");

        assert_eq!(changelog.blocks()[0].key(), UNRELEASED);
        assert_eq!(
            changelog.blocks()[0].entries(Category::Fixed).unwrap(),
            ["Fix the thing"]
        );
    }

    #[test]
    fn test_add_is_append_only_per_category() {
        let mut changelog = sample();

        changelog.add(Category::Added, "Test 1");
        changelog.add(Category::Added, "Test 2");

        assert_eq!(
            changelog.get(UNRELEASED).unwrap().entries(Category::Added).unwrap(),
            ["New feature", "Test 1", "Test 2"]
        );
    }

    #[test]
    fn test_add_accepts_every_category() {
        let mut changelog = Changelog::new("CHANGELOG.md");

        for category in Category::ALL {
            changelog.add(category, format!("Validating {category}"));
        }

        let unreleased = changelog.get(UNRELEASED).unwrap();
        for category in Category::ALL {
            assert_eq!(
                unreleased.entries(category).unwrap(),
                [format!("Validating {category}")]
            );
        }
    }

    #[test]
    fn test_get_unknown_version() {
        let err = sample().get("123.456.789").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Version '123.456.789' not available in the Changelog"
        );
        assert_eq!(err.severity(), keeplog_core::Severity::Warning);
    }

    #[test]
    fn test_current_and_previous_version() {
        let changelog = sample();
        assert_eq!(changelog.current_version().unwrap().to_string(), "1.0.0");
        assert_eq!(changelog.previous_version().unwrap().to_string(), "0.9.4");
    }

    #[test]
    fn test_current_version_empty_document() {
        let err = Changelog::new("CHANGELOG.md").current_version().unwrap_err();
        assert!(matches!(
            err,
            KeeplogError::Changelog(ChangelogError::NoVersions { .. })
        ));
    }

    #[test]
    fn test_current_version_only_unreleased() {
        let mut changelog = Changelog::new("CHANGELOG.md");
        changelog.add(Category::Added, "Test");

        let err = changelog.current_version().unwrap_err();
        assert!(matches!(
            err,
            KeeplogError::Changelog(ChangelogError::OnlyUnreleased { .. })
        ));
    }

    #[test]
    fn test_previous_version_requires_two_releases() {
        let mut changelog = Changelog::new("CHANGELOG.md");
        let err = changelog.previous_version().unwrap_err();
        assert!(matches!(
            err,
            KeeplogError::Changelog(ChangelogError::NoPreviousVersions { .. })
        ));

        changelog.add(Category::Added, "Test");
        let err = changelog.previous_version().unwrap_err();
        assert!(matches!(
            err,
            KeeplogError::Changelog(ChangelogError::NoPreviousVersions { .. })
        ));
    }

    #[test]
    fn test_suggest_initial_version() {
        let mut changelog = Changelog::new("CHANGELOG.md");
        changelog.add(Category::Removed, "Even a major change");

        assert_eq!(
            changelog.suggest_future_version().unwrap().to_string(),
            "0.0.1"
        );
    }

    #[test]
    fn test_suggest_highest_weight_wins_single_bump() {
        // added (minor) outweighs changed (patch): 1.0.0 -> 1.1.0
        let changelog = sample();
        assert_eq!(
            changelog.suggest_future_version().unwrap().to_string(),
            "1.1.0"
        );
    }

    #[test]
    fn test_suggest_per_category() {
        for category in Category::ALL {
            let mut changelog = sample();
            changelog.release(None, &fixed_clock()).unwrap();
            changelog.add(category, "Some message");

            let expected = match category.bump() {
                BumpLevel::Major => "2.0.0",
                BumpLevel::Minor => "1.2.0",
                BumpLevel::Patch => "1.1.1",
            };
            assert_eq!(
                changelog.suggest_future_version().unwrap().to_string(),
                expected,
                "category {category}"
            );
        }
    }

    #[test]
    fn test_suggest_cascades_to_highest_present() {
        let mut changelog = sample();
        changelog.release(None, &fixed_clock()).unwrap();

        changelog.add(Category::Fixed, "patch weight");
        assert_eq!(
            changelog.suggest_future_version().unwrap().to_string(),
            "1.1.1"
        );

        changelog.add(Category::Security, "minor weight");
        assert_eq!(
            changelog.suggest_future_version().unwrap().to_string(),
            "1.2.0"
        );

        changelog.add(Category::Removed, "major weight");
        assert_eq!(
            changelog.suggest_future_version().unwrap().to_string(),
            "2.0.0"
        );
    }

    #[test]
    fn test_release_stamps_metadata() {
        let mut changelog = sample();
        let released = changelog.release(None, &fixed_clock()).unwrap();
        assert_eq!(released.to_string(), "1.1.0");

        let block = &changelog.blocks()[0];
        assert_eq!(block.key(), "1.1.0");
        assert_eq!(
            block.metadata.release_date,
            Some(NaiveDate::from_ymd_opt(2100, 12, 3).unwrap())
        );
        let version = block.metadata.semantic_version.as_ref().unwrap();
        assert_eq!((version.major(), version.minor(), version.patch()), (1, 1, 0));
        assert!(version.prerelease().is_none());
        assert!(version.build().is_none());

        // Entries carried over from the unreleased block.
        assert_eq!(block.entries(Category::Added).unwrap(), ["New feature"]);
        assert!(changelog.get(UNRELEASED).is_err());
    }

    #[test]
    fn test_release_with_override() {
        let mut changelog = sample();
        changelog.release(Some("1.1.0"), &fixed_clock()).unwrap();
        assert_eq!(changelog.blocks()[0].key(), "1.1.0");
    }

    #[test]
    fn test_release_strips_v_prefix() {
        let mut changelog = sample();
        changelog.release(Some("v1.1.0"), &fixed_clock()).unwrap();
        assert_eq!(changelog.blocks()[0].key(), "1.1.0");
    }

    #[test]
    fn test_release_invalid_override() {
        let mut changelog = sample();
        let err = changelog.release(Some("a.b.c"), &fixed_clock()).unwrap_err();
        assert_eq!(err.to_string(), "Version 'a.b.c' is not SemVer compliant");
    }

    #[test]
    fn test_release_duplicate_version() {
        let mut changelog = sample();
        let err = changelog.release(Some("1.0.0"), &fixed_clock()).unwrap_err();
        assert!(matches!(
            err,
            KeeplogError::Changelog(ChangelogError::AlreadyReleased { .. })
        ));
    }

    #[test]
    fn test_release_older_version() {
        let mut changelog = sample();
        let err = changelog.release(Some("0.0.1"), &fixed_clock()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unable to release a version older than the last release '1.0.0'"
        );
    }

    #[test]
    fn test_release_backwards_check_skipped_without_releases() {
        let mut changelog = Changelog::new("CHANGELOG.md");
        changelog.add(Category::Added, "First feature");

        changelog.release(None, &fixed_clock()).unwrap();
        assert_eq!(changelog.blocks()[0].key(), "0.0.1");
    }

    #[test]
    fn test_release_without_unreleased() {
        let mut changelog = Changelog::from_blocks(
            "CHANGELOG.md",
            vec![released_block("1.0.0", (2022, 3, 14))],
        );

        let err = changelog.release(None, &fixed_clock()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unable to release without [Unreleased] section"
        );
    }
}
