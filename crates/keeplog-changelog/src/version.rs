//! Semantic version handling
//!
//! Follows the SemVer 2.0.0 specification: https://semver.org/

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use keeplog_core::error::VersionError;

/// Which semantic-version component a release increments.
///
/// Ordered `Patch < Minor < Major`; the highest weight among the
/// unreleased categories wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpLevel {
    Patch,
    Minor,
    Major,
}

impl std::fmt::Display for BumpLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Patch => write!(f, "patch"),
            Self::Minor => write!(f, "minor"),
            Self::Major => write!(f, "major"),
        }
    }
}

/// A parsed semantic version
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SemanticVersion {
    inner: semver::Version,
}

impl SemanticVersion {
    /// The bootstrap version suggested for a changelog with no releases.
    pub fn initial() -> Self {
        Self {
            inner: semver::Version::new(0, 0, 1),
        }
    }

    /// Parse a version string, accepting an optional leading `v`.
    pub fn parse(version: &str) -> Result<Self, VersionError> {
        let stripped = version.strip_prefix('v').unwrap_or(version);

        let inner = semver::Version::parse(stripped)
            .map_err(|_| VersionError::NotSemver(version.to_string()))?;

        Ok(Self { inner })
    }

    pub fn major(&self) -> u64 {
        self.inner.major
    }

    pub fn minor(&self) -> u64 {
        self.inner.minor
    }

    pub fn patch(&self) -> u64 {
        self.inner.patch
    }

    /// Pre-release identifier, if any.
    pub fn prerelease(&self) -> Option<&str> {
        if self.inner.pre.is_empty() {
            None
        } else {
            Some(self.inner.pre.as_str())
        }
    }

    /// Build metadata, if any.
    pub fn build(&self) -> Option<&str> {
        if self.inner.build.is_empty() {
            None
        } else {
            Some(self.inner.build.as_str())
        }
    }

    /// Apply a single bump at the given level.
    ///
    /// Higher components reset the lower ones to zero; prerelease and
    /// build metadata are always cleared.
    pub fn bump(&self, level: BumpLevel) -> Self {
        let inner = match level {
            BumpLevel::Major => semver::Version::new(self.inner.major + 1, 0, 0),
            BumpLevel::Minor => semver::Version::new(self.inner.major, self.inner.minor + 1, 0),
            BumpLevel::Patch => semver::Version::new(
                self.inner.major,
                self.inner.minor,
                self.inner.patch + 1,
            ),
        };

        Self { inner }
    }
}

impl std::fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl std::str::FromStr for SemanticVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Serializes to the decomposed metadata record used by the JSON export.
impl Serialize for SemanticVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SemanticVersion", 5)?;
        state.serialize_field("major", &self.major())?;
        state.serialize_field("minor", &self.minor())?;
        state.serialize_field("patch", &self.patch())?;
        state.serialize_field("prerelease", &self.prerelease())?;
        state.serialize_field("buildmetadata", &self.build())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let v = SemanticVersion::parse("1.2.3").unwrap();
        assert_eq!(v.major(), 1);
        assert_eq!(v.minor(), 2);
        assert_eq!(v.patch(), 3);
        assert!(v.prerelease().is_none());
        assert!(v.build().is_none());
    }

    #[test]
    fn test_parse_with_v_prefix() {
        let v = SemanticVersion::parse("v1.2.3").unwrap();
        assert_eq!(v.to_string(), "1.2.3");
    }

    #[test]
    fn test_parse_with_prerelease_and_build() {
        let v = SemanticVersion::parse("1.0.0-alpha.1+build.5").unwrap();
        assert_eq!(v.prerelease(), Some("alpha.1"));
        assert_eq!(v.build(), Some("build.5"));
    }

    #[test]
    fn test_parse_invalid() {
        let err = SemanticVersion::parse("a.b.c").unwrap_err();
        assert_eq!(err.to_string(), "Version 'a.b.c' is not SemVer compliant");
    }

    #[test]
    fn test_bump_major_resets_lower_components() {
        let v = SemanticVersion::parse("1.2.3").unwrap();
        assert_eq!(v.bump(BumpLevel::Major).to_string(), "2.0.0");
    }

    #[test]
    fn test_bump_minor_resets_patch() {
        let v = SemanticVersion::parse("1.2.3").unwrap();
        assert_eq!(v.bump(BumpLevel::Minor).to_string(), "1.3.0");
    }

    #[test]
    fn test_bump_patch() {
        let v = SemanticVersion::parse("1.2.3").unwrap();
        assert_eq!(v.bump(BumpLevel::Patch).to_string(), "1.2.4");
    }

    #[test]
    fn test_bump_clears_prerelease() {
        let v = SemanticVersion::parse("1.2.3-beta.1").unwrap();
        assert_eq!(v.bump(BumpLevel::Patch).to_string(), "1.2.4");
    }

    #[test]
    fn test_ordering() {
        let older = SemanticVersion::parse("0.9.4").unwrap();
        let newer = SemanticVersion::parse("1.0.0").unwrap();
        assert!(older < newer);

        let pre = SemanticVersion::parse("1.0.0-alpha").unwrap();
        assert!(pre < newer);
    }

    #[test]
    fn test_bump_level_ordering() {
        assert!(BumpLevel::Patch < BumpLevel::Minor);
        assert!(BumpLevel::Minor < BumpLevel::Major);
        assert_eq!(BumpLevel::Patch.max(BumpLevel::Major), BumpLevel::Major);
    }

    #[test]
    fn test_serialize_metadata_record() {
        let v = SemanticVersion::parse("1.1.0").unwrap();
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "major": 1,
                "minor": 1,
                "patch": 0,
                "prerelease": null,
                "buildmetadata": null,
            })
        );
    }
}
