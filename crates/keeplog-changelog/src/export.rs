//! Structured JSON export
//!
//! Serializes the document (or one version) to an ordered array of
//! version-block records. Records are listed in document order rather
//! than keyed by version, so consumers keep the most-recent-first
//! ordering without re-sorting.

use std::path::Path;

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::debug;

use keeplog_core::error::{ChangelogError, Result};

use crate::document::{Changelog, VersionBlock};

/// A version block in export form: metadata plus one field per
/// populated category.
struct BlockRecord<'a>(&'a VersionBlock);

impl Serialize for BlockRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1 + self.0.changes().len()))?;
        map.serialize_entry("metadata", &self.0.metadata)?;
        for (category, messages) in self.0.changes() {
            map.serialize_entry(category.identifier(), messages)?;
        }
        map.end()
    }
}

impl Changelog {
    /// Export to JSON text: the whole document, or one resolved version.
    pub fn to_json(&self, version: Option<&str>) -> Result<String> {
        let records: Vec<BlockRecord> = match version {
            Some(version) => vec![BlockRecord(self.get(version)?)],
            None => self.blocks().iter().map(BlockRecord).collect(),
        };

        Ok(serde_json::to_string_pretty(&records)?)
    }

    /// Write the JSON export to `target`.
    pub fn write_json(&self, target: &Path, version: Option<&str>) -> Result<()> {
        let json = self.to_json(version)?;
        std::fs::write(target, json).map_err(ChangelogError::Io)?;
        debug!(path = %target.display(), "changelog exported to JSON");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::category::Category;
    use crate::clock::FixedClock;
    use crate::document::Changelog;

    fn sample() -> Changelog {
        let mut changelog = Changelog::new("CHANGELOG.md");
        changelog.add(Category::Added, "New feature");
        changelog.add(Category::Changed, "Changed another feature");
        changelog
    }

    #[test]
    fn test_export_unreleased_record() {
        let json: serde_json::Value =
            serde_json::from_str(&sample().to_json(None).unwrap()).unwrap();

        assert_eq!(
            json,
            json!([{
                "metadata": {
                    "version": "unreleased",
                    "release_date": null,
                },
                "added": ["New feature"],
                "changed": ["Changed another feature"],
            }])
        );
    }

    #[test]
    fn test_export_released_record_carries_semantic_version() {
        let mut changelog = sample();
        let date = chrono::NaiveDate::from_ymd_opt(2100, 12, 3).unwrap();
        changelog.release(None, &FixedClock(date)).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&changelog.to_json(None).unwrap()).unwrap();

        assert_eq!(
            json,
            json!([{
                "metadata": {
                    "version": "0.0.1",
                    "release_date": "2100-12-03",
                    "semantic_version": {
                        "major": 0,
                        "minor": 0,
                        "patch": 1,
                        "prerelease": null,
                        "buildmetadata": null,
                    },
                },
                "added": ["New feature"],
                "changed": ["Changed another feature"],
            }])
        );
    }

    #[test]
    fn test_export_single_version() {
        let mut changelog = sample();
        let date = chrono::NaiveDate::from_ymd_opt(2100, 12, 3).unwrap();
        changelog.release(None, &FixedClock(date)).unwrap();
        changelog.add(Category::Fixed, "Pending fix");

        let json: serde_json::Value =
            serde_json::from_str(&changelog.to_json(Some("0.0.1")).unwrap()).unwrap();
        let records = json.as_array().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["metadata"]["version"], "0.0.1");
    }

    #[test]
    fn test_export_unknown_version() {
        let err = sample().to_json(Some("9.9.9")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Version '9.9.9' not available in the Changelog"
        );
    }

    #[test]
    fn test_write_json() {
        let temp = tempfile::TempDir::new().unwrap();
        let target = temp.path().join("CHANGELOG.json");

        sample().write_json(&target, None).unwrap();

        let content = std::fs::read_to_string(&target).unwrap();
        assert!(content.starts_with('['));
        assert!(content.contains("\"unreleased\""));
    }
}
