//! Validating changelog reader
//!
//! Reading happens in two phases. Phase one runs the layout rule table
//! over every line and aggregates diagnostics; any error aborts the read
//! with the total count and no document is constructed. Phase two walks
//! the extracted document and emits advisory warnings for ordering
//! anomalies. A nonexistent file is not an error: it reads as an empty
//! document.

mod rules;

use std::path::{Path, PathBuf};

use tracing::{debug, instrument, warn};

use keeplog_core::diagnostics::{Diagnostic, Severity};
use keeplog_core::error::{ChangelogError, Result};

use crate::category::Category;
use crate::document::{Changelog, VersionBlock, UNRELEASED};
use crate::version::SemanticVersion;

use rules::{LineContext, LAYOUT_RULES};

/// Reads and validates a changelog file.
///
/// Diagnostics from both phases accumulate on the reader; the boundary
/// renders them as a batch once reading finishes or aborts.
pub struct ChangelogReader {
    path: PathBuf,
    diagnostics: Vec<Diagnostic>,
}

impl ChangelogReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            diagnostics: Vec::new(),
        }
    }

    /// All diagnostics collected so far, in detection order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Read the changelog file, validating layout and contents.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&mut self) -> Result<Changelog> {
        if !self.path.is_file() {
            debug!("changelog file does not exist, starting empty");
            return Ok(Changelog::new(&self.path));
        }

        let content = std::fs::read_to_string(&self.path).map_err(ChangelogError::Io)?;
        self.parse(&content)
    }

    /// Validate and extract changelog text.
    pub fn parse(&mut self, content: &str) -> Result<Changelog> {
        let layout_errors = self.validate_layout(content);
        if layout_errors > 0 {
            warn!(count = layout_errors, "layout validation failed");
            return Err(ChangelogError::Layout {
                path: self.path.clone(),
                count: layout_errors,
            }
            .into());
        }

        let changelog = self.extract(content)?;
        self.validate_contents(&changelog);
        Ok(changelog)
    }

    /// Phase 1: run the layout rule table over every line.
    ///
    /// Returns the number of errors found; all of them are collected
    /// before the caller aborts.
    fn validate_layout(&mut self, content: &str) -> usize {
        let mut errors = 0;

        for (index, line) in content.lines().enumerate() {
            let ctx = LineContext {
                path: &self.path,
                number: index + 1,
                line,
            };

            for rule in LAYOUT_RULES {
                for diagnostic in rule(&ctx) {
                    if diagnostic.severity == Severity::Error {
                        errors += 1;
                    }
                    self.diagnostics.push(diagnostic);
                }
            }
        }

        errors
    }

    /// Group headings and bullet entries into version blocks, in file order.
    fn extract(&self, content: &str) -> Result<Changelog> {
        let mut blocks: Vec<VersionBlock> = Vec::new();
        let mut current_category: Option<Category> = None;

        for line in content.lines() {
            if let Some(rest) = line.strip_prefix("## ") {
                blocks.push(self.extract_block(rest)?);
                current_category = None;
            } else if let Some(heading) = line.strip_prefix("### ") {
                current_category = Category::from_heading(heading.trim_end());
            } else if let Some(entry) = entry_text(line) {
                if let (Some(block), Some(category)) = (blocks.last_mut(), current_category) {
                    block.push(category, entry);
                }
            }
        }

        debug!(blocks = blocks.len(), "changelog extracted");
        Ok(Changelog::from_blocks(&self.path, blocks))
    }

    /// Build a block from validated `[<version>] - <date>` heading content.
    fn extract_block(&self, content: &str) -> Result<VersionBlock> {
        let tag = content
            .split_once(']')
            .map(|(tag, _)| tag.trim_start_matches('['))
            .unwrap_or(content);

        if rules::is_unreleased_tag(tag) {
            return Ok(VersionBlock::unreleased());
        }

        let version = SemanticVersion::parse(tag)?;
        // Layout validation guarantees the ` - yyyy-mm-dd` suffix.
        let date = content
            .split_once(" - ")
            .and_then(|(_, date)| {
                chrono::NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()
            })
            .ok_or_else(|| ChangelogError::Layout {
                path: self.path.clone(),
                count: 1,
            })?;

        Ok(VersionBlock::released(version, date))
    }

    /// Phase 2: advisory ordering checks on the extracted document.
    fn validate_contents(&mut self, changelog: &Changelog) {
        let mut previous: Option<SemanticVersion> = None;

        for (index, block) in changelog.blocks().iter().enumerate() {
            if block.is_unreleased() {
                if index != 0 {
                    self.diagnostics.push(Diagnostic::warning(
                        &self.path,
                        "Unreleased version should be on top of the CHANGELOG.md file",
                    ));
                }
                continue;
            }

            if let Ok(version) = SemanticVersion::parse(block.key()) {
                if let Some(previous) = &previous {
                    if *previous <= version {
                        self.diagnostics.push(Diagnostic::warning(
                            &self.path,
                            format!("Versions are incorrectly ordered: {previous} -> {version}"),
                        ));
                    }
                }
                previous = Some(version);
            }
        }
    }
}

/// Entry text of a `-`/`+`/`*` bullet line, if it is one.
fn entry_text(line: &str) -> Option<&str> {
    let rest = line
        .strip_prefix("- ")
        .or_else(|| line.strip_prefix("+ "))
        .or_else(|| line.strip_prefix("* "))?;
    Some(rest.trim_end())
}
