//! Canonical markdown serialization
//!
//! Writes the document back to the Keep a Changelog text form the parser
//! accepts, most recent version first. `parse(write(doc))` reproduces the
//! same document for entries free of markdown syntax.

use tracing::debug;

use keeplog_core::error::{ChangelogError, Result};

use crate::document::Changelog;

impl Changelog {
    /// Render the document as canonical changelog markdown.
    pub fn to_markdown(&self) -> String {
        let mut output = String::from("# Changelog\n");

        for block in self.blocks() {
            output.push('\n');

            if block.is_unreleased() {
                output.push_str("## [Unreleased]\n");
            } else {
                // Released blocks always carry a date; parsing and release
                // stamping both guarantee it.
                let date = block
                    .metadata
                    .release_date
                    .map(|date| date.format("%Y-%m-%d").to_string())
                    .unwrap_or_default();
                output.push_str(&format!("## [{}] - {}\n", block.key(), date));
            }

            let mut first_category = true;
            for (category, messages) in block.changes() {
                if !first_category {
                    output.push('\n');
                }
                first_category = false;

                output.push_str(&format!("### {}\n", category.heading()));
                for message in messages {
                    output.push_str(&format!("- {}\n", message));
                }
            }
        }

        output
    }

    /// Write the canonical markdown to the bound changelog file.
    pub fn write_to_file(&self) -> Result<()> {
        let markdown = self.to_markdown();
        std::fs::write(self.path(), &markdown).map_err(ChangelogError::Io)?;
        debug!(path = %self.path().display(), bytes = markdown.len(), "changelog written");
        Ok(())
    }
}
