//! Release notes rendering for GitHub releases

use crate::category::Category;
use crate::document::VersionBlock;

/// Render a markdown release-notes body for a version block.
///
/// Categories appear in registry order under `:emoji: Title` headings,
/// with one bullet per recorded message. Section blocks are joined by a
/// single newline, no blank line in between.
pub fn release_notes(block: &VersionBlock) -> String {
    let mut sections = Vec::new();

    for category in Category::ALL {
        let Some(messages) = block.entries(category) else {
            continue;
        };

        let mut section = format!("### :{}: {}", category.emoji(), category.title());
        for message in messages {
            section.push_str(&format!("\n* {}", message));
        }
        sections.push(section);
    }

    format!("## What's changed\n\n{}", sections.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_notes_sections_in_registry_order() {
        let mut block = VersionBlock::unreleased();
        block.push(Category::Fixed, "Fixed some bug");
        block.push(Category::Added, "New feature");
        block.push(Category::Added, "Another feature");

        let notes = release_notes(&block);
        assert_eq!(
            notes,
            "## What's changed\n\n\
             ### :rocket: New Features\n\
             * New feature\n\
             * Another feature\n\
             ### :bug: Bug Fixes\n\
             * Fixed some bug"
        );
    }

    #[test]
    fn test_release_notes_empty_block() {
        let block = VersionBlock::unreleased();
        assert_eq!(release_notes(&block), "## What's changed\n\n");
    }
}
