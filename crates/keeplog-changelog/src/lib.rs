//! keeplog changelog - Keep a Changelog document model, parser and writer
//!
//! The changelog file is the source of truth for a project's release
//! history. This crate parses and validates it, holds it as an ordered
//! in-memory document, derives the next semantic version from the
//! unreleased categories, and serializes back to canonical markdown or
//! a structured JSON export.

pub mod category;
pub mod clock;
pub mod document;
pub mod export;
pub mod parser;
pub mod release_notes;
pub mod version;
pub mod writer;

pub use category::Category;
pub use clock::{Clock, SystemClock};
pub use document::{Changelog, VersionBlock, DEFAULT_CHANGELOG_FILE, UNRELEASED};
pub use parser::ChangelogReader;
pub use release_notes::release_notes;
pub use version::{BumpLevel, SemanticVersion};
