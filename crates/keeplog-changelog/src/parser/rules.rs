//! Layout validation rules
//!
//! The Keep a Changelog layout checks run as an ordered rule table over
//! every line. Each rule yields zero or more diagnostics; the caller
//! aggregates them and decides whether to abort. Rules never abort on
//! their own, so a single pass reports every violation in the file.

use std::path::Path;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use keeplog_core::diagnostics::{ColumnSpan, Diagnostic};

use crate::category::Category;
use crate::document::UNRELEASED;

static HEADING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6}) (.*)").expect("invalid regex"));

static VERSION_TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(.*)\](.*)").expect("invalid regex"));

static METADATA_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ - (.*)").expect("invalid regex"));

static DATE_SHAPE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}").expect("invalid regex"));

static ENTRY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+*] (.*)").expect("invalid regex"));

/// A single line under validation.
pub(crate) struct LineContext<'a> {
    pub path: &'a Path,
    /// One-based line number
    pub number: usize,
    pub line: &'a str,
}

impl LineContext<'_> {
    fn error(&self, message: impl Into<String>, column: ColumnSpan) -> Diagnostic {
        Diagnostic::error(self.path, message)
            .with_line(self.number, self.line)
            .with_column(column)
    }
}

pub(crate) type LayoutRule = fn(&LineContext) -> Vec<Diagnostic>;

/// The ordered layout rule table.
pub(crate) const LAYOUT_RULES: &[LayoutRule] = &[
    heading_depth_rule,
    version_heading_rule,
    category_heading_rule,
    entry_nesting_rule,
];

/// The unreleased tag accepts conventional casing only.
pub(crate) fn is_unreleased_tag(tag: &str) -> bool {
    tag == "Unreleased" || tag == UNRELEASED
}

/// Split a heading line into depth and content.
fn heading(line: &str) -> Option<(usize, &str)> {
    let caps = HEADING_REGEX.captures(line)?;
    Some((caps[1].len(), caps.get(2)?.as_str()))
}

/// The convention allows at most three heading levels.
fn heading_depth_rule(ctx: &LineContext) -> Vec<Diagnostic> {
    let Some((depth, _)) = heading(ctx.line) else {
        return Vec::new();
    };

    if depth <= 3 {
        return Vec::new();
    }

    vec![ctx.error(
        "Heading depth is too high, MUST be less or equal to 3",
        ColumnSpan::range(4, depth - 3),
    )]
}

/// A depth-2 heading must read `[<version>] - <yyyy-mm-dd>`, with the
/// literal `[Unreleased]` exempt from the trailing metadata.
fn version_heading_rule(ctx: &LineContext) -> Vec<Diagnostic> {
    let Some((depth, content)) = heading(ctx.line) else {
        return Vec::new();
    };
    if depth != 2 {
        return Vec::new();
    }

    let mut diagnostics = Vec::new();

    let Some(caps) = VERSION_TAG_REGEX.captures(content) else {
        diagnostics.push(ctx.error(
            "Missing version tag",
            ColumnSpan::range(depth + 2, content.len()),
        ));
        return diagnostics;
    };

    let version = &caps[1];
    if is_unreleased_tag(version) {
        return diagnostics;
    }

    // The raw tag must be SemVer as written; a leading `v` is not excused.
    if semver::Version::parse(version).is_err() {
        let start = ctx.line.find('[').map_or(depth + 2, |index| index + 2);
        diagnostics.push(ctx.error(
            format!("Incompatible version '{version}' specified, MUST be SemVer compliant"),
            ColumnSpan::range(start, version.len()),
        ));
    }

    let Some(metadata) = METADATA_REGEX.captures(&caps[2]) else {
        let start = ctx.line.find(']').map_or(depth + 2, |index| index + 3);
        diagnostics.push(ctx.error(
            format!("Missing metadata ('-') for release version '{version}'"),
            ColumnSpan::at(start),
        ));
        return diagnostics;
    };

    let release_date = metadata[1].to_string();
    let date_start = ctx.line.find(" - ").map_or(depth + 2, |index| index + 4);

    if !DATE_SHAPE_REGEX.is_match(&release_date) {
        diagnostics.push(ctx.error(
            format!("Incompatible release date for release version '{version}', MUST be 'yyyy-mm-dd'"),
            ColumnSpan::at(date_start),
        ));
        return diagnostics;
    }

    if NaiveDate::parse_from_str(release_date.trim_end(), "%Y-%m-%d").is_err() {
        diagnostics.push(ctx.error(
            format!("Incompatible release date for release version '{version}', MUST be 'yyyy-mm-dd'"),
            ColumnSpan::range(date_start, release_date.len()),
        ));
    }

    diagnostics
}

/// A depth-3 heading must spell one of the category headings.
fn category_heading_rule(ctx: &LineContext) -> Vec<Diagnostic> {
    let Some((depth, content)) = heading(ctx.line) else {
        return Vec::new();
    };
    if depth != 3 {
        return Vec::new();
    }

    if Category::from_heading(content).is_some() {
        return Vec::new();
    }

    vec![ctx.error(
        format!(
            "Incompatible change type provided, MUST be one of: {}",
            Category::accepted_headings()
        ),
        ColumnSpan::range(depth + 2, content.len()),
    )]
}

/// Entry lines carry free text only: no nested headings, numbered lists,
/// sub-lists or block quotes.
fn entry_nesting_rule(ctx: &LineContext) -> Vec<Diagnostic> {
    static NESTING_RULES: LazyLock<[(Regex, &str); 4]> = LazyLock::new(|| {
        [
            (
                Regex::new(r"^(#{1,6}) .*").expect("invalid regex"),
                "Headings are not permitted in changelog entries",
            ),
            (
                Regex::new(r"^([0-9]+\.) .*").expect("invalid regex"),
                "Numbered lists are not permitted in changelog entries",
            ),
            (
                Regex::new(r"^([+*-]) .*").expect("invalid regex"),
                "Sub-lists are not permitted in changelog entries",
            ),
            (
                Regex::new(r"^(>+) .*").expect("invalid regex"),
                "Block quotes are not permitted in changelog entries",
            ),
        ]
    });

    let Some(caps) = ENTRY_REGEX.captures(ctx.line) else {
        return Vec::new();
    };
    let entry = &caps[1];

    let mut diagnostics = Vec::new();
    for (pattern, message) in NESTING_RULES.iter() {
        if let Some(caps) = pattern.captures(entry) {
            diagnostics.push(ctx.error(*message, ColumnSpan::range(3, caps[1].len())));
        }
    }

    diagnostics
}
