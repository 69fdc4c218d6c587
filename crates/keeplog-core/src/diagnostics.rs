//! Structured diagnostics for layout and content validation
//!
//! Layout validation walks the changelog line by line and collects every
//! violation before deciding whether to abort, so diagnostics are plain
//! values rather than errors: each carries a severity, a location and a
//! message, and can be rendered in either `llvm` or `github` style.

use std::path::PathBuf;

use serde::Serialize;

/// Condition severity, ordered Info < Warning < Error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A one-based column range within a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnSpan {
    /// First column of the offending token
    pub start: usize,
    /// Token length, when known
    pub length: Option<usize>,
}

impl ColumnSpan {
    /// Span starting at `start` with no known length.
    pub fn at(start: usize) -> Self {
        Self {
            start,
            length: None,
        }
    }

    /// Span covering `length` columns from `start`.
    pub fn range(start: usize, length: usize) -> Self {
        Self {
            start,
            length: Some(length),
        }
    }
}

/// Rendering style for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DiagnosticFormat {
    /// `path:line:col: severity: message` with a source excerpt
    #[default]
    Llvm,
    /// GitHub Actions workflow commands (`::error file=...::message`)
    Github,
}

/// A located validation finding.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub path: PathBuf,
    pub message: String,
    /// One-based line number, absent for whole-file findings
    pub line_number: Option<usize>,
    pub column: Option<ColumnSpan>,
    /// Offending source line, rendered as an excerpt in llvm style
    #[serde(skip)]
    pub source_line: Option<String>,
}

impl Diagnostic {
    /// New error-level diagnostic.
    pub fn error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, path, message)
    }

    /// New warning-level diagnostic.
    pub fn warning(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, path, message)
    }

    /// New diagnostic with an explicit severity.
    pub fn new(severity: Severity, path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            severity,
            path: path.into(),
            message: message.into(),
            line_number: None,
            column: None,
            source_line: None,
        }
    }

    /// Attach the offending line and its one-based number.
    pub fn with_line(mut self, line_number: usize, source_line: impl Into<String>) -> Self {
        self.line_number = Some(line_number);
        self.source_line = Some(source_line.into());
        self
    }

    /// Attach a column span.
    pub fn with_column(mut self, column: ColumnSpan) -> Self {
        self.column = Some(column);
        self
    }

    /// Render for terminal output in the requested style.
    pub fn render(&self, format: DiagnosticFormat) -> String {
        match format {
            DiagnosticFormat::Llvm => self.render_llvm(),
            DiagnosticFormat::Github => self.render_github(),
        }
    }

    fn render_llvm(&self) -> String {
        let mut location = self.path.display().to_string();
        if let Some(line) = self.line_number {
            location.push_str(&format!(":{}", line));
            if let Some(column) = self.column {
                location.push_str(&format!(":{}", column.start));
            }
        }

        let mut output = if location.is_empty() {
            format!("{}: {}", self.severity, self.message)
        } else {
            format!("{}: {}: {}", location, self.severity, self.message)
        };

        if let Some(source) = &self.source_line {
            output.push('\n');
            output.push_str(source.trim_end());
            if let Some(column) = self.column {
                output.push('\n');
                output.push_str(&" ".repeat(column.start.saturating_sub(1)));
                output.push('^');
                if let Some(length) = column.length {
                    output.push_str(&"~".repeat(length.saturating_sub(1)));
                }
            }
        }

        output
    }

    fn render_github(&self) -> String {
        let command = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "notice",
        };

        let mut properties = format!("file={}", self.path.display());
        if let Some(line) = self.line_number {
            properties.push_str(&format!(",line={}", line));
        }
        if let Some(column) = self.column {
            properties.push_str(&format!(",col={}", column.start));
        }

        format!("::{} {}::{}", command, properties, self.message)
    }
}
