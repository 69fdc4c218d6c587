//! keeplog core - shared errors, diagnostics and configuration
//!
//! This crate provides the foundation types used by the changelog model
//! and the CLI: the error taxonomy with its Error/Warning/Info severity
//! classification, located diagnostics, and multi-component configuration.

pub mod config;
pub mod diagnostics;
pub mod error;

pub use config::{component_changelog, load_config, Config};
pub use diagnostics::{ColumnSpan, Diagnostic, DiagnosticFormat, Severity};
pub use error::{ChangelogError, ConfigError, GithubError, KeeplogError, Result, VersionError};
