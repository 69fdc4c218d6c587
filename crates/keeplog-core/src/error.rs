//! Error types for keeplog

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::diagnostics::Severity;

/// Result type alias using KeeplogError
pub type Result<T> = std::result::Result<T, KeeplogError>;

/// Main error type for keeplog operations
#[derive(Debug, Error)]
pub enum KeeplogError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Changelog-related errors
    #[error(transparent)]
    Changelog(#[from] ChangelogError),

    /// Version-related errors
    #[error(transparent)]
    Version(#[from] VersionError),

    /// GitHub API errors
    #[error(transparent)]
    Github(#[from] GithubError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// Missing or malformed `project` section
    #[error("Incorrect project configuration format")]
    InvalidProject { path: PathBuf },

    /// A component is missing its name or changelog path
    #[error("Incorrect component configuration format")]
    InvalidComponent { path: PathBuf },

    /// Component name not present in the configuration
    #[error("Unknown component name: {name}")]
    UnknownComponent { path: PathBuf, name: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Changelog-related errors
#[derive(Debug, Error)]
pub enum ChangelogError {
    /// Layout validation failed; individual diagnostics were already reported
    #[error("{count} errors detected in the layout")]
    Layout { path: PathBuf, count: usize },

    /// Release requested without an [Unreleased] section
    #[error("Unable to release without [Unreleased] section")]
    MissingUnreleased { path: PathBuf },

    /// The resolved version already exists in the document
    #[error("Unable to release an already released version '{version}'")]
    AlreadyReleased { path: PathBuf, version: String },

    /// The resolved version predates the last release
    #[error("Unable to release a version older than the last release '{current}'")]
    OlderThanCurrent {
        path: PathBuf,
        version: String,
        current: String,
    },

    /// Version lookup failed
    #[error("Version '{version}' not available in the Changelog")]
    UnknownVersion { path: PathBuf, version: String },

    /// The document holds no versions at all
    #[error("No versions available")]
    NoVersions { path: PathBuf },

    /// The document holds only an [Unreleased] section
    #[error("Only an Unreleased version is available")]
    OnlyUnreleased { path: PathBuf },

    /// Not enough released versions for a `previous` lookup
    #[error("No previous versions available")]
    NoPreviousVersions { path: PathBuf },

    /// Attempted to create a changelog file that already exists
    #[error("File already exists")]
    FileExists { path: PathBuf },

    /// Category identifier outside the fixed registry
    #[error("Incompatible change type '{name}', MUST be one of: {accepted}")]
    UnknownCategory { name: String, accepted: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ChangelogError {
    /// File the condition was detected in, when known.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Layout { path, .. }
            | Self::MissingUnreleased { path }
            | Self::AlreadyReleased { path, .. }
            | Self::OlderThanCurrent { path, .. }
            | Self::UnknownVersion { path, .. }
            | Self::NoVersions { path }
            | Self::OnlyUnreleased { path }
            | Self::NoPreviousVersions { path }
            | Self::FileExists { path } => Some(path),
            Self::UnknownCategory { .. } | Self::Io(_) => None,
        }
    }
}

/// Version-related errors
#[derive(Debug, Error)]
pub enum VersionError {
    /// Failed to parse a version string
    #[error("Version '{0}' is not SemVer compliant")]
    NotSemver(String),
}

/// GitHub API errors
#[derive(Debug, Error)]
pub enum GithubError {
    /// Request could not be completed
    #[error("Failure during GitHub request:\n  URL:    {url}\n  Method: {method}\n  Reason: {reason}")]
    RequestFailed {
        url: String,
        method: String,
        reason: String,
    },

    /// The API answered with a non-success status
    #[error("GitHub API returned {status} for {url}")]
    Api { status: u16, url: String },
}

impl KeeplogError {
    /// Classify the condition per the Error/Warning/Info taxonomy.
    ///
    /// The CLI maps `Warning` and `Info` to a successful exit and `Error`
    /// to a failing exit after rendering the condition.
    pub fn severity(&self) -> Severity {
        match self {
            Self::Changelog(err) => match err {
                ChangelogError::UnknownVersion { .. }
                | ChangelogError::NoVersions { .. }
                | ChangelogError::OnlyUnreleased { .. }
                | ChangelogError::NoPreviousVersions { .. } => Severity::Warning,
                ChangelogError::FileExists { .. } => Severity::Info,
                _ => Severity::Error,
            },
            _ => Severity::Error,
        }
    }

    /// File the condition was detected in, when known.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Changelog(err) => err.path(),
            Self::Config(ConfigError::NotFound(path)) => Some(path),
            Self::Config(
                ConfigError::InvalidProject { path }
                | ConfigError::InvalidComponent { path }
                | ConfigError::UnknownComponent { path, .. },
            ) => Some(path),
            _ => None,
        }
    }
}
