//! Exit codes for the CLI

/// Success, including warning- and info-level conditions
pub const SUCCESS: i32 = 0;

/// General error
pub const ERROR: i32 = 1;

/// Configuration error
pub const CONFIG_ERROR: i32 = 2;

/// Changelog validation error
pub const VALIDATION_ERROR: i32 = 3;

/// Version error
pub const VERSION_ERROR: i32 = 4;

/// GitHub API error
pub const GITHUB_ERROR: i32 = 5;
