//! Version command

use clap::Args;
use tracing::info;

use keeplog_core::error::Result;

use crate::cli::Context;

/// Which version to retrieve
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum VersionReference {
    /// Second most recent released version
    Previous,
    /// Most recent released version
    #[default]
    Current,
    /// Version the unreleased changes would release as
    Future,
}

/// Retrieve versions from the changelog
#[derive(Debug, Args)]
pub struct VersionCommand {
    /// Which version to retrieve
    #[arg(short, long, default_value = "current")]
    pub reference: VersionReference,
}

impl VersionCommand {
    /// Execute the version command
    pub fn execute(&self, ctx: &Context) -> Result<()> {
        info!(reference = ?self.reference, "executing version command");

        let version = match self.reference {
            VersionReference::Current => ctx.changelog.current_version()?,
            VersionReference::Previous => ctx.changelog.previous_version()?,
            VersionReference::Future => ctx.changelog.suggest_future_version()?,
        };

        println!("{version}");
        Ok(())
    }
}
