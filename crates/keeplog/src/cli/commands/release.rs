//! Release command

use clap::Args;
use console::style;
use tracing::info;

use keeplog_changelog::SystemClock;
use keeplog_core::error::Result;

use crate::cli::Context;

/// Release changes added to the [Unreleased] block
#[derive(Debug, Args)]
pub struct ReleaseCommand {
    /// Version to release, defaults to auto-resolve
    #[arg(long)]
    pub override_version: Option<String>,
}

impl ReleaseCommand {
    /// Execute the release command
    pub fn execute(&self, ctx: &mut Context) -> Result<()> {
        info!(override_version = ?self.override_version, "executing release command");

        let version = ctx
            .changelog
            .release(self.override_version.as_deref(), &SystemClock)?;
        ctx.changelog.write_to_file()?;

        println!(
            "{} Released {}",
            style("✓").green().bold(),
            style(&version).cyan()
        );
        Ok(())
    }
}
