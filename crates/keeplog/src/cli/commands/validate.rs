//! Validate command

use clap::Args;
use console::style;

use keeplog_core::error::Result;

use crate::cli::Context;

/// Validate the changelog for inconsistencies
///
/// Validation happens while the changelog loads; reaching this command
/// means the layout passed and any content warnings were reported.
#[derive(Debug, Args)]
pub struct ValidateCommand {}

impl ValidateCommand {
    /// Execute the validate command
    pub fn execute(&self, ctx: &Context) -> Result<()> {
        println!(
            "{} {} is a valid changelog",
            style("✓").green().bold(),
            style(ctx.changelog.path().display()).cyan()
        );
        Ok(())
    }
}
