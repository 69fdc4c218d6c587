//! Create command

use clap::Args;
use console::style;
use tracing::info;

use keeplog_core::error::{ChangelogError, Result};

use crate::cli::Context;

/// Create a new (empty) changelog file
#[derive(Debug, Args)]
pub struct CreateCommand {}

impl CreateCommand {
    /// Execute the create command
    pub fn execute(&self, ctx: &Context) -> Result<()> {
        info!(path = %ctx.changelog.path().display(), "executing create command");

        if ctx.changelog.exists() {
            return Err(ChangelogError::FileExists {
                path: ctx.changelog.path().to_path_buf(),
            }
            .into());
        }

        ctx.changelog.write_to_file()?;

        println!(
            "{} Created {}",
            style("✓").green().bold(),
            style(ctx.changelog.path().display()).cyan()
        );
        Ok(())
    }
}
