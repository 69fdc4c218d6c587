//! JSON export command

use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use keeplog_core::error::Result;

use crate::cli::Context;

/// Export the changelog to a JSON file
#[derive(Debug, Args)]
pub struct ToJsonCommand {
    /// Filename of the JSON output
    #[arg(long, default_value = "CHANGELOG.json")]
    pub file_name: PathBuf,

    /// Export a single version instead of the whole document
    #[arg(long)]
    pub version: Option<String>,
}

impl ToJsonCommand {
    /// Execute the to-json command
    pub fn execute(&self, ctx: &Context) -> Result<()> {
        info!(target = %self.file_name.display(), version = ?self.version, "executing to-json command");

        ctx.changelog
            .write_json(&self.file_name, self.version.as_deref())?;

        println!(
            "{} Exported {}",
            style("✓").green().bold(),
            style(self.file_name.display()).cyan()
        );
        Ok(())
    }
}
