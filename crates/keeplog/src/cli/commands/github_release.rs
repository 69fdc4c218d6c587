//! GitHub release command

use clap::Args;
use console::style;
use tracing::info;

use keeplog_core::error::Result;

use crate::cli::Context;
use crate::github::GitHub;

/// Replace draft releases on GitHub with a release for the upcoming version
#[derive(Debug, Args)]
pub struct GithubReleaseCommand {
    /// Repository, as `owner/repo`
    #[arg(short, long)]
    pub repository: String,

    /// GitHub token
    #[arg(short = 't', long)]
    pub github_token: String,

    /// Create the release in draft state (default)
    #[arg(long, overrides_with = "release")]
    pub draft: bool,

    /// Create the release in published state
    #[arg(long)]
    pub release: bool,
}

impl GithubReleaseCommand {
    /// Execute the github-release command
    pub fn execute(&self, ctx: &Context) -> Result<()> {
        let draft = self.draft || !self.release;
        info!(repository = %self.repository, draft, "executing github-release command");

        let github = GitHub::new(&self.repository, &self.github_token)?;
        github.delete_draft_releases()?;
        github.create_release(&ctx.changelog, draft)?;

        println!(
            "{} Created {} release on {}",
            style("✓").green().bold(),
            if draft { "draft" } else { "published" },
            style(&self.repository).cyan()
        );
        Ok(())
    }
}
