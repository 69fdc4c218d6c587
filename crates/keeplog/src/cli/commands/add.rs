//! Add command

use clap::Args;
use dialoguer::{Confirm, Input, Select};
use tracing::info;

use keeplog_changelog::Category;
use keeplog_core::error::{ChangelogError, KeeplogError, Result};

use crate::cli::Context;

/// Add a new message to the changelog
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Type of the change
    #[arg(short = 't', long = "change-type")]
    pub change_type: Option<String>,

    /// Changelog entry
    #[arg(short, long)]
    pub message: Option<String>,
}

impl AddCommand {
    /// Execute the add command
    ///
    /// Missing flags are collected interactively; interactive sessions end
    /// with a confirmation before the file is rewritten.
    pub fn execute(&self, ctx: &mut Context) -> Result<()> {
        info!(change_type = ?self.change_type, "executing add command");
        let mut prompted = false;

        let category = match &self.change_type {
            Some(identifier) => parse_category(identifier)?,
            None => {
                prompted = true;
                let identifiers: Vec<&str> =
                    Category::ALL.iter().map(Category::identifier).collect();
                let selection = Select::new()
                    .with_prompt("Specify the type of your change")
                    .items(&identifiers)
                    .default(0)
                    .interact()
                    .map_err(prompt_error)?;
                Category::ALL[selection]
            }
        };

        let message = match &self.message {
            Some(message) => message.clone(),
            None => {
                prompted = true;
                Input::new()
                    .with_prompt("Message of the changelog entry to add")
                    .interact_text()
                    .map_err(prompt_error)?
            }
        };

        let apply = if prompted {
            Confirm::new()
                .with_prompt("Apply changes to your CHANGELOG.md")
                .default(true)
                .interact()
                .map_err(prompt_error)?
        } else {
            true
        };

        ctx.changelog.add(category, message);

        if apply {
            ctx.changelog.write_to_file()?;
        }
        Ok(())
    }
}

/// Map a CLI identifier onto the closed category set.
fn parse_category(identifier: &str) -> Result<Category> {
    identifier.parse().map_err(|()| {
        ChangelogError::UnknownCategory {
            name: identifier.to_string(),
            accepted: Category::ALL.map(|category| category.identifier()).join(", "),
        }
        .into()
    })
}

fn prompt_error(err: dialoguer::Error) -> KeeplogError {
    KeeplogError::Io(std::io::Error::other(err))
}
