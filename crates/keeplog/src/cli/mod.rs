//! CLI definition and command handling

pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;

use keeplog_changelog::{Changelog, ChangelogReader, DEFAULT_CHANGELOG_FILE};
use keeplog_core::config::component_changelog;
use keeplog_core::diagnostics::{Diagnostic, DiagnosticFormat, Severity};
use keeplog_core::error::Result;

use commands::{
    AddCommand, CreateCommand, GithubReleaseCommand, ReleaseCommand, ToJsonCommand,
    ValidateCommand, VersionCommand,
};

/// (Keep a) Changelog Manager
#[derive(Debug, Parser)]
#[command(name = "keeplog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file with per-component changelog paths
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Name of the component to update
    #[arg(long, global = true, default_value = "default")]
    pub component: String,

    /// Type of formatting to apply to reported diagnostics
    #[arg(short = 'f', long, global = true, default_value = "llvm")]
    pub error_format: ErrorFormat,

    /// Changelog file to work with
    #[arg(long, global = true, default_value = DEFAULT_CHANGELOG_FILE)]
    pub input_file: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

/// Diagnostic rendering style
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ErrorFormat {
    /// `path:line:col: severity: message` with a source excerpt
    #[default]
    Llvm,
    /// GitHub Actions workflow commands
    Github,
}

impl From<ErrorFormat> for DiagnosticFormat {
    fn from(format: ErrorFormat) -> Self {
        match format {
            ErrorFormat::Llvm => DiagnosticFormat::Llvm,
            ErrorFormat::Github => DiagnosticFormat::Github,
        }
    }
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new (empty) changelog file
    Create(CreateCommand),

    /// Retrieve versions from the changelog
    Version(VersionCommand),

    /// Validate the changelog for inconsistencies
    Validate(ValidateCommand),

    /// Add a new message to the changelog
    Add(AddCommand),

    /// Release changes added to the [Unreleased] block
    Release(ReleaseCommand),

    /// Export the changelog to a JSON file
    ToJson(ToJsonCommand),

    /// Replace draft releases on GitHub with a release for the upcoming version
    GithubRelease(GithubReleaseCommand),
}

/// Shared state handed to every command
pub struct Context {
    pub changelog: Changelog,
    pub format: DiagnosticFormat,
}

impl Cli {
    /// Resolve the changelog path, parse it, and run the requested command.
    pub fn execute(self) -> Result<()> {
        let path = match &self.config {
            Some(config) => component_changelog(config, &self.component)?,
            None => self.input_file.clone(),
        };

        let format = self.error_format.into();

        let mut reader = ChangelogReader::new(&path);
        let result = reader.read();
        report(reader.diagnostics(), format);
        let changelog = result?;

        let mut ctx = Context { changelog, format };

        match &self.command {
            Commands::Create(cmd) => cmd.execute(&ctx),
            Commands::Version(cmd) => cmd.execute(&ctx),
            Commands::Validate(cmd) => cmd.execute(&ctx),
            Commands::Add(cmd) => cmd.execute(&mut ctx),
            Commands::Release(cmd) => cmd.execute(&mut ctx),
            Commands::ToJson(cmd) => cmd.execute(&ctx),
            Commands::GithubRelease(cmd) => cmd.execute(&ctx),
        }
    }
}

/// Render a diagnostic, colored by severity for terminal styles.
pub fn styled(diagnostic: &Diagnostic, format: DiagnosticFormat) -> String {
    let rendered = diagnostic.render(format);

    // Workflow commands are machine-read; leave them unstyled.
    if format == DiagnosticFormat::Github {
        return rendered;
    }

    match diagnostic.severity {
        Severity::Error => style(rendered).red().to_string(),
        Severity::Warning => style(rendered).yellow().to_string(),
        Severity::Info => style(rendered).cyan().to_string(),
    }
}

/// Print a batch of diagnostics to stderr.
fn report(diagnostics: &[Diagnostic], format: DiagnosticFormat) {
    for diagnostic in diagnostics {
        eprintln!("{}", styled(diagnostic, format));
    }
}
