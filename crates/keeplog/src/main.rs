//! keeplog - Keep a Changelog manager CLI

mod cli;
mod exit_codes;
mod github;

use std::path::Path;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use keeplog_core::diagnostics::{Diagnostic, Severity};
use keeplog_core::error::KeeplogError;

use cli::Cli;

fn main() {
    let _guard = init_tracing();

    let cli = Cli::parse();
    let format = cli.error_format.into();

    if let Err(err) = cli.execute() {
        let path = err.path().map(Path::to_path_buf).unwrap_or_default();
        let diagnostic = Diagnostic::new(err.severity(), path, err.to_string());
        eprintln!("{}", cli::styled(&diagnostic, format));

        std::process::exit(exit_code(&err));
    }
}

/// Warnings and infos leave the process successful; errors map to a code
/// per concern.
fn exit_code(err: &KeeplogError) -> i32 {
    if err.severity() < Severity::Error {
        return exit_codes::SUCCESS;
    }

    match err {
        KeeplogError::Config(_) => exit_codes::CONFIG_ERROR,
        KeeplogError::Changelog(_) => exit_codes::VALIDATION_ERROR,
        KeeplogError::Version(_) => exit_codes::VERSION_ERROR,
        KeeplogError::Github(_) => exit_codes::GITHUB_ERROR,
        _ => exit_codes::ERROR,
    }
}

/// Set up tracing with two layers:
/// - Console: controlled by RUST_LOG (default: warn)
/// - File: always debug-level JSON to ~/.keeplog/logs/
fn init_tracing() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    if let Some(log_dir) = log_directory() {
        let file_appender = tracing_appender::rolling::daily(&log_dir, "keeplog.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_filter(console_filter),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(non_blocking)
                    .with_target(true)
                    .with_filter(EnvFilter::new("debug")),
            )
            .init();

        return Some(guard);
    }

    // Fallback: console only
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_filter(console_filter),
        )
        .init();

    None
}

/// Returns the log directory path, creating it if needed.
fn log_directory() -> Option<std::path::PathBuf> {
    let log_dir = dirs::home_dir()?.join(".keeplog").join("logs");
    std::fs::create_dir_all(&log_dir).ok()?;
    Some(log_dir)
}
