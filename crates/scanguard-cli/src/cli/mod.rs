//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;
use std::process::ExitCode;

use crate::output::OutputFormat;

/// Run the CLI application.
///
/// Exits non-zero when any checked target is rejected.
pub async fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    crate::logging::init_logging(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Load configuration
    let config_path = crate::config::resolve_path(cli.config)?;
    let config = crate::config::load(&config_path)?;

    // Create context for commands
    let ctx = commands::Context {
        config,
        config_path,
        output_format: cli.output.unwrap_or(OutputFormat::Pretty),
        explain: cli.explain,
        verbose: cli.verbose,
    };

    // Dispatch to appropriate command
    match cli.command {
        Commands::Check(args) => commands::check::execute(ctx, args).await,
        Commands::Config(args) => commands::config::execute(ctx, args),
    }
}
