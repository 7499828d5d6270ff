//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Check scan targets against the outbound URL policy
///
/// Refuses localhost, private, loopback and link-local targets before a
/// scanner ever connects to them. Use --explain to see each step.
#[derive(Parser, Debug)]
#[command(name = "scanguard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file (defaults to the per-user config.toml)
    #[arg(short, long, env = "SCANGUARD_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Explain what this command does (educational mode)
    #[arg(long, global = true)]
    pub explain: bool,

    /// Increase verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate one or more target URLs
    Check(CheckArgs),

    /// Inspect the effective configuration
    Config(ConfigArgs),
}

// ============================================================================
// Check command
// ============================================================================

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// URLs to validate (e.g., https://api.example.com/openapi.json)
    #[arg(required = true)]
    pub urls: Vec<String>,

    /// Also validate a Host header override (host or host:port)
    #[arg(long, value_name = "HOST")]
    pub host_override: Option<String>,

    /// Report the pinned address a scanner should connect to
    #[arg(long)]
    pub pin: bool,
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration (file plus environment)
    Show,

    /// Show the config file path
    Path,
}
