//! Command implementations.

pub mod check;
pub mod config;

use scanguard::{GuardConfig, Validator};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Effective configuration (file plus environment)
    pub config: GuardConfig,

    /// Where the configuration was read from
    pub config_path: PathBuf,

    /// Output format
    pub output_format: OutputFormat,

    /// Whether to show educational explanations
    pub explain: bool,

    /// Verbose output
    pub verbose: bool,
}

impl Context {
    /// Build a validator from the effective configuration.
    pub fn validator(&self) -> anyhow::Result<Validator> {
        Ok(Validator::from_config(&self.config)?)
    }
}
