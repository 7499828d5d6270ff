//! scanguard - check scan targets against the outbound URL policy.

use anyhow::Result;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    scanguard_cli::run().await
}
