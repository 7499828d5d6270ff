//! # scanguard-cli
//!
//! Command-line front end for the scanguard URL validator.
//!
//! ## Features
//!
//! - **Target checks**: run URLs through the same validation a scanner does
//! - **Address pinning**: `--pin` prints the address a scanner should connect to
//! - **Educational mode**: `--explain` walks through each validation step
//! - **Output formats**: colored text or JSON for scripting

pub mod cli;
pub mod config;
pub mod education;
pub mod logging;
pub mod output;

pub use cli::run;
