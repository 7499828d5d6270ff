//! Core types for the scanguard outbound URL validator.
//!
//! This crate provides the foundational types shared across the workspace:
//!
//! - **Policy**: the immutable allow/deny configuration read once at startup
//! - **Patterns**: wildcard host patterns used by the whitelist and blacklist
//! - **Results**: the [`ValidationResult`] handed to callers after a pass
//! - **Rejections**: the typed [`Rejection`] taxonomy for every failed check
//!
//! # Example
//!
//! ```rust
//! use scanguard_core::{HostPattern, Policy};
//!
//! let policy = Policy::default().with_whitelist(["*.example.com"]);
//! assert!(policy.whitelist_active());
//! assert!(HostPattern::new("*.example.com").matches("api.example.com"));
//! ```

#![doc(html_root_url = "https://docs.rs/scanguard-core/0.3.0")]

mod error;
pub mod types;

pub use error::{Rejection, Result};
pub use types::*;
