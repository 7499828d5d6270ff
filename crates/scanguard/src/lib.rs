//! Outbound URL guard for security scanners.
//!
//! Every URL a scan is about to hit goes through [`Validator::validate`]
//! first. The validator refuses localhost, private, loopback and link-local
//! targets (subject to [`Policy`]), and pins the address it resolved so the
//! scanner can connect to exactly what was checked.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use scanguard::{Policy, Validator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), scanguard::Rejection> {
//!     let validator = Validator::new(Policy::default());
//!
//!     let result = validator
//!         .validate_with_resolution("https://example.com/openapi.yaml")
//!         .await?;
//!     println!("connect to {:?}", result.resolved_ip);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `default` - Includes the hickory resolver backend
//! - `hickory` - Allow `backend = "hickory"` in [`ResolverSettings`]

#![doc(html_root_url = "https://docs.rs/scanguard/0.3.0")]

pub mod config;
mod error;
mod validator;

pub use config::{GuardConfig, ResolverBackend, ResolverSettings};
pub use error::GuardError;
pub use validator::{Validator, ValidatorBuilder};

pub use scanguard_core::{matches, HostPattern, Policy, Rejection, Result, ValidationResult};
pub use scanguard_net::{
    classify, is_link_local, is_loopback, is_private_network, AddressClass, DnsCache,
    HostResolver, NetError, NetResult, SystemResolver, DNS_CACHE_TTL,
};
#[cfg(feature = "hickory")]
pub use scanguard_net::HickoryResolver;
