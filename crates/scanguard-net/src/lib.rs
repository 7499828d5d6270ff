//! Network-level building blocks for scanguard.
//!
//! - [`classify`]: loopback / link-local / private classification of resolved addresses
//! - [`cache`]: short-lived host-to-address pins that defeat DNS rebinding
//! - [`dns`]: the [`HostResolver`] seam and its platform and hickory implementations

#![doc(html_root_url = "https://docs.rs/scanguard-net/0.3.0")]

mod error;

pub mod cache;
pub mod classify;
pub mod dns;

pub use cache::{DnsCache, DNS_CACHE_TTL};
pub use classify::{classify, is_link_local, is_loopback, is_private_network, AddressClass};
#[cfg(feature = "hickory")]
pub use dns::HickoryResolver;
pub use dns::{HostResolver, SystemResolver};
pub use error::{NetError, NetResult};
