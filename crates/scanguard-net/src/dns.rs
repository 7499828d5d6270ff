//! DNS resolution.

use async_trait::async_trait;
use std::net::IpAddr;
use tracing::warn;

use crate::error::{NetError, NetResult};

/// Turns a host name into the addresses a connection would use.
///
/// Implementations must return at least one address or an error; an empty
/// answer is treated as a failure by callers.
#[async_trait]
pub trait HostResolver: Send + Sync {
    /// Resolve `host` to its addresses
    async fn resolve(&self, host: &str) -> NetResult<Vec<IpAddr>>;
}

/// Resolver backed by the platform's name service (getaddrinfo)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl SystemResolver {
    /// Create a platform resolver
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl HostResolver for SystemResolver {
    async fn resolve(&self, host: &str) -> NetResult<Vec<IpAddr>> {
        use tokio::net::lookup_host;

        // Use port 0 for lookup
        let addr_str = format!("{host}:0");
        let addrs = lookup_host(&addr_str).await.map_err(|e| {
            warn!(host = %host, error = %e, "system resolver failed");
            NetError::Dns(e.to_string())
        })?;

        non_empty(host, addrs.map(|a| a.ip()).collect())
    }
}

/// Resolver backed by hickory, configured from the system resolv.conf
#[cfg(feature = "hickory")]
pub struct HickoryResolver {
    inner: hickory_resolver::TokioResolver,
}

#[cfg(feature = "hickory")]
impl HickoryResolver {
    /// Create a resolver from system configuration
    pub fn new() -> NetResult<Self> {
        let inner = hickory_resolver::TokioResolver::builder_tokio()
            .map_err(|e| NetError::Resolver(format!("failed to create resolver: {e}")))?
            .build();
        Ok(Self { inner })
    }
}

#[cfg(feature = "hickory")]
#[async_trait]
impl HostResolver for HickoryResolver {
    async fn resolve(&self, host: &str) -> NetResult<Vec<IpAddr>> {
        let lookup = self.inner.lookup_ip(host).await.map_err(|e| {
            warn!(host = %host, error = %e, "hickory lookup failed");
            NetError::Dns(e.to_string())
        })?;

        non_empty(host, lookup.iter().collect())
    }
}

fn non_empty(host: &str, addrs: Vec<IpAddr>) -> NetResult<Vec<IpAddr>> {
    if addrs.is_empty() {
        return Err(NetError::Dns(format!("no addresses found for {host}")));
    }
    Ok(addrs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    #[test]
    fn empty_answer_is_an_error() {
        let err = assert_err!(non_empty("void.example", Vec::new()));
        assert!(err.to_string().contains("void.example"));
    }

    #[tokio::test]
    async fn system_resolver_passes_literals_through() {
        let addrs = assert_ok!(SystemResolver::new().resolve("127.0.0.1").await);
        assert_eq!(addrs, vec![IpAddr::from([127, 0, 0, 1])]);
    }
}
