//! The outbound URL validator.
//!
//! Checks run in a fixed order and the first failure rejects the URL:
//!
//! 1. parse as an absolute URL with a host
//! 2. scheme is `http` or `https`
//! 3. an active whitelist decides alone: match passes immediately, miss rejects
//! 4. localhost names, unless allowed
//! 5. blacklist, skipped for localhost when localhost is allowed
//! 6. resolve (bounded by a timeout) and pin the answer in the [`DnsCache`]
//! 7. private ranges, unless allowed
//! 8. loopback, unless localhost is allowed
//! 9. link-local, always
//!
//! Anything ambiguous (unparsable input, resolver error, timeout) is a
//! rejection, never a pass.

use scanguard_core::{Policy, Rejection, Result, ValidationResult};
use scanguard_net::{classify, DnsCache, HostResolver, NetError, SystemResolver};
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use url::{Host, Url};

use crate::config::{GuardConfig, ResolverBackend, DEFAULT_RESOLVE_TIMEOUT};
use crate::error::GuardError;

/// Validates URLs before they are handed to the scanner.
///
/// Cloning is cheap and clones share the same DNS cache.
#[derive(Clone)]
pub struct Validator {
    inner: Arc<ValidatorInner>,
}

struct ValidatorInner {
    policy: Policy,
    cache: DnsCache,
    resolver: Box<dyn HostResolver>,
    resolve_timeout: Duration,
}

/// Parsed pieces of a candidate URL.
struct Target {
    url: Url,
    /// Lowercase domain, or the canonical text of an IP literal
    host: String,
    /// Set when the host is an IP literal and needs no resolution
    literal: Option<IpAddr>,
}

impl Validator {
    /// Create a validator using the platform resolver and default timeout
    #[must_use]
    pub fn new(policy: Policy) -> Self {
        ValidatorBuilder::new(policy).build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder(policy: Policy) -> ValidatorBuilder {
        ValidatorBuilder::new(policy)
    }

    /// Build a validator from loaded configuration
    pub fn from_config(config: &GuardConfig) -> std::result::Result<Self, GuardError> {
        let builder =
            Self::builder(config.policy.clone()).resolve_timeout(config.resolver.timeout());
        let builder = match config.resolver.backend {
            ResolverBackend::System => builder.resolver(SystemResolver::new()),
            ResolverBackend::Hickory => with_hickory(builder)?,
        };
        Ok(builder.build())
    }

    /// The policy this validator enforces
    #[must_use]
    pub fn policy(&self) -> &Policy {
        &self.inner.policy
    }

    /// The pinned-resolution cache
    #[must_use]
    pub fn cache(&self) -> &DnsCache {
        &self.inner.cache
    }

    /// Validate `url`.
    ///
    /// On success the result carries the address this call resolved, or no
    /// address when the host passed through the whitelist.
    pub async fn validate(&self, url: &str) -> Result<ValidationResult> {
        let outcome = match parse_target(url) {
            Ok(target) => self.check(url, &target).await,
            Err(e) => Err(e),
        };
        if let Err(e) = &outcome {
            warn!(url = %url, reason = e.code(), "URL rejected: {e}");
        }
        outcome
    }

    /// Validate `url` and report the address pinned for its host.
    ///
    /// Prefers the unexpired cache entry so the scanner can connect to the
    /// exact address that was checked instead of resolving again.
    pub async fn validate_with_resolution(&self, url: &str) -> Result<ValidationResult> {
        let result = self.validate(url).await?;
        let Ok(target) = parse_target(url) else {
            return Ok(result);
        };
        match self.inner.cache.lookup(&target.host) {
            Some(address) => Ok(ValidationResult::resolved(
                url,
                address.to_string(),
                target.host,
            )),
            None => Ok(result),
        }
    }

    /// Validate a caller-supplied host override (`host` or `host:port`).
    ///
    /// Blank input means no override. Anything else is checked as the URL
    /// `http://{value}` and returned trimmed.
    pub async fn validate_host_override(&self, host_override: &str) -> Result<Option<String>> {
        let trimmed = host_override.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        let synthetic = format!("http://{trimmed}");
        let target = parse_target(&synthetic)?;
        let url = &target.url;
        if !url.username().is_empty()
            || url.password().is_some()
            || url.path() != "/"
            || url.query().is_some()
            || url.fragment().is_some()
        {
            let err = Rejection::InvalidFormat {
                input: trimmed.to_string(),
                reason: "host override must be host or host:port".into(),
            };
            warn!(host_override = %trimmed, "host override rejected: {err}");
            return Err(err);
        }

        self.validate(&synthetic).await?;
        Ok(Some(trimmed.to_string()))
    }

    /// Pinned address for `host`, if one is cached and fresh
    #[must_use]
    pub fn cached_resolution(&self, host: &str) -> Option<IpAddr> {
        self.inner.cache.lookup(host)
    }

    /// Forget every pinned resolution
    pub fn clear_dns_cache(&self) {
        self.inner.cache.clear();
        info!("DNS cache cleared");
    }

    /// One-line description of the active policy
    #[must_use]
    pub fn configuration_summary(&self) -> String {
        self.inner.policy.to_string()
    }

    async fn check(&self, url: &str, target: &Target) -> Result<ValidationResult> {
        let policy = &self.inner.policy;
        let host = target.host.as_str();

        if policy.whitelist_active() {
            if !policy.is_whitelisted(host) {
                return Err(Rejection::NotWhitelisted { host: host.into() });
            }
            info!(url = %url, "URL is whitelisted for scanning");
            return Ok(ValidationResult::unresolved(url));
        }

        let localhost = is_localhost_name(host);
        if localhost && !policy.allow_localhost {
            return Err(Rejection::LocalhostDisallowed { host: host.into() });
        }
        if !(localhost && policy.allow_localhost) && policy.is_blacklisted(host) {
            return Err(Rejection::Blacklisted { host: host.into() });
        }

        let addresses = self.resolve(target).await?;
        let Some(&pinned) = addresses.first() else {
            return Err(Rejection::UnresolvableHost {
                host: host.into(),
                reason: "no addresses".into(),
            });
        };
        self.inner.cache.put(host, pinned);

        self.check_addresses(host, &addresses)?;

        info!(url = %url, address = %pinned, "URL passed validation checks");
        Ok(ValidationResult::resolved(url, pinned.to_string(), host))
    }

    async fn resolve(&self, target: &Target) -> Result<Vec<IpAddr>> {
        if let Some(ip) = target.literal {
            return Ok(vec![ip]);
        }

        let timeout = self.inner.resolve_timeout;
        let answer = tokio::time::timeout(timeout, self.inner.resolver.resolve(&target.host))
            .await
            .unwrap_or_else(|_| {
                Err(NetError::Timeout(
                    u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                ))
            });

        answer.map_err(|e| Rejection::UnresolvableHost {
            host: target.host.clone(),
            reason: e.to_string(),
        })
    }

    /// Each check runs over every address before the next check starts, so
    /// the reported reason follows the private, loopback, link-local order.
    fn check_addresses(&self, host: &str, addresses: &[IpAddr]) -> Result<()> {
        let policy = &self.inner.policy;
        let classes: Vec<_> = addresses.iter().map(|&ip| (ip, classify(ip))).collect();

        if !policy.allow_private_networks {
            if let Some(&(address, _)) = classes.iter().find(|(_, c)| c.private_network) {
                return Err(Rejection::PrivateNetworkDisallowed {
                    host: host.into(),
                    address,
                });
            }
        }
        if !policy.allow_localhost {
            if let Some(&(address, _)) = classes.iter().find(|(_, c)| c.loopback) {
                return Err(Rejection::LoopbackDisallowed {
                    host: host.into(),
                    address,
                });
            }
        }
        if let Some(&(address, _)) = classes.iter().find(|(_, c)| c.link_local) {
            return Err(Rejection::LinkLocalDisallowed {
                host: host.into(),
                address,
            });
        }
        Ok(())
    }
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator")
            .field("policy", &self.inner.policy)
            .field("resolve_timeout", &self.inner.resolve_timeout)
            .field("cached_hosts", &self.inner.cache.len())
            .finish_non_exhaustive()
    }
}

/// Builder for configuring a [`Validator`]
pub struct ValidatorBuilder {
    policy: Policy,
    cache: Option<DnsCache>,
    resolver: Option<Box<dyn HostResolver>>,
    resolve_timeout: Duration,
}

impl ValidatorBuilder {
    /// Create a new builder enforcing `policy`
    #[must_use]
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            cache: None,
            resolver: None,
            resolve_timeout: DEFAULT_RESOLVE_TIMEOUT,
        }
    }

    /// Set the resolver (defaults to the platform resolver)
    #[must_use]
    pub fn resolver(mut self, resolver: impl HostResolver + 'static) -> Self {
        self.resolver = Some(Box::new(resolver));
        self
    }

    /// Supply the cache (defaults to an empty cache with the standard TTL)
    #[must_use]
    pub fn cache(mut self, cache: DnsCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Set the upper bound on a single resolution
    #[must_use]
    pub fn resolve_timeout(mut self, timeout: Duration) -> Self {
        self.resolve_timeout = timeout;
        self
    }

    /// Build the validator
    #[must_use]
    pub fn build(self) -> Validator {
        Validator {
            inner: Arc::new(ValidatorInner {
                policy: self.policy,
                cache: self.cache.unwrap_or_default(),
                resolver: self
                    .resolver
                    .unwrap_or_else(|| Box::new(SystemResolver::new())),
                resolve_timeout: self.resolve_timeout,
            }),
        }
    }
}

#[cfg(feature = "hickory")]
fn with_hickory(builder: ValidatorBuilder) -> std::result::Result<ValidatorBuilder, GuardError> {
    Ok(builder.resolver(scanguard_net::HickoryResolver::new()?))
}

#[cfg(not(feature = "hickory"))]
fn with_hickory(_builder: ValidatorBuilder) -> std::result::Result<ValidatorBuilder, GuardError> {
    Err(GuardError::Config(
        "resolver backend 'hickory' requires the `hickory` feature".into(),
    ))
}

fn parse_target(input: &str) -> Result<Target> {
    let url = Url::parse(input).map_err(|e| Rejection::InvalidFormat {
        input: input.to_string(),
        reason: e.to_string(),
    })?;

    let (host, literal) = match url.host() {
        // "example.com." names the same host as "example.com".
        Some(Host::Domain(domain)) if !domain.trim_end_matches('.').is_empty() => {
            let domain = domain.strip_suffix('.').unwrap_or(domain);
            (domain.to_lowercase(), None)
        }
        Some(Host::Ipv4(v4)) => (v4.to_string(), Some(IpAddr::V4(v4))),
        Some(Host::Ipv6(v6)) => (v6.to_string(), Some(IpAddr::V6(v6))),
        _ => {
            return Err(Rejection::InvalidFormat {
                input: input.to_string(),
                reason: "URL has no host".into(),
            })
        }
    };

    let scheme = url.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(Rejection::DisallowedProtocol {
            scheme: scheme.to_string(),
        });
    }

    Ok(Target { url, host, literal })
}

/// Name-level localhost check, applied before any resolution.
fn is_localhost_name(host: &str) -> bool {
    let host = host.strip_suffix('.').unwrap_or(host);
    host == "localhost"
        || host == "127.0.0.1"
        || host == "::1"
        || host.starts_with("127.")
        || host.ends_with(".localhost")
}
