//! Resolution pinning cache.
//!
//! Every resolution made while validating a URL is recorded here so the
//! scanner can later connect to the same address, instead of asking DNS
//! again and getting a different (rebinding) answer.
//!
//! Entries expire lazily: a stale entry is reported as absent on read and
//! is simply overwritten by the next resolution. Nothing purges in the
//! background.

use dashmap::DashMap;
use std::net::IpAddr;
use std::time::{Duration, Instant};
use tracing::debug;

/// Lifetime of a pinned resolution.
pub const DNS_CACHE_TTL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    address: IpAddr,
    resolved_at: Instant,
}

/// Concurrent host -> address map keyed by lowercase host name.
#[derive(Debug)]
pub struct DnsCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
}

impl Default for DnsCache {
    fn default() -> Self {
        Self::new(DNS_CACHE_TTL)
    }
}

impl DnsCache {
    /// Create an empty cache whose entries live for `ttl`
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Entry lifetime
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Pinned address for `host`, unless unknown or expired
    #[must_use]
    pub fn lookup(&self, host: &str) -> Option<IpAddr> {
        self.lookup_at(host, Instant::now())
    }

    /// Pin `address` for `host`, replacing any previous entry
    pub fn put(&self, host: &str, address: IpAddr) {
        self.put_at(host, address, Instant::now());
    }

    /// Drop every entry
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of stored entries, expired ones included
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn lookup_at(&self, host: &str, now: Instant) -> Option<IpAddr> {
        let entry = *self.entries.get(&host.to_lowercase())?;
        let expired = entry
            .resolved_at
            .checked_add(self.ttl)
            .is_some_and(|deadline| now > deadline);
        if expired {
            return None;
        }
        debug!(host = %host, address = %entry.address, "pinned resolution hit");
        Some(entry.address)
    }

    fn put_at(&self, host: &str, address: IpAddr, resolved_at: Instant) {
        let host = host.to_lowercase();
        debug!(host = %host, address = %address, "pinning DNS resolution");
        self.entries.insert(
            host,
            CacheEntry {
                address,
                resolved_at,
            },
        );
    }
}
