//! Outbound URL policy.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::pattern::HostPattern;

/// Blacklist used when none is configured.
///
/// The CIDR-style entries are kept for operators who read the config back;
/// as host patterns they match nothing, and the ranges themselves are
/// enforced on the resolved address.
pub const DEFAULT_BLACKLIST: [&str; 7] = [
    "localhost",
    "127.0.0.1",
    "0.0.0.0",
    "169.254.0.0/16",
    "10.0.0.0/8",
    "172.16.0.0/12",
    "192.168.0.0/16",
];

/// Allow/deny rules applied to every outbound URL.
///
/// Built once at process start and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    /// Permit localhost names and loopback addresses
    pub allow_localhost: bool,

    /// Permit private (RFC 1918 / site-local / unique-local) addresses
    pub allow_private_networks: bool,

    /// When any entry is non-empty, only matching hosts pass, and they
    /// skip every other check
    pub whitelist: Vec<HostPattern>,

    /// Hosts refused outright
    pub blacklist: Vec<HostPattern>,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            allow_localhost: false,
            allow_private_networks: false,
            whitelist: Vec::new(),
            blacklist: DEFAULT_BLACKLIST.iter().copied().map(HostPattern::new).collect(),
        }
    }
}

impl Policy {
    /// Set whether localhost is allowed
    #[must_use]
    pub const fn allow_localhost(mut self, allow: bool) -> Self {
        self.allow_localhost = allow;
        self
    }

    /// Set whether private networks are allowed
    #[must_use]
    pub const fn allow_private_networks(mut self, allow: bool) -> Self {
        self.allow_private_networks = allow;
        self
    }

    /// Replace the whitelist
    #[must_use]
    pub fn with_whitelist<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.whitelist = patterns.into_iter().map(|p| HostPattern::new(p.as_ref())).collect();
        self
    }

    /// Replace the blacklist
    #[must_use]
    pub fn with_blacklist<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.blacklist = patterns.into_iter().map(|p| HostPattern::new(p.as_ref())).collect();
        self
    }

    /// A whitelist counts as configured only if it holds a non-empty pattern.
    #[must_use]
    pub fn whitelist_active(&self) -> bool {
        self.whitelist.iter().any(|p| !p.is_empty())
    }

    /// Host matches some whitelist entry
    #[must_use]
    pub fn is_whitelisted(&self, host: &str) -> bool {
        self.whitelist
            .iter()
            .filter(|p| !p.is_empty())
            .any(|p| p.matches(host))
    }

    /// Host matches some blacklist entry
    #[must_use]
    pub fn is_blacklisted(&self, host: &str) -> bool {
        self.blacklist
            .iter()
            .filter(|p| !p.is_empty())
            .any(|p| p.matches(host))
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "URL validation config: allow_localhost={}, allow_private_networks={}, whitelist=[{}], blacklist=[{}]",
            self.allow_localhost,
            self.allow_private_networks,
            join(&self.whitelist),
            join(&self.blacklist),
        )
    }
}

fn join(patterns: &[HostPattern]) -> String {
    patterns
        .iter()
        .map(HostPattern::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let policy = Policy::default();
        assert!(!policy.allow_localhost);
        assert!(!policy.allow_private_networks);
        assert!(!policy.whitelist_active());
        assert!(policy.is_blacklisted("localhost"));
        assert!(policy.is_blacklisted("0.0.0.0"));
        assert!(!policy.is_blacklisted("example.com"));
    }

    #[test]
    fn test_empty_string_whitelist_is_inactive() {
        let policy = Policy::default().with_whitelist([""]);
        assert!(!policy.whitelist_active());

        let policy = Policy::default().with_whitelist(["", "  "]);
        assert!(!policy.whitelist_active());

        let policy = Policy::default().with_whitelist(["", "*.example.com"]);
        assert!(policy.whitelist_active());
        assert!(policy.is_whitelisted("www.example.com"));
    }

    #[test]
    fn test_empty_blacklist_entries_ignored() {
        let policy = Policy::default().with_blacklist(["", "evil.com"]);
        assert!(policy.is_blacklisted("evil.com"));
        assert!(!policy.is_blacklisted(""));
    }

    #[test]
    fn test_deserialize_partial_toml() {
        let policy: Policy = toml::from_str(
            r#"
            allow_localhost = true
            whitelist = ["*.Corp.example"]
            "#,
        )
        .unwrap();
        assert!(policy.allow_localhost);
        assert!(!policy.allow_private_networks);
        assert!(policy.is_whitelisted("git.corp.example"));
        assert_eq!(policy.blacklist.len(), DEFAULT_BLACKLIST.len());
    }

    #[test]
    fn test_summary_lists_everything() {
        let summary = Policy::default()
            .allow_private_networks(true)
            .with_whitelist(["*.com"])
            .to_string();
        assert!(summary.contains("allow_localhost=false"));
        assert!(summary.contains("allow_private_networks=true"));
        assert!(summary.contains("whitelist=[*.com]"));
        assert!(summary.contains("10.0.0.0/8"));
    }
}
