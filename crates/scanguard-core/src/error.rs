use std::net::IpAddr;
use thiserror::Error;

/// Result type alias for validation operations
pub type Result<T> = std::result::Result<T, Rejection>;

/// Reasons a URL is refused before any outbound request is made.
///
/// Every variant is terminal for the call. None of them are retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Input is not an absolute URL with a host
    #[error("invalid URL format: {input} ({reason})")]
    InvalidFormat {
        /// The rejected input, verbatim
        input: String,
        /// Parser diagnostic
        reason: String,
    },

    /// Scheme other than http/https
    #[error("only HTTP and HTTPS protocols are allowed, got: {scheme}")]
    DisallowedProtocol {
        /// The scheme that was supplied
        scheme: String,
    },

    /// A whitelist is configured and the host is not on it
    #[error("URL host '{host}' is not in the allowed whitelist")]
    NotWhitelisted {
        /// Normalized host
        host: String,
    },

    /// Host names the local machine and localhost is not allowed
    #[error("scanning localhost '{host}' is not allowed (set allow_localhost = true to enable)")]
    LocalhostDisallowed {
        /// Normalized host
        host: String,
    },

    /// Host matches a blacklist pattern
    #[error("URL host '{host}' is blacklisted")]
    Blacklisted {
        /// Normalized host
        host: String,
    },

    /// Resolution failed or timed out
    #[error("unable to resolve hostname '{host}': {reason}")]
    UnresolvableHost {
        /// Normalized host
        host: String,
        /// Resolver diagnostic
        reason: String,
    },

    /// Resolved into a private range and private networks are not allowed
    #[error("'{host}' resolves to private network address {address} (set allow_private_networks = true to enable)")]
    PrivateNetworkDisallowed {
        /// Normalized host
        host: String,
        /// Offending address
        address: IpAddr,
    },

    /// Resolved to loopback and localhost is not allowed
    #[error("'{host}' resolves to loopback address {address}")]
    LoopbackDisallowed {
        /// Normalized host
        host: String,
        /// Offending address
        address: IpAddr,
    },

    /// Resolved to a link-local address (never allowed)
    #[error("'{host}' resolves to link-local address {address}")]
    LinkLocalDisallowed {
        /// Normalized host
        host: String,
        /// Offending address
        address: IpAddr,
    },
}

impl Rejection {
    /// Stable machine-readable identifier for this rejection
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidFormat { .. } => "invalid_format",
            Self::DisallowedProtocol { .. } => "disallowed_protocol",
            Self::NotWhitelisted { .. } => "not_whitelisted",
            Self::LocalhostDisallowed { .. } => "localhost_disallowed",
            Self::Blacklisted { .. } => "blacklisted",
            Self::UnresolvableHost { .. } => "unresolvable_host",
            Self::PrivateNetworkDisallowed { .. } => "private_network_disallowed",
            Self::LoopbackDisallowed { .. } => "loopback_disallowed",
            Self::LinkLocalDisallowed { .. } => "link_local_disallowed",
        }
    }

    /// Returns true if the URL was well-formed and resolvable but denied by policy
    #[must_use]
    pub const fn is_policy_rejection(&self) -> bool {
        !matches!(
            self,
            Self::InvalidFormat { .. } | Self::UnresolvableHost { .. }
        )
    }

    /// Returns the host the rejection refers to, if one was extracted
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        match self {
            Self::InvalidFormat { .. } | Self::DisallowedProtocol { .. } => None,
            Self::NotWhitelisted { host }
            | Self::LocalhostDisallowed { host }
            | Self::Blacklisted { host }
            | Self::UnresolvableHost { host, .. }
            | Self::PrivateNetworkDisallowed { host, .. }
            | Self::LoopbackDisallowed { host, .. }
            | Self::LinkLocalDisallowed { host, .. } => Some(host),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct() {
        let address: IpAddr = "10.0.0.1".parse().unwrap();
        let host = String::from("h");
        let all = [
            Rejection::InvalidFormat {
                input: String::new(),
                reason: String::new(),
            },
            Rejection::DisallowedProtocol {
                scheme: "ftp".into(),
            },
            Rejection::NotWhitelisted { host: host.clone() },
            Rejection::LocalhostDisallowed { host: host.clone() },
            Rejection::Blacklisted { host: host.clone() },
            Rejection::UnresolvableHost {
                host: host.clone(),
                reason: String::new(),
            },
            Rejection::PrivateNetworkDisallowed {
                host: host.clone(),
                address,
            },
            Rejection::LoopbackDisallowed {
                host: host.clone(),
                address,
            },
            Rejection::LinkLocalDisallowed { host, address },
        ];
        let mut codes: Vec<_> = all.iter().map(Rejection::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), all.len());
    }

    #[test]
    fn policy_rejection_split() {
        assert!(Rejection::Blacklisted { host: "a".into() }.is_policy_rejection());
        assert!(!Rejection::UnresolvableHost {
            host: "a".into(),
            reason: "nxdomain".into()
        }
        .is_policy_rejection());
    }

    #[test]
    fn message_names_host_and_address() {
        let err = Rejection::PrivateNetworkDisallowed {
            host: "intranet.example".into(),
            address: "192.168.1.5".parse().unwrap(),
        };
        let msg = err.to_string();
        assert!(msg.contains("intranet.example"));
        assert!(msg.contains("192.168.1.5"));
        assert_eq!(err.host(), Some("intranet.example"));
    }
}
