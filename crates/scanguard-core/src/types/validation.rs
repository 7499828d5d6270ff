//! Validation outcome types.

use serde::{Deserialize, Serialize};

/// Outcome of a successful validation.
///
/// Holds its own copy of the resolved address, so evicting or overwriting
/// the DNS cache later does not change a result already handed out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// URL exactly as the caller supplied it
    pub original_url: String,

    /// Address the scanner should connect to instead of re-resolving
    pub resolved_ip: Option<String>,

    /// Normalized host the address belongs to
    pub hostname: Option<String>,
}

impl ValidationResult {
    /// Result with no pinned address
    #[must_use]
    pub fn unresolved(original_url: impl Into<String>) -> Self {
        Self {
            original_url: original_url.into(),
            resolved_ip: None,
            hostname: None,
        }
    }

    /// Result pinned to `resolved_ip` for `hostname`
    #[must_use]
    pub fn resolved(
        original_url: impl Into<String>,
        resolved_ip: impl Into<String>,
        hostname: impl Into<String>,
    ) -> Self {
        Self {
            original_url: original_url.into(),
            resolved_ip: Some(resolved_ip.into()),
            hostname: Some(hostname.into()),
        }
    }

    /// Returns true when a non-empty address is pinned
    #[must_use]
    pub fn has_resolved_ip(&self) -> bool {
        self.resolved_ip.as_deref().is_some_and(|ip| !ip.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_resolved_ip() {
        assert!(!ValidationResult::unresolved("http://a").has_resolved_ip());
        assert!(ValidationResult::resolved("http://a", "93.184.216.34", "a").has_resolved_ip());
        assert!(!ValidationResult::resolved("http://a", "", "a").has_resolved_ip());
    }

    #[test]
    fn test_json_shape() {
        let result = ValidationResult::resolved("https://example.com/", "93.184.216.34", "example.com");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["original_url"], "https://example.com/");
        assert_eq!(json["resolved_ip"], "93.184.216.34");
        assert_eq!(json["hostname"], "example.com");
    }
}
