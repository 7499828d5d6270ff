//! Wildcard host patterns.
//!
//! Policy authors write glob patterns, not regular expressions: `*` stands
//! for zero or more characters and every other character (dots included)
//! is literal. `*` on its own matches every host.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A compiled whitelist/blacklist entry.
///
/// Patterns are trimmed and lowercased when built. An empty pattern, or one
/// that fails to compile, never matches anything.
#[derive(Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct HostPattern {
    raw: String,
    regex: Option<Regex>,
}

impl HostPattern {
    /// Compile a pattern
    #[must_use]
    pub fn new(pattern: &str) -> Self {
        let raw = pattern.trim().to_lowercase();
        let regex = compile(&raw);
        Self { raw, regex }
    }

    /// The normalized pattern text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns true for the empty pattern
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Test a lowercase host name or IP literal against this pattern
    #[must_use]
    pub fn matches(&self, host: &str) -> bool {
        if self.raw == "*" {
            return true;
        }
        self.regex.as_ref().is_some_and(|re| re.is_match(host))
    }
}

/// Test `host` against a single wildcard `pattern`.
#[must_use]
pub fn matches(host: &str, pattern: &str) -> bool {
    HostPattern::new(pattern).matches(host)
}

/// Glob to anchored regex. Only `*` is special.
fn compile(pattern: &str) -> Option<Regex> {
    if pattern.is_empty() {
        return None;
    }
    let body = pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    Regex::new(&format!("^{body}$")).ok()
}

impl From<String> for HostPattern {
    fn from(pattern: String) -> Self {
        Self::new(&pattern)
    }
}

impl From<&str> for HostPattern {
    fn from(pattern: &str) -> Self {
        Self::new(pattern)
    }
}

impl From<HostPattern> for String {
    fn from(pattern: HostPattern) -> Self {
        pattern.raw
    }
}

impl PartialEq for HostPattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for HostPattern {}

impl fmt::Debug for HostPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HostPattern").field(&self.raw).finish()
    }
}

impl fmt::Display for HostPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
