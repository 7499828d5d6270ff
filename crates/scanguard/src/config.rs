//! Validator configuration.
//!
//! Read once at startup from an optional TOML file, then overridden by
//! `SCANGUARD_*` environment variables. Example:
//!
//! ```toml
//! allow_localhost = false
//! allow_private_networks = false
//! whitelist = ["*.staging.example.com"]
//! blacklist = ["localhost", "127.0.0.1", "0.0.0.0"]
//!
//! [resolver]
//! backend = "system"
//! timeout_ms = 5000
//! ```

use scanguard_core::Policy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::GuardError;

/// Environment variable names
pub mod env {
    /// `true`/`false` for [`Policy::allow_localhost`](scanguard_core::Policy)
    pub const ALLOW_LOCALHOST: &str = "SCANGUARD_ALLOW_LOCALHOST";
    /// `true`/`false` for [`Policy::allow_private_networks`](scanguard_core::Policy)
    pub const ALLOW_PRIVATE_NETWORKS: &str = "SCANGUARD_ALLOW_PRIVATE_NETWORKS";
    /// Comma-separated whitelist patterns
    pub const WHITELIST: &str = "SCANGUARD_WHITELIST";
    /// Comma-separated blacklist patterns
    pub const BLACKLIST: &str = "SCANGUARD_BLACKLIST";
    /// `system` or `hickory`
    pub const RESOLVER: &str = "SCANGUARD_RESOLVER";
    /// Resolution timeout in milliseconds
    pub const RESOLVE_TIMEOUT_MS: &str = "SCANGUARD_RESOLVE_TIMEOUT_MS";
}

/// Default resolution timeout.
pub const DEFAULT_RESOLVE_TIMEOUT: Duration = Duration::from_secs(5);

/// Full validator configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// URL policy
    #[serde(flatten)]
    pub policy: Policy,

    /// Resolver settings
    pub resolver: ResolverSettings,
}

/// Which resolver to use and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverSettings {
    /// Resolver implementation
    pub backend: ResolverBackend,

    /// Upper bound on a single resolution (milliseconds)
    pub timeout_ms: u64,
}

/// Resolver implementations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolverBackend {
    /// Platform resolver (getaddrinfo)
    #[default]
    System,
    /// hickory-resolver using the system resolv.conf
    Hickory,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            backend: ResolverBackend::default(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl ResolverSettings {
    /// Timeout as a [`Duration`]
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl std::str::FromStr for ResolverBackend {
    type Err = GuardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "system" => Ok(Self::System),
            "hickory" => Ok(Self::Hickory),
            other => Err(GuardError::Config(format!(
                "unknown resolver backend '{other}' (expected system or hickory)"
            ))),
        }
    }
}

impl GuardConfig {
    /// Load config from a TOML file, falling back to defaults.
    pub fn load(path: &Path) -> Result<Self, GuardError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse config from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, GuardError> {
        let config: Self =
            toml::from_str(content).map_err(|e| GuardError::Config(e.to_string()))?;
        if config.resolver.timeout_ms == 0 {
            return Err(GuardError::Config(
                "resolver.timeout_ms must be greater than zero".into(),
            ));
        }
        Ok(config)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(self) -> Result<Self, GuardError> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_env_from<F>(mut self, lookup: F) -> Result<Self, GuardError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(env::ALLOW_LOCALHOST) {
            self.policy.allow_localhost = parse_bool(env::ALLOW_LOCALHOST, &value)?;
        }
        if let Some(value) = lookup(env::ALLOW_PRIVATE_NETWORKS) {
            self.policy.allow_private_networks = parse_bool(env::ALLOW_PRIVATE_NETWORKS, &value)?;
        }
        if let Some(value) = lookup(env::WHITELIST) {
            self.policy = self.policy.with_whitelist(split_list(&value));
        }
        if let Some(value) = lookup(env::BLACKLIST) {
            self.policy = self.policy.with_blacklist(split_list(&value));
        }
        if let Some(value) = lookup(env::RESOLVER) {
            self.resolver.backend = value.parse()?;
        }
        if let Some(value) = lookup(env::RESOLVE_TIMEOUT_MS) {
            self.resolver.timeout_ms = match value.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => ms,
                _ => {
                    return Err(GuardError::Config(format!(
                        "{}: expected a positive number of milliseconds, got '{value}'",
                        env::RESOLVE_TIMEOUT_MS
                    )))
                }
            };
        }
        Ok(self)
    }
}

// Defaults.
const fn default_timeout_ms() -> u64 {
    5000
}

fn parse_bool(key: &str, value: &str) -> Result<bool, GuardError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(GuardError::Config(format!(
            "{key}: expected a boolean, got '{value}'"
        ))),
    }
}

/// Comma-separated list with blanks dropped, so an empty value is an empty list.
fn split_list(value: &str) -> Vec<&str> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_default_config() {
        let config = GuardConfig::default();
        assert_eq!(config.policy, Policy::default());
        assert_eq!(config.resolver.backend, ResolverBackend::System);
        assert_eq!(config.resolver.timeout(), DEFAULT_RESOLVE_TIMEOUT);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = GuardConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, GuardConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
allow_private_networks = true
whitelist = ["*.staging.example.com"]

[resolver]
backend = "hickory"
timeout_ms = 1500
"#
        )
        .unwrap();

        let config = GuardConfig::load(file.path()).unwrap();
        assert!(config.policy.allow_private_networks);
        assert!(!config.policy.allow_localhost);
        assert!(config.policy.is_whitelisted("api.staging.example.com"));
        assert_eq!(config.resolver.backend, ResolverBackend::Hickory);
        assert_eq!(config.resolver.timeout(), Duration::from_millis(1500));
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let err = GuardConfig::from_toml("allow_localhost = \"maybe\"").unwrap_err();
        assert!(matches!(err, GuardError::Config(_)));

        let err = GuardConfig::from_toml("[resolver]\ntimeout_ms = 0").unwrap_err();
        assert!(matches!(err, GuardError::Config(_)));
    }

    #[test]
    fn test_env_overrides() {
        let env = vars(&[
            (env::ALLOW_LOCALHOST, "TRUE"),
            (env::ALLOW_PRIVATE_NETWORKS, "0"),
            (env::WHITELIST, " *.example.com , ,api.test "),
            (env::BLACKLIST, "evil.example"),
            (env::RESOLVER, "Hickory"),
            (env::RESOLVE_TIMEOUT_MS, "250"),
        ]);
        let config = GuardConfig::default()
            .apply_env_from(|k| env.get(k).cloned())
            .unwrap();

        assert!(config.policy.allow_localhost);
        assert!(!config.policy.allow_private_networks);
        assert_eq!(config.policy.whitelist.len(), 2);
        assert!(config.policy.is_whitelisted("api.test"));
        assert!(config.policy.is_blacklisted("evil.example"));
        assert!(!config.policy.is_blacklisted("localhost"));
        assert_eq!(config.resolver.backend, ResolverBackend::Hickory);
        assert_eq!(config.resolver.timeout_ms, 250);
    }

    #[test]
    fn test_empty_whitelist_env_means_inactive() {
        let env = vars(&[(env::WHITELIST, "")]);
        let config = GuardConfig {
            policy: Policy::default().with_whitelist(["*.example.com"]),
            ..GuardConfig::default()
        };
        let config = config.apply_env_from(|k| env.get(k).cloned()).unwrap();
        assert!(!config.policy.whitelist_active());
    }

    #[test]
    fn test_invalid_env_values_rejected() {
        for (key, value) in [
            (env::ALLOW_LOCALHOST, "sometimes"),
            (env::RESOLVER, "bind"),
            (env::RESOLVE_TIMEOUT_MS, "0"),
            (env::RESOLVE_TIMEOUT_MS, "soon"),
        ] {
            let env = vars(&[(key, value)]);
            let result = GuardConfig::default().apply_env_from(|k| env.get(k).cloned());
            assert!(matches!(result, Err(GuardError::Config(_))), "{key}={value}");
        }
    }
}
