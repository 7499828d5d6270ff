//! Config file discovery and loading.

use anyhow::{Context as _, Result};
use directories::ProjectDirs;
use scanguard::GuardConfig;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default per-user config file path.
pub fn default_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("dev", "scanguard", "scanguard")
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

    Ok(dirs.config_dir().join("config.toml"))
}

/// Resolve the config path from an explicit choice or the default.
pub fn resolve_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path),
        None => default_path(),
    }
}

/// Load the config file (if present) and apply `SCANGUARD_*` overrides.
pub fn load(path: &Path) -> Result<GuardConfig> {
    debug!(path = %path.display(), "loading configuration");
    let config = GuardConfig::load(path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    let config = config
        .apply_env()
        .context("Invalid SCANGUARD_* environment override")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn explicit_path_wins() {
        let path = PathBuf::from("/tmp/custom.toml");
        assert_eq!(resolve_path(Some(path.clone())).unwrap(), path);
    }

    #[test]
    fn default_path_is_config_toml() {
        if let Ok(path) = default_path() {
            assert!(path.ends_with("config.toml"));
        }
    }

    #[test]
    fn load_reports_bad_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "allow_localhost = [").unwrap();
        let err = load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }
}
