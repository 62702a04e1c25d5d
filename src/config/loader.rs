//! Configuration loading
//!
//! Precedence order (highest to lowest):
//! 1. Environment variable overrides
//! 2. Root config file
//! 3. Built-in defaults

use super::{defaults, paths, schema::Config};
use anyhow::{Context, Result};
use std::path::Path;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with all layers applied
    pub fn load() -> Result<Config> {
        let root_path = paths::root_config_path();
        let config = if root_path.exists() {
            Self::load_file(&root_path)?
        } else {
            Self::load_defaults()
        };

        Ok(Self::apply_env_overrides(config))
    }

    /// Load configuration from a file
    ///
    /// Missing keys take their built-in default.
    pub fn load_file(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found: {}", path.display()));
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Self::check(&config)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the root configuration file, if there is one
    pub fn validate() -> Result<()> {
        let root_path = paths::root_config_path();
        if root_path.exists() {
            Self::load_file(&root_path)?;
        }
        let config = Self::load().context("Failed to load merged configuration")?;
        Self::check(&config)
    }

    /// Load default configuration
    pub fn load_defaults() -> Config {
        defaults::default_config()
    }

    fn check(config: &Config) -> Result<()> {
        if config.wait.interval_seconds == 0 {
            return Err(anyhow::anyhow!("wait.intervalSeconds must be greater than 0"));
        }
        if config.wait.timeout_seconds == 0 {
            return Err(anyhow::anyhow!("wait.timeoutSeconds must be greater than 0"));
        }
        if config.default_namespace.is_empty() {
            return Err(anyhow::anyhow!("defaultNamespace must not be empty"));
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut config: Config) -> Config {
        // PKGWAIT_NAMESPACE override
        if let Ok(namespace) = std::env::var("PKGWAIT_NAMESPACE") {
            if !namespace.is_empty() {
                config.default_namespace = namespace;
            }
        }

        // PKGWAIT_TIMEOUT override (seconds)
        if let Ok(timeout) = std::env::var("PKGWAIT_TIMEOUT") {
            match timeout.parse::<u64>() {
                Ok(val) if val > 0 => config.wait.timeout_seconds = val,
                _ => tracing::warn!("Ignoring invalid PKGWAIT_TIMEOUT value: {}", timeout),
            }
        }

        config
    }

    /// Save configuration to a file
    pub fn save(config: &Config, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            paths::ensure_dir(parent)?;
        }

        let yaml =
            serde_yaml::to_string(config).context("Failed to serialize configuration to YAML")?;

        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Save root configuration
    pub fn save_root(config: &Config) -> Result<()> {
        Self::save(config, &paths::root_config_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.default_namespace, "default");
        assert_eq!(config.wait.timeout_seconds, 900);
    }

    #[test]
    fn test_save_then_load_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("config.yaml");

        let mut config = Config::default();
        config.default_namespace = "tools".to_string();
        config.wait.timeout_seconds = 30;
        ConfigLoader::save(&config, &path).unwrap();

        let loaded = ConfigLoader::load_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_file_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let err = ConfigLoader::load_file(&tmp.path().join("nope.yaml")).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_load_file_rejects_zero_interval() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "wait:\n  intervalSeconds: 0\n").unwrap();

        let err = ConfigLoader::load_file(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("intervalSeconds"));
    }

    #[test]
    fn test_env_overrides() {
        // SAFETY: set_var is unsafe in Rust 2024 due to potential data races.
        // These variables are only read by apply_env_overrides, and only this
        // test sets them.
        unsafe {
            std::env::set_var("PKGWAIT_NAMESPACE", "from-env");
            std::env::set_var("PKGWAIT_TIMEOUT", "42");
        }

        let config = ConfigLoader::apply_env_overrides(Config::default());

        assert_eq!(config.default_namespace, "from-env");
        assert_eq!(config.wait.timeout_seconds, 42);

        // SAFETY: same as above.
        unsafe {
            std::env::remove_var("PKGWAIT_NAMESPACE");
            std::env::remove_var("PKGWAIT_TIMEOUT");
        }
    }
}
