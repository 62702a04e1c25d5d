//! Configuration schema definitions
//!
//! Defines the structure of configuration files using serde for serialization.

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Namespace used when `wait` is not given `-n`
    #[serde(default = "default_namespace")]
    pub default_namespace: String,

    /// Poll loop configuration
    #[serde(default)]
    pub wait: WaitConfig,

    /// Logger configuration
    #[serde(default)]
    pub logger: LoggerConfig,
}

/// Poll loop configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WaitConfig {
    /// Delay between two evaluations
    #[serde(default = "default_interval_seconds")]
    pub interval_seconds: u64,

    /// Give up after this long
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

/// Logger configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoggerConfig {
    /// Default filter when RUST_LOG is unset (e.g. "info", "pkgwait=debug")
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_namespace() -> String {
    "default".to_string()
}

fn default_interval_seconds() -> u64 {
    1
}

fn default_timeout_seconds() -> u64 {
    900
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_namespace: default_namespace(),
            wait: WaitConfig::default(),
            logger: LoggerConfig::default(),
        }
    }
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            interval_seconds: default_interval_seconds(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.default_namespace, "default");
        assert_eq!(config.wait.interval_seconds, 1);
        assert_eq!(config.wait.timeout_seconds, 900);
        assert_eq!(config.logger.level, "warn");
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("defaultNamespace"));
        assert!(yaml.contains("intervalSeconds"));
        assert!(yaml.contains("timeoutSeconds"));
    }

    #[test]
    fn test_config_deserialization() {
        let yaml = r#"
defaultNamespace: tools
wait:
  timeoutSeconds: 60
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.default_namespace, "tools");
        assert_eq!(config.wait.timeout_seconds, 60);
        // Unset fields fall back to defaults
        assert_eq!(config.wait.interval_seconds, 1);
        assert_eq!(config.logger.level, "warn");
    }
}
