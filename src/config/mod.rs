//! Configuration system for pkgwait
//!
//! A single YAML file with built-in defaults and environment overrides.

mod defaults;
pub mod loader;
pub mod paths;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::{Config, LoggerConfig, WaitConfig};

/// Get a configuration value by key (dot notation)
pub fn get_config_value(config: &schema::Config, key: &str) -> anyhow::Result<String> {
    match key {
        "defaultNamespace" => Ok(config.default_namespace.clone()),
        "wait.intervalSeconds" => Ok(config.wait.interval_seconds.to_string()),
        "wait.timeoutSeconds" => Ok(config.wait.timeout_seconds.to_string()),
        "logger.level" => Ok(config.logger.level.clone()),
        _ => Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }
}

/// Set a configuration value by key (dot notation)
pub fn set_config_value(config: &mut schema::Config, key: &str, value: &str) -> anyhow::Result<()> {
    use anyhow::Context;
    match key {
        "defaultNamespace" => {
            if value.is_empty() {
                return Err(anyhow::anyhow!("defaultNamespace must not be empty"));
            }
            config.default_namespace = value.to_string();
        }
        "wait.intervalSeconds" => {
            config.wait.interval_seconds = parse_positive(value)
                .context("wait.intervalSeconds must be a positive number")?;
        }
        "wait.timeoutSeconds" => {
            config.wait.timeout_seconds = parse_positive(value)
                .context("wait.timeoutSeconds must be a positive number")?;
        }
        "logger.level" => {
            config.logger.level = value.to_string();
        }
        _ => return Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }

    Ok(())
}

fn parse_positive(value: &str) -> anyhow::Result<u64> {
    match value.parse::<u64>()? {
        0 => Err(anyhow::anyhow!("value must be greater than 0")),
        n => Ok(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_config_value() {
        let config = Config::default();
        assert_eq!(get_config_value(&config, "defaultNamespace").unwrap(), "default");
        assert_eq!(get_config_value(&config, "wait.timeoutSeconds").unwrap(), "900");
        assert!(get_config_value(&config, "ui.skin").is_err());
    }

    #[test]
    fn test_set_config_value() {
        let mut config = Config::default();
        set_config_value(&mut config, "wait.intervalSeconds", "5").unwrap();
        set_config_value(&mut config, "logger.level", "debug").unwrap();
        assert_eq!(config.wait.interval_seconds, 5);
        assert_eq!(config.logger.level, "debug");
    }

    #[test]
    fn test_set_config_value_rejects_bad_input() {
        let mut config = Config::default();
        assert!(set_config_value(&mut config, "wait.timeoutSeconds", "soon").is_err());
        assert!(set_config_value(&mut config, "wait.timeoutSeconds", "0").is_err());
        assert!(set_config_value(&mut config, "defaultNamespace", "").is_err());
        assert!(set_config_value(&mut config, "readOnly", "true").is_err());
        assert_eq!(config, Config::default());
    }
}
