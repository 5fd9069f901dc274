use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ConfigError;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub santa: SantaConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SantaConfig {
    /// Roster size required before an event may be started.
    #[serde(default = "default_min_participants")]
    pub min_participants: i64,
}

impl Default for SantaConfig {
    fn default() -> Self {
        Self {
            min_participants: default_min_participants(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

        Self::load_from_file(&config_path)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::load_from_str(&content)
    }

    pub fn load_from_str(content: &str) -> Result<Self, ConfigError> {
        let mut config: Config = serde_yaml::from_str(content)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.santa.min_participants < 2 {
            return Err(ConfigError::InvalidConfig(
                "santa.min_participants must be at least 2".to_string(),
            ));
        }

        if self.logging.format != "pretty" && self.logging.format != "json" {
            return Err(ConfigError::InvalidConfig(format!(
                "logging.format must be \"pretty\" or \"json\", got \"{}\"",
                self.logging.format
            )));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = std::env::var("SECRET_SANTA_MIN_PARTICIPANTS") {
            if let Ok(parsed) = value.parse() {
                self.santa.min_participants = parsed;
            }
        }
    }
}

fn default_min_participants() -> i64 {
    2
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = Config::load_from_str("{}").unwrap();

        assert_eq!(config.santa.min_participants, 2);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn explicit_values_are_honored() {
        let config = Config::load_from_str(
            "santa:\n  min_participants: 5\nlogging:\n  level: debug\n  format: json\n",
        )
        .unwrap();

        assert_eq!(config.santa.min_participants, 5);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn too_small_minimum_is_rejected() {
        let result = Config::load_from_str("santa:\n  min_participants: 1\n");

        assert!(matches!(result, Err(ConfigError::InvalidConfig(_))));
    }

    #[test]
    fn unknown_logging_format_is_rejected() {
        let result = Config::load_from_str("logging:\n  format: xml\n");

        assert!(matches!(result, Err(ConfigError::InvalidConfig(_))));
    }
}
