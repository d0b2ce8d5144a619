//! Configuration loading utilities

use crate::schema::Config;
use bikedash_common::{BikedashError, Result as BikedashResult};
use chrono::NaiveDate;
use std::env;
use std::path::Path;
use thiserror::Error;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[source] BikedashError),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for BikedashError {
    fn from(err: ConfigError) -> Self {
        BikedashError::config(err.to_string())
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut config: Config = serde_yaml::from_str(&content)?;

        Self::apply_env_overrides(&mut config)?;
        config.validate().map_err(ConfigError::ValidationError)?;

        Ok(config)
    }

    /// Load configuration from environment variables and files.
    ///
    /// Resolution order: `BIKEDASH_CONFIG_PATH`, then `bikedash.yaml` or
    /// `bikedash.yml` in the working directory, then built-in defaults.
    pub fn load() -> BikedashResult<Config> {
        let config = if let Ok(config_path) = env::var("BIKEDASH_CONFIG_PATH") {
            Self::load_config(&config_path)?
        } else if Path::new("bikedash.yaml").exists() {
            Self::load_config("bikedash.yaml")?
        } else if Path::new("bikedash.yml").exists() {
            Self::load_config("bikedash.yml")?
        } else {
            let mut config = Config::default();
            Self::apply_env_overrides(&mut config)?;
            config.validate().map_err(ConfigError::ValidationError)?;
            config
        };

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> BikedashResult<Config> {
        Ok(Self::load_config(path)?)
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        // Data configuration overrides
        if let Ok(path) = env::var("BIKEDASH_DAILY_DATA") {
            config.data.daily_path = path.into();
        }

        if let Ok(path) = env::var("BIKEDASH_HOURLY_DATA") {
            config.data.hourly_path = path.into();
        }

        // Report configuration overrides
        if let Ok(start) = env::var("BIKEDASH_START_DATE") {
            config.report.start_date =
                Some(NaiveDate::parse_from_str(&start, "%Y-%m-%d").map_err(|e| {
                    ConfigError::EnvParseError {
                        var: "BIKEDASH_START_DATE".to_string(),
                        source: Box::new(e),
                    }
                })?);
        }

        if let Ok(end) = env::var("BIKEDASH_END_DATE") {
            config.report.end_date =
                Some(NaiveDate::parse_from_str(&end, "%Y-%m-%d").map_err(|e| {
                    ConfigError::EnvParseError {
                        var: "BIKEDASH_END_DATE".to_string(),
                        source: Box::new(e),
                    }
                })?);
        }

        if let Ok(year) = env::var("BIKEDASH_TREND_YEAR") {
            config.report.trend_year =
                year.parse().map_err(|e| ConfigError::EnvParseError {
                    var: "BIKEDASH_TREND_YEAR".to_string(),
                    source: Box::new(e),
                })?;
        }

        if let Ok(year) = env::var("BIKEDASH_HIGHLIGHT_YEAR") {
            config.report.highlight_year =
                year.parse().map_err(|e| ConfigError::EnvParseError {
                    var: "BIKEDASH_HIGHLIGHT_YEAR".to_string(),
                    source: Box::new(e),
                })?;
        }

        if let Ok(limit) = env::var("BIKEDASH_TOP_HOURS") {
            config.report.top_hours =
                limit.parse().map_err(|e| ConfigError::EnvParseError {
                    var: "BIKEDASH_TOP_HOURS".to_string(),
                    source: Box::new(e),
                })?;
        }

        // Chart configuration overrides
        if let Ok(dir) = env::var("BIKEDASH_OUTPUT_DIR") {
            config.charts.output_dir = dir.into();
        }

        if let Ok(width) = env::var("BIKEDASH_CHART_WIDTH") {
            config.charts.width = width.parse().map_err(|e| ConfigError::EnvParseError {
                var: "BIKEDASH_CHART_WIDTH".to_string(),
                source: Box::new(e),
            })?;
        }

        if let Ok(height) = env::var("BIKEDASH_CHART_HEIGHT") {
            config.charts.height = height.parse().map_err(|e| ConfigError::EnvParseError {
                var: "BIKEDASH_CHART_HEIGHT".to_string(),
                source: Box::new(e),
            })?;
        }

        // Logging configuration overrides
        if let Ok(level) = env::var("BIKEDASH_LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(())
    }
}
