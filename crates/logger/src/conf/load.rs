//! Load: config loading from file and environment variables.

use std::fs;
use std::path::Path;

use message::Options;

use crate::error::{ConfigError, ConfigResult};

use super::model::LoggerConfig;

const DEFAULT_CONFIG_FILE: &str = "logger.toml";

impl LoggerConfig {
    /// Load configuration from file or environment variables
    /// Priority: Environment Variables > Config File > Defaults
    pub fn load() -> ConfigResult<Self> {
        let config_path = std::env::var("LOGGER_CONFIG_FILE")
            .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

        let mut config = if Path::new(&config_path).exists() {
            tracing::info!("Loading logger configuration from: {}", config_path);
            Self::from_file(&config_path)?
        } else {
            tracing::info!("Config file not found at {}, using environment variables", config_path);
            Self::default()
        };

        config.apply_env(|key| std::env::var(key).ok());
        config.check()?;
        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: &str) -> ConfigResult<Self> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;

        let config: LoggerConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Override fields from `LOGGER_*` variables resolved through `var`.
    pub fn apply_env<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(options) = var("LOGGER_OPTIONS") {
            self.options = options
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(tag) = var("LOGGER_TAG") {
            self.tag = tag;
        }
        if let Some(verbose) = var("LOGGER_VERBOSE").and_then(|s| s.parse().ok()) {
            self.verbose = verbose;
        }
    }

    /// Validation at the load boundary, mapped onto `ConfigError`. Returns the
    /// combined render options.
    pub fn check(&self) -> ConfigResult<Options> {
        let options = self.render_options().map_err(ConfigError::UnknownOption)?;
        self.validate().map_err(ConfigError::Invalid)?;
        Ok(options)
    }
}
