//! Model: LoggerConfig.

use message::{Options, DEFAULT_DELIMITER};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Render option names, case-insensitive (`date`, `levels`, `json`, `all`, ...).
    pub options: Vec<String>,
    /// Base tag prepended to every message; empty for none.
    pub tag: String,
    /// When false, DEBUG messages are dropped.
    pub verbose: bool,
    /// Path delimiter for flattened attributes.
    pub delimiter: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            options: ["date", "time", "levels", "tags", "trace", "colors"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            tag: "".to_string(),
            verbose: true,
            delimiter: DEFAULT_DELIMITER.to_string(),
        }
    }
}

impl LoggerConfig {
    /// Combined render options. Fails on the first unknown name.
    pub fn render_options(&self) -> Result<Options, String> {
        Options::from_names(&self.options)
    }

    /// Checks everything except option names, which `render_options` reports.
    pub fn validate(&self) -> Result<(), String> {
        if self.delimiter.is_empty() {
            return Err("delimiter must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_match_all() {
        let config = LoggerConfig::default();
        assert_eq!(config.render_options(), Ok(Options::ALL));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: LoggerConfig = toml::from_str(r#"tag = "payments""#).unwrap();
        assert_eq!(config.tag, "payments");
        assert!(config.verbose);
        assert_eq!(config.delimiter, ".");
        assert_eq!(config.options.len(), 6);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = LoggerConfig {
            options: vec!["levels".into(), "JSON".into()],
            tag: "api".into(),
            verbose: false,
            delimiter: "/".into(),
        };
        let encoded = toml::to_string(&config).unwrap();
        let decoded: LoggerConfig = toml::from_str(&encoded).unwrap();
        assert_eq!(decoded, config);
        assert_eq!(decoded.render_options(), Ok(Options::LEVELS | Options::JSON));
    }

    #[test]
    fn test_unknown_option_reported_by_render_options() {
        let config = LoggerConfig {
            options: vec!["levels".into(), "sparkles".into()],
            ..LoggerConfig::default()
        };
        assert_eq!(config.render_options(), Err("sparkles".to_string()));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_delimiter() {
        let config = LoggerConfig {
            delimiter: String::new(),
            ..LoggerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
