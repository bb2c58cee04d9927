use message::RenderError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("Sink write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Render failed: {0}")]
    Render(#[from] RenderError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Unknown render option: {0}")]
    UnknownOption(String),
}

// Convenience type aliases
pub type LoggerResult<T> = Result<T, LoggerError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
