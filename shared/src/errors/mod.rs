//! Shared error types for configuration and process setup

use thiserror::Error;

/// Errors raised while loading configuration or installing the logger
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration load failed: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid base directory: {message}")]
    BaseDir { message: String },

    #[error("Logging setup failed: {message}")]
    Logging { message: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;
