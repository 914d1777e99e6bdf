//! Configuration module
//!
//! - `environment` - Environment detection and logging configuration
//! - `token` - Bearer token issuance and key material configuration
//!
//! Sources are layered with the `config` crate, later sources winning:
//! built-in defaults for the environment, then `config/<environment>.toml`
//! under the base directory (optional), then `ARES__*` environment
//! variables such as `ARES__TOKEN__LIFETIME=600`.

pub mod environment;
pub mod token;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, ConfigResult};

pub use environment::{Environment, LogFormat, LoggingConfig};
pub use token::TokenConfig;

/// Prefix for configuration environment variables
pub const ENV_PREFIX: &str = "ARES";

/// Variable naming the application base directory
pub const BASE_DIR_VAR: &str = "ARES__BASE_DIR";

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Directory that relative key paths are resolved against
    pub base_dir: PathBuf,

    /// Token service configuration
    #[serde(default)]
    pub token: TokenConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Built-in defaults for an environment
    pub fn for_environment(environment: Environment, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            environment,
            base_dir: base_dir.into(),
            token: TokenConfig::default(),
            logging: LoggingConfig::for_environment(environment),
        }
    }

    /// Load configuration from the process environment.
    ///
    /// Reads `.env` if present, detects the environment from
    /// `ENVIRONMENT`/`ENV`/`RUST_ENV`, and takes the base directory from
    /// `ARES__BASE_DIR` or the current working directory.
    pub fn load() -> ConfigResult<Self> {
        dotenvy::dotenv().ok();

        let environment = Environment::from_env();
        let base_dir = match std::env::var(BASE_DIR_VAR) {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => std::env::current_dir().map_err(|e| ConfigError::BaseDir {
                message: e.to_string(),
            })?,
        };

        Self::load_from(base_dir, environment)
    }

    /// Load configuration for an explicit base directory and environment
    pub fn load_from(base_dir: impl AsRef<Path>, environment: Environment) -> ConfigResult<Self> {
        let base_dir = base_dir.as_ref();
        let defaults = Self::for_environment(environment, base_dir);

        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&defaults)?)
            .add_source(
                config::File::from(base_dir.join(environment.config_file())).required(false),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let loaded: Self = settings.try_deserialize()?;

        tracing::debug!(
            environment = %loaded.environment,
            base_dir = %loaded.base_dir.display(),
            issuer = %loaded.token.issuer,
            lifetime = loaded.token.lifetime,
            "Configuration loaded"
        );

        Ok(loaded)
    }
}
