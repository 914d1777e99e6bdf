//! Tracing subscriber setup

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, LoggingConfig};
use crate::errors::{ConfigError, ConfigResult};

/// Install the global tracing subscriber described by `config`.
///
/// `RUST_LOG` takes precedence over `config.level` when it is set. Fails
/// instead of panicking when the filter cannot be parsed or a global
/// subscriber has already been installed.
pub fn init_tracing(config: &LoggingConfig) -> ConfigResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| ConfigError::Logging {
            message: format!("Invalid log filter '{}': {}", config.level, e),
        })?;

    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_file(config.source_location)
                    .with_line_number(config.source_location),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_ansi(config.colored)
                    .with_file(config.source_location)
                    .with_line_number(config.source_location),
            )
            .try_init(),
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_ansi(config.colored)
                    .with_target(true),
            )
            .try_init(),
    };

    result.map_err(|e| ConfigError::Logging {
        message: e.to_string(),
    })?;

    tracing::debug!(level = %config.level, format = ?config.format, "Tracing initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_an_error_not_a_panic() {
        let config = LoggingConfig {
            format: LogFormat::Compact,
            colored: false,
            ..Default::default()
        };

        let _ = init_tracing(&config);
        let second = init_tracing(&config);

        assert!(matches!(second, Err(ConfigError::Logging { .. })));
    }
}
