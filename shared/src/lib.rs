//! Shared configuration and process setup for the Ares backend
//!
//! This crate provides functionality used across server modules:
//! - Layered configuration (defaults, per-environment TOML, `ARES__*` variables)
//! - Environment detection
//! - Tracing subscriber initialization

pub mod config;
pub mod errors;
pub mod logging;

// Re-export commonly used items at crate root
pub use config::{AppConfig, Environment, LogFormat, LoggingConfig, TokenConfig};
pub use errors::{ConfigError, ConfigResult};
pub use logging::init_tracing;
