//! Domain-specific error types and error handling.

mod types;


// Re-export all error types
pub use types::{ParseError, Segment, TokenError, ValidationFailure};

use ares_shared::errors::ConfigError;
use thiserror::Error;

/// Core domain errors raised while wiring up services
#[derive(Error, Debug)]
pub enum DomainError {
    // Bridge to specific error types
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

pub type DomainResult<T> = Result<T, DomainError>;
