//! # Ares Core
//!
//! Core domain layer for the Ares backend: token entities, error types and
//! the bearer token service that issues and verifies RS256-signed tokens.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{Claims, Header, Payload, MAX_LIFETIME};
pub use errors::{DomainError, DomainResult, ParseError, Segment, TokenError, ValidationFailure};
pub use services::token::{
    DecodedToken, Rs256KeyManager, Rs256Signer, TokenIssuer, TokenService, TokenServiceConfig,
    TokenSigner, TokenValidator, ValidationResult,
};
