//! Token service module for bearer token management
//!
//! This module handles all token-related operations:
//! - RS256 key loading (`key_manager`)
//! - Signature production and checking (`signer`)
//! - Compact three-segment encoding (`codec`)
//! - Issuance (`issuer`) and verification (`validator`)
//! - The `TokenService` facade tying them together

pub mod codec;
mod config;
mod issuer;
mod key_manager;
mod service;
mod signer;
mod validator;

#[cfg(test)]
mod tests;

pub use codec::{DecodedToken, EncodedSegments};
pub use config::TokenServiceConfig;
pub use issuer::TokenIssuer;
pub use key_manager::Rs256KeyManager;
pub use service::TokenService;
pub use signer::{Rs256Signer, TokenSigner};
pub use validator::{TokenValidator, ValidationResult};
