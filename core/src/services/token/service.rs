//! Main token service implementation

use std::sync::Arc;

use crate::domain::entities::token::Claims;
use crate::errors::{ParseError, TokenError};

use super::codec::{self, DecodedToken};
use super::config::TokenServiceConfig;
use super::issuer::TokenIssuer;
use super::key_manager::Rs256KeyManager;
use super::signer::{Rs256Signer, TokenSigner};
use super::validator::{TokenValidator, ValidationResult};

/// Service for issuing and verifying bearer tokens.
///
/// Holds only immutable state after construction, so one instance can be
/// cloned into every request handler and used concurrently.
#[derive(Debug, Clone)]
pub struct TokenService {
    issuer: TokenIssuer,
    validator: TokenValidator,
}

impl TokenService {
    /// Creates a new token service, loading the RS256 key pair from disk
    ///
    /// # Arguments
    ///
    /// * `config` - Issuer, lifetime and key locations
    ///
    /// # Returns
    ///
    /// * `Ok(TokenService)` - Ready to issue and validate tokens
    /// * `Err(TokenError::KeyLoadError)` - Key files missing or invalid
    /// * `Err(TokenError::InvalidLifetime)` - Lifetime outside `1..=MAX_LIFETIME`
    pub fn new(config: TokenServiceConfig) -> Result<Self, TokenError> {
        config.validate()?;
        let keys = Rs256KeyManager::from_config(&config)?;
        Self::with_signer(config, Arc::new(Rs256Signer::new(keys)))
    }

    /// Creates a new token service with an explicit RS256 key manager
    pub fn with_rs256_keys(
        config: TokenServiceConfig,
        key_manager: Rs256KeyManager,
    ) -> Result<Self, TokenError> {
        Self::with_signer(config, Arc::new(Rs256Signer::new(key_manager)))
    }

    /// Creates a new token service around any signer; key paths in
    /// `config` are ignored
    pub fn with_signer(
        config: TokenServiceConfig,
        signer: Arc<dyn TokenSigner>,
    ) -> Result<Self, TokenError> {
        let issuer = TokenIssuer::new(Arc::clone(&signer), config.issuer, config.lifetime)?;
        let validator = TokenValidator::new(signer);

        Ok(Self { issuer, validator })
    }

    /// Token lifetime in seconds
    pub fn lifetime(&self) -> i64 {
        self.issuer.lifetime()
    }

    /// Issuer written to every token
    pub fn issuer(&self) -> &str {
        self.issuer.issuer()
    }

    /// Issues a signed token carrying `claims`
    pub fn issue(&self, claims: &Claims) -> Result<String, TokenError> {
        self.issuer.issue(claims)
    }

    /// Issues a signed token as if the current time were `issued_at`
    pub fn issue_at(&self, claims: &Claims, issued_at: i64) -> Result<String, TokenError> {
        self.issuer.issue_at(claims, issued_at)
    }

    /// Decodes a token without checking its signature or time window.
    ///
    /// Claims read this way are untrusted.
    pub fn parse(&self, token: &str) -> Result<DecodedToken, ParseError> {
        codec::decode(token)
    }

    /// Verifies a token against the current time
    pub fn validate(&self, token: &str) -> ValidationResult {
        self.validator.validate(token)
    }

    /// Verifies a token as if the current time were `now`
    pub fn validate_at(&self, token: &str, now: i64) -> ValidationResult {
        self.validator.validate_at(token, now)
    }

    /// Verifies raw bytes from the wire as if the current time were `now`
    pub fn validate_bytes(&self, token: &[u8], now: i64) -> ValidationResult {
        self.validator.validate_bytes(token, now)
    }

    /// Pass/fail shorthand for `validate`
    pub fn validate_token(&self, token: &str) -> bool {
        self.validate(token).is_valid()
    }
}
