//! Token issuance

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::entities::token::{is_valid_lifetime, Claims, Header, Payload};
use crate::errors::TokenError;

use super::codec;
use super::signer::TokenSigner;

/// Builds and signs tokens.
///
/// Issuance is a straight pipeline over immutable values:
/// claims → payload → encoded segments → signature → token string.
#[derive(Clone)]
pub struct TokenIssuer {
    signer: Arc<dyn TokenSigner>,
    issuer: String,
    lifetime: i64,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("algorithm", &self.signer.algorithm())
            .field("issuer", &self.issuer)
            .field("lifetime", &self.lifetime)
            .finish()
    }
}

impl TokenIssuer {
    /// Creates an issuer; `lifetime` must be within `1..=MAX_LIFETIME`
    pub fn new(
        signer: Arc<dyn TokenSigner>,
        issuer: impl Into<String>,
        lifetime: i64,
    ) -> Result<Self, TokenError> {
        if !is_valid_lifetime(lifetime) {
            return Err(TokenError::InvalidLifetime { lifetime });
        }

        Ok(Self {
            signer,
            issuer: issuer.into(),
            lifetime,
        })
    }

    /// Token lifetime in seconds
    pub fn lifetime(&self) -> i64 {
        self.lifetime
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Issues a token valid from now for the configured lifetime
    pub fn issue(&self, claims: &Claims) -> Result<String, TokenError> {
        self.issue_at(claims, Utc::now().timestamp())
    }

    /// Issues a token as if the current time were `issued_at`
    ///
    /// # Errors
    ///
    /// * `TokenError::ReservedClaim` - `claims` names `iss`, `jti`, `iat`, `nbf` or `exp`
    /// * `TokenError::ExpiryOverflow` - `issued_at + lifetime` overflows
    /// * `TokenError::EncodingError` - the payload could not be serialized
    /// * `TokenError::SignatureError` - the signer rejected its key
    pub fn issue_at(&self, claims: &Claims, issued_at: i64) -> Result<String, TokenError> {
        if let Some(reserved) = claims.reserved_collision() {
            return Err(TokenError::ReservedClaim {
                claim: reserved.to_string(),
            });
        }

        let jti = Uuid::new_v4().to_string();
        let payload = Payload::new(
            self.issuer.as_str(),
            jti,
            issued_at,
            self.lifetime,
            claims.clone(),
        )?;
        let header = Header::new(self.signer.algorithm());

        let segments = codec::encode(&header, &payload)?;
        let signature = self
            .signer
            .sign(segments.signing_input().as_bytes())
            .map_err(|e| {
                tracing::error!(error = %e, "Token signing failed");
                e
            })?;

        tracing::debug!(
            jti = %payload.jti,
            iat = payload.iat,
            exp = payload.exp,
            claims = payload.claims.len(),
            "Issued token"
        );

        Ok(segments.with_signature(&signature))
    }
}
