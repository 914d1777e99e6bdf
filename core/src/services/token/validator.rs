//! Token verification
//!
//! A token moves through decode → algorithm check → signature check →
//! time checks, stopping at the first failing step. Every outcome is
//! returned as a `ValidationResult`; no input string makes validation
//! fail with an error or panic.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::entities::token::Payload;
use crate::errors::{ParseError, ValidationFailure};

use super::codec;
use super::signer::TokenSigner;

/// Outcome of verifying one token
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    /// Signature and time window checked; carries the verified payload
    Valid(Payload),
    /// Rejected at the first failing check
    Invalid(ValidationFailure),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid(_))
    }

    /// The verified payload, if valid
    pub fn payload(&self) -> Option<&Payload> {
        match self {
            ValidationResult::Valid(payload) => Some(payload),
            ValidationResult::Invalid(_) => None,
        }
    }

    /// Why the token was rejected, if invalid
    pub fn failure(&self) -> Option<&ValidationFailure> {
        match self {
            ValidationResult::Valid(_) => None,
            ValidationResult::Invalid(failure) => Some(failure),
        }
    }

    /// Converts into a `Result` for callers that want `?`
    pub fn into_result(self) -> Result<Payload, ValidationFailure> {
        match self {
            ValidationResult::Valid(payload) => Ok(payload),
            ValidationResult::Invalid(failure) => Err(failure),
        }
    }
}

impl From<Result<Payload, ValidationFailure>> for ValidationResult {
    fn from(result: Result<Payload, ValidationFailure>) -> Self {
        match result {
            Ok(payload) => ValidationResult::Valid(payload),
            Err(failure) => ValidationResult::Invalid(failure),
        }
    }
}

/// Verifies tokens against a signer's public key
#[derive(Clone)]
pub struct TokenValidator {
    signer: Arc<dyn TokenSigner>,
}

impl std::fmt::Debug for TokenValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenValidator")
            .field("algorithm", &self.signer.algorithm())
            .finish()
    }
}

impl TokenValidator {
    pub fn new(signer: Arc<dyn TokenSigner>) -> Self {
        Self { signer }
    }

    /// Validates against the current wall-clock time
    pub fn validate(&self, token: &str) -> ValidationResult {
        self.validate_at(token, Utc::now().timestamp())
    }

    /// Validates as if the current time were `now`
    pub fn validate_at(&self, token: &str, now: i64) -> ValidationResult {
        let result: ValidationResult = self.check(token, now).into();

        if let ValidationResult::Invalid(failure) = &result {
            tracing::debug!(reason = %failure, now, "Token rejected");
        }

        result
    }

    /// Validates raw bytes, rejecting anything that is not UTF-8
    pub fn validate_bytes(&self, token: &[u8], now: i64) -> ValidationResult {
        match std::str::from_utf8(token) {
            Ok(token) => self.validate_at(token, now),
            Err(_) => {
                tracing::debug!(reason = %ParseError::NotUtf8, now, "Token rejected");
                ValidationResult::Invalid(ParseError::NotUtf8.into())
            }
        }
    }

    fn check(&self, token: &str, now: i64) -> Result<Payload, ValidationFailure> {
        let decoded = codec::decode(token)?;

        let expected = self.signer.algorithm();
        if decoded.header.alg != expected {
            return Err(ValidationFailure::AlgorithmMismatch {
                expected: expected.to_string(),
                found: decoded.header.alg,
            });
        }

        if !self
            .signer
            .verify(decoded.signing_input().as_bytes(), &decoded.signature)
        {
            return Err(ValidationFailure::SignatureMismatch);
        }

        let payload = decoded.payload;
        if payload.is_premature_at(now) {
            return Err(ValidationFailure::NotYetValid {
                nbf: payload.nbf,
                now,
            });
        }
        if payload.is_expired_at(now) {
            return Err(ValidationFailure::Expired {
                exp: payload.exp,
                now,
            });
        }

        Ok(payload)
    }
}
