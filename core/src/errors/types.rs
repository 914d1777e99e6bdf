//! Error types for token issuance and verification
//!
//! `TokenError` covers failures that reflect configuration or programmer
//! error and abort the operation. `ParseError` and `ValidationFailure`
//! describe why an untrusted token was rejected; they are carried as data
//! inside a validation result and never unwind a verification call.

use thiserror::Error;

use crate::domain::entities::token::MAX_LIFETIME;

/// Fatal token service errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Key material could not be loaded: {message}")]
    KeyLoadError { message: String },

    #[error("Signing failed: {message}")]
    SignatureError { message: String },

    #[error("Claims could not be encoded: {message}")]
    EncodingError { message: String },

    #[error("Claim '{claim}' is reserved and set by the issuer")]
    ReservedClaim { claim: String },

    #[error("Token lifetime must be between 1 and {} seconds, got {lifetime}", MAX_LIFETIME)]
    InvalidLifetime { lifetime: i64 },

    #[error("Expiry overflows: issued at {issued_at} with lifetime {lifetime}")]
    ExpiryOverflow { issued_at: i64, lifetime: i64 },
}

/// Segment of a compact token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Header,
    Payload,
    Signature,
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Segment::Header => write!(f, "header"),
            Segment::Payload => write!(f, "payload"),
            Segment::Signature => write!(f, "signature"),
        }
    }
}

/// Structural problems with a token string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Token is not valid UTF-8")]
    NotUtf8,

    #[error("Expected 3 dot-separated segments, found {found}")]
    SegmentCount { found: usize },

    #[error("Invalid base64url in {segment} segment")]
    InvalidBase64 { segment: Segment },

    #[error("Invalid JSON in {segment} segment")]
    InvalidJson { segment: Segment },
}

/// Reason a token failed verification
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationFailure {
    #[error("Malformed token: {0}")]
    Malformed(#[from] ParseError),

    #[error("Unexpected algorithm: expected {expected}, found {found}")]
    AlgorithmMismatch { expected: String, found: String },

    #[error("Token signature verification failed")]
    SignatureMismatch,

    #[error("Token not valid before {nbf} (now {now})")]
    NotYetValid { nbf: i64, now: i64 },

    #[error("Token expired at {exp} (now {now})")]
    Expired { exp: i64, now: i64 },
}
