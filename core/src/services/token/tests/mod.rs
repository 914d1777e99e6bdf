//! Tests for the token service components

mod key_manager_tests;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::errors::TokenError;
use crate::services::token::{Rs256KeyManager, TokenService, TokenServiceConfig, TokenSigner};

pub(super) fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Key pair shared by most tests; parsed once per test binary
pub(super) static KEYS: Lazy<Rs256KeyManager> = Lazy::new(|| {
    Rs256KeyManager::load(
        fixtures_dir(),
        "keys/jwt_private_key.pem",
        "keys/jwt_public_key.pem",
    )
    .expect("fixture key pair should load")
});

/// Unrelated key pair
pub(super) static OTHER_KEYS: Lazy<Rs256KeyManager> = Lazy::new(|| {
    Rs256KeyManager::load(
        fixtures_dir(),
        "keys/other_private_key.pem",
        "keys/other_public_key.pem",
    )
    .expect("second fixture key pair should load")
});

pub(super) fn test_config(issuer: &str, lifetime: i64) -> TokenServiceConfig {
    TokenServiceConfig {
        issuer: issuer.to_string(),
        lifetime,
        base_dir: fixtures_dir(),
        private_key_path: PathBuf::from("keys/jwt_private_key.pem"),
        public_key_path: PathBuf::from("keys/jwt_public_key.pem"),
    }
}

pub(super) fn service(issuer: &str, lifetime: i64) -> TokenService {
    TokenService::with_rs256_keys(test_config(issuer, lifetime), KEYS.clone())
        .expect("service should build")
}

/// Cheap stand-in signer: the "signature" is the message reversed
pub(super) struct ReversingSigner;

impl TokenSigner for ReversingSigner {
    fn algorithm(&self) -> &'static str {
        "REV"
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, TokenError> {
        Ok(message.iter().rev().copied().collect())
    }

    fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        message.iter().rev().eq(signature.iter())
    }
}

/// Signer whose key is unusable
pub(super) struct BrokenSigner;

impl TokenSigner for BrokenSigner {
    fn algorithm(&self) -> &'static str {
        "RS256"
    }

    fn sign(&self, _message: &[u8]) -> Result<Vec<u8>, TokenError> {
        Err(TokenError::SignatureError {
            message: "key is structurally invalid".to_string(),
        })
    }

    fn verify(&self, _message: &[u8], _signature: &[u8]) -> bool {
        false
    }
}

pub(super) fn reversing_service(lifetime: i64) -> TokenService {
    TokenService::with_signer(test_config("Ares API", lifetime), Arc::new(ReversingSigner))
        .expect("service should build")
}
