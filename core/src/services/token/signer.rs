//! Signature capability used by token issuance and verification

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::{crypto, Algorithm};

use crate::domain::entities::token::ALGORITHM_RS256;
use crate::errors::TokenError;

use super::key_manager::Rs256KeyManager;

/// Produces and checks signatures over raw bytes.
///
/// Implementations hold their own key material. `verify` reports a
/// mismatch as `false`; it never fails on untrusted input.
pub trait TokenSigner: Send + Sync {
    /// Algorithm identifier written to and expected in token headers
    fn algorithm(&self) -> &'static str;

    /// Signs `message`, returning the raw signature bytes
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, TokenError>;

    /// Checks `signature` over `message`
    fn verify(&self, message: &[u8], signature: &[u8]) -> bool;
}

/// RSASSA-PKCS1-v1_5 with SHA-256
#[derive(Debug, Clone)]
pub struct Rs256Signer {
    keys: Rs256KeyManager,
}

impl Rs256Signer {
    pub fn new(keys: Rs256KeyManager) -> Self {
        Self { keys }
    }
}

impl TokenSigner for Rs256Signer {
    fn algorithm(&self) -> &'static str {
        ALGORITHM_RS256
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, TokenError> {
        // jsonwebtoken hands back the signature base64url-encoded
        let encoded = crypto::sign(message, self.keys.encoding_key(), Algorithm::RS256).map_err(
            |e| TokenError::SignatureError {
                message: e.to_string(),
            },
        )?;

        URL_SAFE_NO_PAD
            .decode(encoded)
            .map_err(|e| TokenError::SignatureError {
                message: e.to_string(),
            })
    }

    fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        let encoded = URL_SAFE_NO_PAD.encode(signature);
        crypto::verify(&encoded, message, self.keys.decoding_key(), Algorithm::RS256)
            .unwrap_or(false)
    }
}
