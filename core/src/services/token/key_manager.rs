//! RS256 key management for token signing and verification

use std::fs;
use std::path::{Path, PathBuf};

use jsonwebtoken::{crypto, Algorithm, DecodingKey, EncodingKey};

use crate::errors::TokenError;

use super::config::{resolve, TokenServiceConfig};

/// Message signed and verified once at load time to prove the halves match
const PAIR_PROBE: &[u8] = b"ares.key-pair.probe";

/// Parsed RSA key pair used for token operations.
///
/// Keys are read and parsed once; the manager is immutable afterwards and
/// cheap to clone.
#[derive(Clone)]
pub struct Rs256KeyManager {
    /// Private key for signing tokens
    encoding_key: EncodingKey,
    /// Public key for verifying tokens
    decoding_key: DecodingKey,
    /// Path to private key file
    private_key_path: PathBuf,
    /// Path to public key file
    public_key_path: PathBuf,
}

impl std::fmt::Debug for Rs256KeyManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rs256KeyManager")
            .field("private_key_path", &self.private_key_path)
            .field("public_key_path", &self.public_key_path)
            .finish()
    }
}

impl Rs256KeyManager {
    /// Loads both halves of the key pair, resolving relative paths
    /// against `base_dir`.
    ///
    /// # Arguments
    ///
    /// * `base_dir` - Application base directory
    /// * `private_key_path` - Path to the PEM-encoded RSA private key
    /// * `public_key_path` - Path to the PEM-encoded RSA public key
    ///
    /// # Returns
    ///
    /// * `Ok(Rs256KeyManager)` - Keys loaded and verified to correspond
    /// * `Err(TokenError::KeyLoadError)` - A file is missing, unreadable,
    ///   not RSA key material, or the halves do not belong together
    pub fn load(
        base_dir: impl AsRef<Path>,
        private_key_path: impl AsRef<Path>,
        public_key_path: impl AsRef<Path>,
    ) -> Result<Self, TokenError> {
        let base_dir = base_dir.as_ref();
        let private_key_path = resolve(base_dir, private_key_path.as_ref());
        let public_key_path = resolve(base_dir, public_key_path.as_ref());

        let private_key_pem = Self::read_key_file(&private_key_path, "private")?;
        let public_key_pem = Self::read_key_file(&public_key_path, "public")?;

        let manager = Self::from_pem(
            &private_key_pem,
            &public_key_pem,
            private_key_path,
            public_key_path,
        )?;

        tracing::info!(
            private_key_path = %manager.private_key_path.display(),
            public_key_path = %manager.public_key_path.display(),
            "Loaded RS256 key pair"
        );

        Ok(manager)
    }

    /// Loads the key pair named by a token service configuration
    pub fn from_config(config: &TokenServiceConfig) -> Result<Self, TokenError> {
        Self::load(
            &config.base_dir,
            &config.private_key_path,
            &config.public_key_path,
        )
    }

    /// Creates a key manager from PEM strings (useful for testing or embedded keys)
    pub fn from_pem_strings(
        private_key_pem: &str,
        public_key_pem: &str,
    ) -> Result<Self, TokenError> {
        Self::from_pem(
            private_key_pem.as_bytes(),
            public_key_pem.as_bytes(),
            PathBuf::from("memory"),
            PathBuf::from("memory"),
        )
    }

    /// Reads raw key bytes from disk
    pub fn read_key_file(path: &Path, which: &str) -> Result<Vec<u8>, TokenError> {
        fs::read(path).map_err(|e| TokenError::KeyLoadError {
            message: format!("Failed to read {} key {}: {}", which, path.display(), e),
        })
    }

    fn from_pem(
        private_key_pem: &[u8],
        public_key_pem: &[u8],
        private_key_path: PathBuf,
        public_key_path: PathBuf,
    ) -> Result<Self, TokenError> {
        let encoding_key = EncodingKey::from_rsa_pem(private_key_pem).map_err(|e| {
            TokenError::KeyLoadError {
                message: format!("Invalid private key format: {}", e),
            }
        })?;

        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem).map_err(|e| {
            TokenError::KeyLoadError {
                message: format!("Invalid public key format: {}", e),
            }
        })?;

        let manager = Self {
            encoding_key,
            decoding_key,
            private_key_path,
            public_key_path,
        };
        manager.check_pair()?;

        Ok(manager)
    }

    /// Signs a probe with the private half and verifies it with the public half
    fn check_pair(&self) -> Result<(), TokenError> {
        let signature = crypto::sign(PAIR_PROBE, &self.encoding_key, Algorithm::RS256)
            .map_err(|e| TokenError::KeyLoadError {
                message: format!("Private key cannot sign: {}", e),
            })?;

        match crypto::verify(&signature, PAIR_PROBE, &self.decoding_key, Algorithm::RS256) {
            Ok(true) => Ok(()),
            Ok(false) => Err(TokenError::KeyLoadError {
                message: "Public key does not match private key".to_string(),
            }),
            Err(e) => Err(TokenError::KeyLoadError {
                message: format!("Public key cannot verify: {}", e),
            }),
        }
    }

    /// Returns the encoding key for signing
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    /// Returns the decoding key for verification
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }

    /// Returns the paths to the key files
    pub fn key_paths(&self) -> (&Path, &Path) {
        (&self.private_key_path, &self.public_key_path)
    }
}
