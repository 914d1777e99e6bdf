//! Bearer token configuration

use serde::{Deserialize, Serialize};

/// Issuer embedded in tokens when none is configured
pub const DEFAULT_ISSUER: &str = "Ares API";

/// Token lifetime in seconds when none is configured (1 hour)
pub const DEFAULT_LIFETIME: i64 = 3600;

/// Configuration for the bearer token service
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TokenConfig {
    /// Identity string written to the `iss` claim
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// Token lifetime in seconds, added to `iat` to compute `exp`
    #[serde(default = "default_lifetime")]
    pub lifetime: i64,

    /// PEM-encoded RSA private key, relative to the base directory
    #[serde(default = "default_private_key_path")]
    pub private_key_path: String,

    /// PEM-encoded RSA public key, relative to the base directory
    #[serde(default = "default_public_key_path")]
    pub public_key_path: String,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            issuer: default_issuer(),
            lifetime: default_lifetime(),
            private_key_path: default_private_key_path(),
            public_key_path: default_public_key_path(),
        }
    }
}

impl TokenConfig {
    /// Create a token configuration for an issuer, keeping default paths
    pub fn new(issuer: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
            ..Default::default()
        }
    }

    /// Set the token lifetime in seconds
    pub fn with_lifetime(mut self, seconds: i64) -> Self {
        self.lifetime = seconds;
        self
    }

    /// Set the token lifetime in minutes
    pub fn with_lifetime_minutes(mut self, minutes: i64) -> Self {
        self.lifetime = minutes.saturating_mul(60);
        self
    }

    /// Set both key paths
    pub fn with_key_paths(
        mut self,
        private_key_path: impl Into<String>,
        public_key_path: impl Into<String>,
    ) -> Self {
        self.private_key_path = private_key_path.into();
        self.public_key_path = public_key_path.into();
        self
    }
}

fn default_issuer() -> String {
    String::from(DEFAULT_ISSUER)
}

fn default_lifetime() -> i64 {
    DEFAULT_LIFETIME
}

fn default_private_key_path() -> String {
    String::from("keys/jwt_private_key.pem")
}

fn default_public_key_path() -> String {
    String::from("keys/jwt_public_key.pem")
}
