//! Configuration for the token service

use std::path::{Path, PathBuf};

use ares_shared::config::{AppConfig, TokenConfig};

use crate::domain::entities::token::is_valid_lifetime;
use crate::errors::TokenError;

/// Configuration for the token service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenServiceConfig {
    /// Identity written to the `iss` claim
    pub issuer: String,
    /// Token lifetime in seconds
    pub lifetime: i64,
    /// Directory that relative key paths are resolved against
    pub base_dir: PathBuf,
    /// Private key path (PEM)
    pub private_key_path: PathBuf,
    /// Public key path (PEM)
    pub public_key_path: PathBuf,
}

impl TokenServiceConfig {
    /// Creates a config from the shared token settings and a base directory
    pub fn new(token: &TokenConfig, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            issuer: token.issuer.clone(),
            lifetime: token.lifetime,
            base_dir: base_dir.into(),
            private_key_path: PathBuf::from(&token.private_key_path),
            public_key_path: PathBuf::from(&token.public_key_path),
        }
    }

    /// Creates a config from the loaded application configuration
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self::new(&config.token, config.base_dir.clone())
    }

    /// Ensures the lifetime keeps `exp` strictly after `iat`
    pub fn validate(&self) -> Result<(), TokenError> {
        if !is_valid_lifetime(self.lifetime) {
            return Err(TokenError::InvalidLifetime {
                lifetime: self.lifetime,
            });
        }
        Ok(())
    }

    /// Private key path resolved against the base directory
    pub fn resolved_private_key_path(&self) -> PathBuf {
        resolve(&self.base_dir, &self.private_key_path)
    }

    /// Public key path resolved against the base directory
    pub fn resolved_public_key_path(&self) -> PathBuf {
        resolve(&self.base_dir, &self.public_key_path)
    }
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self::new(&TokenConfig::default(), ".")
    }
}

/// Joins `path` onto `base_dir` unless it is already absolute
pub(crate) fn resolve(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::token::MAX_LIFETIME;

    #[test]
    fn test_relative_paths_resolve_against_base_dir() {
        let config = TokenServiceConfig::new(&TokenConfig::default(), "/srv/ares");

        assert_eq!(
            config.resolved_private_key_path(),
            PathBuf::from("/srv/ares/keys/jwt_private_key.pem")
        );
        assert_eq!(
            config.resolved_public_key_path(),
            PathBuf::from("/srv/ares/keys/jwt_public_key.pem")
        );
    }

    #[test]
    fn test_absolute_paths_are_kept() {
        let token = TokenConfig::default().with_key_paths("/etc/ares/private.pem", "public.pem");
        let config = TokenServiceConfig::new(&token, "/srv/ares");

        assert_eq!(
            config.resolved_private_key_path(),
            PathBuf::from("/etc/ares/private.pem")
        );
        assert_eq!(
            config.resolved_public_key_path(),
            PathBuf::from("/srv/ares/public.pem")
        );
    }

    #[test]
    fn test_non_positive_lifetime_is_rejected() {
        let mut config = TokenServiceConfig::default();
        assert!(config.validate().is_ok());

        config.lifetime = 0;
        assert_eq!(
            config.validate(),
            Err(TokenError::InvalidLifetime { lifetime: 0 })
        );

        config.lifetime = -5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_lifetime_upper_bound() {
        let mut config = TokenServiceConfig::default();

        config.lifetime = MAX_LIFETIME;
        assert!(config.validate().is_ok());

        config.lifetime = i64::MAX;
        assert_eq!(
            config.validate(),
            Err(TokenError::InvalidLifetime { lifetime: i64::MAX })
        );
    }
}
