//! Bearer token configuration.
//!
//! The signing secret is process-wide but never global: it lives in this
//! struct, which is handed to the issuer and the verifier explicitly.
//!
//! # Environment Variables
//!
//! - `JWT_SECRET`: HMAC signing secret (required)
//! - `JWT_ACCESS_EXPIRY`: token lifetime in seconds (default: 3600)

use std::env;

use crate::{ConfigError, env_or};

/// Default token lifetime: one hour.
pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 3600;

/// Secrets shorter than this are accepted with a warning.
pub const RECOMMENDED_SECRET_LEN: usize = 32;

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Token lifetime in seconds.
    pub access_token_expiry: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("access_token_expiry", &self.access_token_expiry)
            .finish()
    }
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            access_token_expiry: DEFAULT_ACCESS_TOKEN_EXPIRY,
        }
    }

    #[must_use]
    pub fn with_expiry(mut self, seconds: i64) -> Self {
        self.access_token_expiry = seconds;
        self
    }

    /// Loads the config, failing when `JWT_SECRET` is missing or unusable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = env::var("JWT_SECRET").map_err(|_| ConfigError::MissingVar("JWT_SECRET"))?;
        let config = Self::new(secret)
            .with_expiry(env_or("JWT_ACCESS_EXPIRY", DEFAULT_ACCESS_TOKEN_EXPIRY));
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.trim().is_empty() {
            return Err(ConfigError::MissingVar("JWT_SECRET"));
        }
        if self.access_token_expiry <= 0 {
            return Err(ConfigError::Invalid {
                key: "JWT_ACCESS_EXPIRY",
                reason: "must be a positive number of seconds".to_string(),
            });
        }
        if self.secret.len() < RECOMMENDED_SECRET_LEN {
            tracing::warn!(
                len = self.secret.len(),
                "JWT secret is shorter than the recommended {} bytes",
                RECOMMENDED_SECRET_LEN
            );
        }
        Ok(())
    }
}
