//! Access token issuance and verification.
//!
//! Tokens are HS256 JWTs signed with [`JwtConfig::secret`] and carrying
//! [`TokenClaims`]. Verification distinguishes an expired token from an
//! invalid one so clients can tell "log in again" from "this was never valid".
//!
//! # Example
//!
//! ```ignore
//! use folio_auth::{Role, create_access_token, verify_token};
//! use folio_config::JwtConfig;
//!
//! let config = JwtConfig::from_env()?;
//!
//! let token = create_access_token(&user.id.to_string(), Role::User, &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.user.role, Role::User);
//! ```

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::debug;

use folio_config::JwtConfig;

use crate::claims::TokenClaims;
use crate::error::AuthError;
use crate::role::Role;

/// Issues an access token valid for `jwt_config.access_token_expiry` seconds from now.
///
/// # Errors
///
/// Returns [`AuthError::Signing`] if the signing primitive fails.
pub fn create_access_token(
    user_id: &str,
    role: Role,
    jwt_config: &JwtConfig,
) -> Result<String, AuthError> {
    create_access_token_at(user_id, role, jwt_config, Utc::now().timestamp())
}

/// Issues an access token as if the current time were `issued_at`.
pub fn create_access_token_at(
    user_id: &str,
    role: Role,
    jwt_config: &JwtConfig,
    issued_at: i64,
) -> Result<String, AuthError> {
    let claims = TokenClaims::new(user_id, role, issued_at, jwt_config.access_token_expiry);

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AuthError::Signing(e.to_string()))
}

/// Verifies a token against the current time.
///
/// # Errors
///
/// - [`AuthError::ExpiredToken`] when the signature is good but `exp` has passed
/// - [`AuthError::InvalidToken`] for anything else that fails verification
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<TokenClaims, AuthError> {
    verify_token_at(token, jwt_config, Utc::now().timestamp())
}

/// Verifies a token against the supplied clock.
///
/// Expiry is checked here rather than by `jsonwebtoken`, with no leeway, so
/// a token is rejected from the exact second `exp` is reached.
pub fn verify_token_at(
    token: &str,
    jwt_config: &JwtConfig,
    now: i64,
) -> Result<TokenClaims, AuthError> {
    let data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation(),
    )
    .map_err(|e| match e.kind() {
        ErrorKind::Crypto(_) => AuthError::Signing(e.to_string()),
        _ => {
            debug!(error = %e, "Rejected bearer token");
            AuthError::InvalidToken
        }
    })?;

    if data.claims.is_expired_at(now) {
        return Err(AuthError::ExpiredToken);
    }

    Ok(data.claims)
}

fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.leeway = 0;
    validation
}
