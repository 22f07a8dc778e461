//! The authorization gate: bearer extraction, verification, role check.
//!
//! Checks run in a fixed order and the first failure wins:
//!
//! 1. no credential → [`AuthError::NoToken`]
//! 2. bad signature or shape → [`AuthError::InvalidToken`]
//! 3. past `exp` → [`AuthError::ExpiredToken`]
//! 4. role outside the required set → [`AuthError::Forbidden`]

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use folio_config::JwtConfig;

use crate::error::AuthError;
use crate::jwt::verify_token_at;
use crate::role::{RequiredRoles, Role};

const BEARER_SCHEME: &str = "bearer";

/// Identity established by a successful gate check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedUser {
    pub id: String,
    pub role: Role,
}

impl AuthenticatedUser {
    /// The token id as a database key. Tokens whose id is not a UUID can pass
    /// the gate but never match a stored user.
    pub fn user_id(&self) -> Result<Uuid, AuthError> {
        Uuid::parse_str(&self.id).map_err(|_| AuthError::InvalidToken)
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Pulls the token out of an `Authorization` header value.
///
/// A missing or empty header, or `Bearer` with nothing after it, counts as no
/// token. Any other scheme is an invalid token. The scheme is matched
/// case-insensitively.
pub fn extract_bearer(header: Option<&str>) -> Result<&str, AuthError> {
    let value = match header.map(str::trim) {
        None | Some("") => return Err(AuthError::NoToken),
        Some(value) => value,
    };

    let (scheme, token) = value.split_once(' ').unwrap_or((value, ""));
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return Err(AuthError::InvalidToken);
    }

    match token.trim() {
        "" => Err(AuthError::NoToken),
        token => Ok(token),
    }
}

/// Runs the full gate against the current time.
pub fn authorize(
    header: Option<&str>,
    required: &RequiredRoles,
    jwt_config: &JwtConfig,
) -> Result<AuthenticatedUser, AuthError> {
    authorize_at(header, required, jwt_config, Utc::now().timestamp())
}

pub fn authorize_at(
    header: Option<&str>,
    required: &RequiredRoles,
    jwt_config: &JwtConfig,
    now: i64,
) -> Result<AuthenticatedUser, AuthError> {
    let token = extract_bearer(header)?;
    let claims = verify_token_at(token, jwt_config, now)?;

    let user = AuthenticatedUser {
        id: claims.user.id,
        role: claims.user.role,
    };
    check_roles(&user, required)?;

    Ok(user)
}

/// Role check on an already-authenticated user.
pub fn check_roles(user: &AuthenticatedUser, required: &RequiredRoles) -> Result<(), AuthError> {
    if required.permits(user.role) {
        Ok(())
    } else {
        Err(AuthError::Forbidden)
    }
}
