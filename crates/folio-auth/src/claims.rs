//! The signed token payload.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::AuthError;
use crate::role::Role;

/// Identity embedded in a token.
///
/// `id` is kept as an opaque string; handlers that need a database key
/// parse it with [`TokenUser::user_id`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TokenUser {
    pub id: String,
    pub role: Role,
}

impl TokenUser {
    pub fn user_id(&self) -> Result<Uuid, AuthError> {
        Uuid::parse_str(&self.id).map_err(|_| AuthError::InvalidToken)
    }
}

/// `{"user": {"id", "role"}, "iat", "exp"}`, times in seconds since the epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub user: TokenUser,
    pub iat: i64,
    pub exp: i64,
}

impl TokenClaims {
    pub fn new(user_id: impl Into<String>, role: Role, issued_at: i64, lifetime: i64) -> Self {
        Self {
            user: TokenUser {
                id: user_id.into(),
                role,
            },
            iat: issued_at,
            exp: issued_at + lifetime,
        }
    }

    /// A token is expired from the second `exp` is reached.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }
}
