//! Authentication and authorization failures.

use axum::http::StatusCode;
use folio_core::AppError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// No `Authorization` header, or a bearer header with nothing after it.
    #[error("No token, authorization denied")]
    NoToken,
    /// Bad signature, malformed token, unknown role, or a non-bearer header.
    #[error("Token is not valid")]
    InvalidToken,
    #[error("Token has expired")]
    ExpiredToken,
    /// Authenticated, but the role is not in the required set.
    #[error("Forbidden")]
    Forbidden,
    /// The signing primitive itself failed. Not recoverable by the caller.
    #[error("token signing failed: {0}")]
    Signing(String),
}

impl AuthError {
    /// Machine-readable code sent in the error body.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::NoToken => "no_token",
            AuthError::InvalidToken => "invalid_token",
            AuthError::ExpiredToken => "token_expired",
            AuthError::Forbidden => "forbidden",
            AuthError::Signing(_) => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::NoToken | AuthError::InvalidToken | AuthError::ExpiredToken => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::Signing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// `true` for the failures that mean "who are you?" (401).
    pub fn is_unauthenticated(&self) -> bool {
        matches!(
            self,
            AuthError::NoToken | AuthError::InvalidToken | AuthError::ExpiredToken
        )
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        let (status, code) = (err.status(), err.code());
        AppError::new(status, err).with_code(code)
    }
}
