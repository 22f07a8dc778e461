use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::{header, request::Parts},
};
use uuid::Uuid;

use folio_auth::{AuthError, AuthenticatedUser, RequiredRoles, Role, authorize};
use folio_core::AppError;

use crate::metrics::track_gate_rejection;
use crate::state::AppState;

/// The caller established by the role gate.
#[derive(Debug, Clone)]
pub struct AuthUser(pub AuthenticatedUser);

impl AuthUser {
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        Ok(self.0.user_id()?)
    }

    pub fn role(&self) -> Role {
        self.0.role
    }

    pub fn is_admin(&self) -> bool {
        self.0.is_admin()
    }
}

fn authorization_header(parts: &Parts) -> Result<Option<&str>, AuthError> {
    match parts.headers.get(header::AUTHORIZATION) {
        None => Ok(None),
        Some(value) => value
            .to_str()
            .map(Some)
            .map_err(|_| AuthError::InvalidToken),
    }
}

/// Runs the gate against the request headers and records the outcome in the
/// request extensions.
pub(crate) fn authenticate(
    parts: &mut Parts,
    state: &AppState,
    required: &RequiredRoles,
) -> Result<AuthUser, AuthError> {
    let result = authorization_header(parts)
        .and_then(|header| authorize(header, required, &state.jwt_config));

    match result {
        Ok(user) => {
            parts.extensions.insert(user.clone());
            Ok(AuthUser(user))
        }
        Err(err) => {
            track_gate_rejection(err.code());
            Err(err)
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>() {
            return Ok(AuthUser(user.clone()));
        }

        Ok(authenticate(parts, state, &RequiredRoles::any())?)
    }
}

/// `None` when no `Authorization` header is sent; a header that is sent must
/// still verify.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl OptionalFromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        if !parts.headers.contains_key(header::AUTHORIZATION) {
            return Ok(None);
        }
        <AuthUser as FromRequestParts<AppState>>::from_request_parts(parts, state)
            .await
            .map(Some)
    }
}

impl FromRequestParts<AppState> for OptionalAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user =
            <AuthUser as OptionalFromRequestParts<AppState>>::from_request_parts(parts, state)
                .await?;
        Ok(OptionalAuthUser(user))
    }
}
