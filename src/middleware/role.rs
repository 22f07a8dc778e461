//! Route-layer middleware for role-gated routes.
//!
//! ```rust,ignore
//! use axum::{Router, middleware, routing::delete};
//! use crate::middleware::role::require_admin;
//!
//! let admin_routes = Router::new()
//!     .route("/{id}", delete(delete_user))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));
//! ```

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use folio_auth::{AuthError, RequiredRoles, Role, check_roles};
use folio_core::AppError;

use crate::middleware::auth::{AuthUser, authenticate};
use crate::state::AppState;

/// Runs the gate with `required` and, on success, attaches the caller's
/// identity to the request before handing it on.
pub async fn require_roles(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    required: RequiredRoles,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    authenticate(&mut parts, &state, &required)?;

    Ok(next.run(Request::from_parts(parts, body)).await)
}

/// Admin-only routes.
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    require_roles(State(state), req, next, RequiredRoles::from(Role::Admin))
        .await
        .unwrap_or_else(IntoResponse::into_response)
}

/// Any caller with a valid token.
pub async fn require_authenticated(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    require_roles(State(state), req, next, RequiredRoles::any())
        .await
        .unwrap_or_else(IntoResponse::into_response)
}

/// In-handler role check, for rules the route layer cannot express.
pub fn check_role(user: &AuthUser, required: impl Into<RequiredRoles>) -> Result<(), AppError> {
    check_roles(&user.0, &required.into()).map_err(AppError::from)
}

/// The caller is the owner of a resource, or an admin.
pub fn check_owner_or_admin(user: &AuthUser, owner_id: uuid::Uuid) -> Result<(), AppError> {
    if check_role(user, Role::Admin).is_ok() {
        return Ok(());
    }
    match user.user_id() {
        Ok(id) if id == owner_id => Ok(()),
        _ => Err(AuthError::Forbidden.into()),
    }
}
