use axum::{
    Router, middleware,
    routing::{get, put},
};

use super::controller::{change_password, delete_user, get_profile, get_user, list_users};
use crate::middleware::role::{require_admin, require_authenticated};
use crate::state::AppState;

pub fn init_users_router(state: &AppState) -> Router<AppState> {
    let own = Router::new()
        .route("/me", get(get_profile))
        .route("/me/password", put(change_password))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_authenticated,
        ));

    let admin = Router::new()
        .route("/", get(list_users))
        .route("/{id}", get(get_user).delete(delete_user))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    own.merge(admin)
}
