use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use super::controller::{
    create_template, delete_template, get_template, list_templates, update_template,
};
use crate::middleware::role::require_admin;
use crate::state::AppState;

/// Reads are public; writes need the admin role.
pub fn init_templates_router(state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(list_templates))
        .route("/{id}", get(get_template));

    let admin = Router::new()
        .route("/", post(create_template))
        .route("/{id}", put(update_template).delete(delete_template))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    public.merge(admin)
}
