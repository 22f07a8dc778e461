use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use super::controller::{
    create_content, delete_content, get_content, get_content_by_slug, list_contents,
    update_content,
};
use crate::middleware::role::require_authenticated;
use crate::state::AppState;

/// Reads are public; writes need a valid token, and updates and deletes are
/// further limited to the author or an admin inside the handler.
pub fn init_contents_router(state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(list_contents))
        .route("/{id}", get(get_content))
        .route("/slug/{slug}", get(get_content_by_slug));

    let authenticated = Router::new()
        .route("/", post(create_content))
        .route("/{id}", put(update_content).delete(delete_content))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_authenticated,
        ));

    public.merge(authenticated)
}
