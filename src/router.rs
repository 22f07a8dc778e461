use axum::http::{HeaderValue, Method, header};
use axum::{Json, Router, middleware, routing::get};
use serde_json::{Value, json};
use tower_governor::GovernorLayer;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use folio_config::CorsConfig;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::metrics_middleware;
use crate::modules::auth::router::init_auth_router;
use crate::modules::contents::router::init_contents_router;
use crate::modules::templates::router::init_templates_router;
use crate::modules::users::router::init_users_router;
use crate::state::AppState;

pub const WELCOME_MESSAGE: &str = "Welcome to the CMS Platform Backend!";

async fn welcome() -> &'static str {
    WELCOME_MESSAGE
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

pub fn init_router(state: AppState) -> Router {
    let mut auth_router = init_auth_router();
    if let Some(config) = state.rate_limit_config.auth_governor_config() {
        auth_router = auth_router.layer(GovernorLayer::new(config));
    }

    let mut api = Router::new()
        .nest("/auth", auth_router)
        .nest("/users", init_users_router(&state))
        .nest("/templates", init_templates_router(&state))
        .nest("/contents", init_contents_router(&state));
    if let Some(config) = state.rate_limit_config.general_governor_config() {
        api = api.layer(GovernorLayer::new(config));
    }

    Router::new()
        .route("/", get(welcome))
        .route("/health", get(health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest("/api", api)
        .with_state(state.clone())
        .layer(cors_layer(&state.cors_config))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}
