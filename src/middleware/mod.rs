//! HTTP adapters for the role gate in `folio_auth`.
//!
//! - [`auth`]: the [`AuthUser`](auth::AuthUser) and
//!   [`OptionalAuthUser`](auth::OptionalAuthUser) extractors
//! - [`role`]: route-layer middleware that runs the gate before the handler
//!
//! A protected route gets its role layer in the router:
//!
//! ```ignore
//! Router::new()
//!     .route("/", post(create_template))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));
//! ```
//!
//! and the handler takes an `AuthUser` to learn who is calling. The identity
//! attached by the layer is reused, so the token is verified once.

pub mod auth;
pub mod role;
