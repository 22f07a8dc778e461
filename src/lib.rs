//! # Folio API
//!
//! Content management backend built with Axum and PostgreSQL: user
//! registration and login, stateless bearer tokens, a role gate in front of
//! protected routes, and CRUD for templates and content.
//!
//! ## Layout
//!
//! ```text
//! src/
//! ├── middleware/       # AuthUser extractor and role-gate route layers
//! ├── modules/          # Feature modules
//! │   ├── auth/        # Registration and login
//! │   ├── users/       # Profile, password change, user administration
//! │   ├── templates/   # Template CRUD
//! │   └── contents/    # Content CRUD
//! ├── docs.rs           # OpenAPI document
//! ├── logging.rs        # Tracing setup and request logging
//! ├── metrics.rs        # Prometheus metrics
//! ├── router.rs         # Route tree and global layers
//! ├── state.rs          # Shared application state
//! └── validator.rs      # Validated JSON extractor
//! ```
//!
//! The token issuer, verifier, and gate live in `folio-auth`; configuration
//! in `folio-config`; entities and DTOs in `folio-models`.
//!
//! ## Access rules
//!
//! | Route | Who |
//! |-------|-----|
//! | `POST /api/auth/register`, `POST /api/auth/login` | anyone |
//! | `GET /api/templates[/{id}]` | anyone |
//! | `POST/PUT/DELETE /api/templates` | admin |
//! | `GET /api/contents...` | anyone (drafts: author or admin) |
//! | `POST /api/contents` | any authenticated user |
//! | `PUT/DELETE /api/contents/{id}` | author or admin |
//! | `GET /api/users/me`, `PUT /api/users/me/password` | any authenticated user |
//! | `GET/DELETE /api/users[/{id}]` | admin |
//!
//! Gate failures answer 401 (`no_token`, `invalid_token`, `token_expired`)
//! or 403 (`forbidden`) with `{"error", "code"}`.

pub mod docs;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

pub use folio_auth;
pub use folio_config;
pub use folio_core;
pub use folio_db;
pub use folio_models;
