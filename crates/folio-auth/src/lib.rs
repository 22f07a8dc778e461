//! # Folio Auth
//!
//! Stateless bearer-token authentication for the Folio CMS API.
//!
//! - [`role`]: the closed [`Role`] enumeration and [`RequiredRoles`] allow-lists
//! - [`claims`]: the signed payload, `{user: {id, role}, iat, exp}`
//! - [`jwt`]: token issuance and verification (HS256)
//! - [`gate`]: header extraction plus verification plus role check
//! - [`error`]: [`AuthError`], the four recoverable failure kinds and the fatal one
//!
//! Nothing in this crate performs I/O or keeps state. The signing secret comes
//! from the [`JwtConfig`](folio_config::JwtConfig) passed to each call, and
//! the `_at` variants take the clock as an argument.
//!
//! # Example
//!
//! ```ignore
//! use folio_auth::{Role, RequiredRoles, authorize, create_access_token};
//! use folio_config::JwtConfig;
//!
//! let config = JwtConfig::new("a-long-random-secret-from-the-environment");
//! let token = create_access_token("u1", Role::Admin, &config)?;
//!
//! let header = format!("Bearer {}", token);
//! let user = authorize(Some(&header), &RequiredRoles::from([Role::Admin, Role::User]), &config)?;
//! assert_eq!(user.id, "u1");
//! ```

pub mod claims;
pub mod error;
pub mod gate;
pub mod jwt;
pub mod role;

pub use claims::{TokenClaims, TokenUser};
pub use error::AuthError;
pub use gate::{AuthenticatedUser, authorize, authorize_at, check_roles, extract_bearer};
pub use jwt::{create_access_token, create_access_token_at, verify_token, verify_token_at};
pub use role::{RequiredRoles, Role, UnknownRole};
