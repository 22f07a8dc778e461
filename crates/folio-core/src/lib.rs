//! # Folio Core
//!
//! Core types, errors, and utilities shared by every Folio crate.
//!
//! - [`errors`]: [`AppError`], the HTTP-aware error returned by handlers
//! - [`pagination`]: limit/offset/page query parameters and response metadata
//! - [`password`]: bcrypt hashing and verification
//! - [`serde`]: deserialization helpers for query strings and request bodies
//!
//! # Example
//!
//! ```ignore
//! use folio_core::{AppError, PaginationParams, hash_password};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Template not found"));
//! let hash = hash_password("correct horse battery staple")?;
//! let limit = PaginationParams::default().limit();
//! ```

pub mod errors;
pub mod pagination;
pub mod password;
pub mod serde;

pub use errors::{AppError, ErrorBody, FieldError, ValidationErrorBody};
pub use pagination::{PaginationMeta, PaginationParams};
pub use password::{hash_password, hash_password_async, verify_password, verify_password_async};
