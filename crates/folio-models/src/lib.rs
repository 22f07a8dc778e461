//! # Folio Models
//!
//! Database entities and request/response DTOs for the Folio CMS API.
//!
//! - [`users`]: users, registration, login, and password changes
//! - [`templates`]: page templates and their component flags
//! - [`contents`]: content items, their status, and slug generation

pub mod contents;
pub mod templates;
pub mod users;

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::ValidationError;

pub use folio_auth::Role;

pub use contents::{
    Content, ContentFilterParams, ContentRow, ContentStatus, ContentWithRelations,
    CreateContentDto, PaginatedContentsResponse, TemplateSummary, UpdateContentDto, slugify,
};
pub use templates::{
    CreateTemplateDto, PaginatedTemplatesResponse, Template, TemplateFilterParams,
    UpdateTemplateDto,
};
pub use users::{
    AuthorSummary, ChangePasswordRequest, LoginRequest, LoginResponse, PaginatedUsersResponse,
    RegisterRequest, RegisterResponse, User, UserCredentials, UserFilterParams,
};

/// Generic response carrying a single human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Upper bound on a text field, counted in characters. Paired with a
/// `length(min = 1)` rule so a blank value and an over-long value get
/// different messages.
pub(crate) fn max_chars(
    value: &str,
    max: usize,
    message: &'static str,
) -> Result<(), ValidationError> {
    if value.chars().count() <= max {
        return Ok(());
    }

    let mut error = ValidationError::new("length").with_message(Cow::Borrowed(message));
    error.add_param(Cow::Borrowed("max"), &max);
    Err(error)
}
