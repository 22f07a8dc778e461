use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use folio_auth::Role;
use folio_core::{ErrorBody, FieldError, PaginationMeta, PaginationParams, ValidationErrorBody};
use folio_models::{
    AuthorSummary, ChangePasswordRequest, ContentStatus, ContentWithRelations, CreateContentDto,
    CreateTemplateDto, LoginRequest, LoginResponse, MessageResponse, PaginatedContentsResponse,
    PaginatedTemplatesResponse, PaginatedUsersResponse, RegisterRequest, RegisterResponse,
    Template, TemplateSummary, UpdateContentDto, UpdateTemplateDto, User,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::users::controller::get_profile,
        crate::modules::users::controller::change_password,
        crate::modules::users::controller::list_users,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::delete_user,
        crate::modules::templates::controller::create_template,
        crate::modules::templates::controller::list_templates,
        crate::modules::templates::controller::get_template,
        crate::modules::templates::controller::update_template,
        crate::modules::templates::controller::delete_template,
        crate::modules::contents::controller::create_content,
        crate::modules::contents::controller::list_contents,
        crate::modules::contents::controller::get_content,
        crate::modules::contents::controller::get_content_by_slug,
        crate::modules::contents::controller::update_content,
        crate::modules::contents::controller::delete_content,
    ),
    components(
        schemas(
            Role,
            User,
            RegisterRequest,
            RegisterResponse,
            LoginRequest,
            LoginResponse,
            ChangePasswordRequest,
            PaginatedUsersResponse,
            Template,
            CreateTemplateDto,
            UpdateTemplateDto,
            PaginatedTemplatesResponse,
            ContentStatus,
            ContentWithRelations,
            AuthorSummary,
            TemplateSummary,
            CreateContentDto,
            UpdateContentDto,
            PaginatedContentsResponse,
            MessageResponse,
            ErrorBody,
            FieldError,
            ValidationErrorBody,
            PaginationMeta,
            PaginationParams,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration and login"),
        (name = "Users", description = "Profiles and user administration"),
        (name = "Templates", description = "Page templates"),
        (name = "Contents", description = "Content items")
    ),
    info(
        title = "Folio CMS API",
        version = "0.1.0",
        description = "Content management backend with bearer-token authentication and role-gated routes.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
