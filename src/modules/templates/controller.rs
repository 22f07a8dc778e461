use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use folio_core::{AppError, ErrorBody, ValidationErrorBody};
use folio_models::{
    CreateTemplateDto, PaginatedTemplatesResponse, Template, TemplateFilterParams,
    UpdateTemplateDto,
};

use super::service::TemplateService;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath, ValidatedQuery};

/// Create a template (admin only)
#[utoipa::path(
    post,
    path = "/api/templates",
    request_body = CreateTemplateDto,
    responses(
        (status = 201, description = "Template created", body = Template),
        (status = 400, description = "Validation error or name already in use", body = ValidationErrorBody),
        (status = 401, description = "Missing, invalid, or expired token", body = ErrorBody),
        (status = 403, description = "Admin role required", body = ErrorBody)
    ),
    tag = "Templates",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_template(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateTemplateDto>,
) -> Result<(StatusCode, Json<Template>), AppError> {
    let template = TemplateService::create_template(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(template)))
}

/// List templates
#[utoipa::path(
    get,
    path = "/api/templates",
    params(
        ("name" = Option<String>, Query, description = "Partial name match"),
        ("limit" = Option<i64>, Query, description = "Items per page (1-100)"),
        ("offset" = Option<i64>, Query, description = "Items to skip"),
        ("page" = Option<i64>, Query, description = "Page number, 1-indexed")
    ),
    responses(
        (status = 200, description = "Templates", body = PaginatedTemplatesResponse),
        (status = 400, description = "Invalid query parameters", body = ErrorBody)
    ),
    tag = "Templates"
)]
#[instrument(skip(state))]
pub async fn list_templates(
    State(state): State<AppState>,
    ValidatedQuery(filters): ValidatedQuery<TemplateFilterParams>,
) -> Result<Json<PaginatedTemplatesResponse>, AppError> {
    let templates = TemplateService::list_templates(&state.db, filters).await?;
    Ok(Json(templates))
}

/// Get a template by id
#[utoipa::path(
    get,
    path = "/api/templates/{id}",
    params(("id" = Uuid, Path, description = "Template id")),
    responses(
        (status = 200, description = "Template", body = Template),
        (status = 404, description = "Template not found", body = ErrorBody)
    ),
    tag = "Templates"
)]
#[instrument(skip(state))]
pub async fn get_template(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<Template>, AppError> {
    let template = TemplateService::get_template(&state.db, id).await?;
    Ok(Json(template))
}

/// Update a template (admin only)
///
/// Only the fields present in the body are changed.
#[utoipa::path(
    put,
    path = "/api/templates/{id}",
    params(("id" = Uuid, Path, description = "Template id")),
    request_body = UpdateTemplateDto,
    responses(
        (status = 200, description = "Template updated", body = Template),
        (status = 400, description = "Validation error or name already in use", body = ValidationErrorBody),
        (status = 403, description = "Admin role required", body = ErrorBody),
        (status = 404, description = "Template not found", body = ErrorBody)
    ),
    tag = "Templates",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_template(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateTemplateDto>,
) -> Result<Json<Template>, AppError> {
    let template = TemplateService::update_template(&state.db, id, dto).await?;
    Ok(Json(template))
}

/// Delete a template (admin only)
///
/// Content that used the template keeps existing, with `template` cleared.
#[utoipa::path(
    delete,
    path = "/api/templates/{id}",
    params(("id" = Uuid, Path, description = "Template id")),
    responses(
        (status = 204, description = "Template deleted"),
        (status = 403, description = "Admin role required", body = ErrorBody),
        (status = 404, description = "Template not found", body = ErrorBody)
    ),
    tag = "Templates",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_template(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<StatusCode, AppError> {
    TemplateService::delete_template(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
