use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use folio_core::{AppError, ErrorBody, ValidationErrorBody};
use folio_models::{
    ContentFilterParams, ContentWithRelations, CreateContentDto, PaginatedContentsResponse,
    UpdateContentDto,
};

use super::service::{ContentService, Viewer};
use crate::middleware::auth::{AuthUser, OptionalAuthUser};
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath, ValidatedQuery};

/// Create content
///
/// The caller becomes the author. The slug is derived from the title when
/// not given.
#[utoipa::path(
    post,
    path = "/api/contents",
    request_body = CreateContentDto,
    responses(
        (status = 201, description = "Content created", body = ContentWithRelations),
        (status = 400, description = "Validation error, slug in use, or unknown template", body = ValidationErrorBody),
        (status = 401, description = "Missing, invalid, or expired token", body = ErrorBody)
    ),
    tag = "Contents",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_content(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateContentDto>,
) -> Result<(StatusCode, Json<ContentWithRelations>), AppError> {
    let content = ContentService::create_content(&state.db, auth_user.user_id()?, dto).await?;
    Ok((StatusCode::CREATED, Json(content)))
}

/// List content
///
/// Anonymous callers see published content only; authors also see their own
/// drafts, and admins see everything.
#[utoipa::path(
    get,
    path = "/api/contents",
    params(
        ("status" = Option<String>, Query, description = "draft or published"),
        ("author_id" = Option<Uuid>, Query, description = "Filter by author"),
        ("template_id" = Option<Uuid>, Query, description = "Filter by template"),
        ("limit" = Option<i64>, Query, description = "Items per page (1-100)"),
        ("offset" = Option<i64>, Query, description = "Items to skip"),
        ("page" = Option<i64>, Query, description = "Page number, 1-indexed")
    ),
    responses(
        (status = 200, description = "Contents", body = PaginatedContentsResponse),
        (status = 400, description = "Invalid query parameters", body = ErrorBody),
        (status = 401, description = "Authorization header present but not valid", body = ErrorBody)
    ),
    tag = "Contents"
)]
#[instrument(skip(state))]
pub async fn list_contents(
    State(state): State<AppState>,
    OptionalAuthUser(auth_user): OptionalAuthUser,
    ValidatedQuery(filters): ValidatedQuery<ContentFilterParams>,
) -> Result<Json<PaginatedContentsResponse>, AppError> {
    let viewer = Viewer::from_auth(auth_user.as_ref());
    let contents = ContentService::list_contents(&state.db, viewer, filters).await?;
    Ok(Json(contents))
}

/// Get content by id
#[utoipa::path(
    get,
    path = "/api/contents/{id}",
    params(("id" = Uuid, Path, description = "Content id")),
    responses(
        (status = 200, description = "Content", body = ContentWithRelations),
        (status = 404, description = "Content not found", body = ErrorBody)
    ),
    tag = "Contents"
)]
#[instrument(skip(state))]
pub async fn get_content(
    State(state): State<AppState>,
    OptionalAuthUser(auth_user): OptionalAuthUser,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<ContentWithRelations>, AppError> {
    let viewer = Viewer::from_auth(auth_user.as_ref());
    let content = ContentService::get_content(&state.db, viewer, id).await?;
    Ok(Json(content))
}

/// Get content by slug
#[utoipa::path(
    get,
    path = "/api/contents/slug/{slug}",
    params(("slug" = String, Path, description = "Content slug")),
    responses(
        (status = 200, description = "Content", body = ContentWithRelations),
        (status = 404, description = "Content not found", body = ErrorBody)
    ),
    tag = "Contents"
)]
#[instrument(skip(state))]
pub async fn get_content_by_slug(
    State(state): State<AppState>,
    OptionalAuthUser(auth_user): OptionalAuthUser,
    ValidatedPath(slug): ValidatedPath<String>,
) -> Result<Json<ContentWithRelations>, AppError> {
    let viewer = Viewer::from_auth(auth_user.as_ref());
    let content = ContentService::get_content_by_slug(&state.db, viewer, &slug).await?;
    Ok(Json(content))
}

/// Update content (author or admin)
#[utoipa::path(
    put,
    path = "/api/contents/{id}",
    params(("id" = Uuid, Path, description = "Content id")),
    request_body = UpdateContentDto,
    responses(
        (status = 200, description = "Content updated", body = ContentWithRelations),
        (status = 400, description = "Validation error, slug in use, or unknown template", body = ValidationErrorBody),
        (status = 401, description = "Missing, invalid, or expired token", body = ErrorBody),
        (status = 403, description = "Not the author and not an admin", body = ErrorBody),
        (status = 404, description = "Content not found", body = ErrorBody)
    ),
    tag = "Contents",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_content(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateContentDto>,
) -> Result<Json<ContentWithRelations>, AppError> {
    let content = ContentService::update_content(&state.db, &auth_user, id, dto).await?;
    Ok(Json(content))
}

/// Delete content (author or admin)
#[utoipa::path(
    delete,
    path = "/api/contents/{id}",
    params(("id" = Uuid, Path, description = "Content id")),
    responses(
        (status = 204, description = "Content deleted"),
        (status = 401, description = "Missing, invalid, or expired token", body = ErrorBody),
        (status = 403, description = "Not the author and not an admin", body = ErrorBody),
        (status = 404, description = "Content not found", body = ErrorBody)
    ),
    tag = "Contents",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_content(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<StatusCode, AppError> {
    ContentService::delete_content(&state.db, &auth_user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
