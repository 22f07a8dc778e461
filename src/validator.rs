use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, Path, Query, Request,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use folio_core::AppError;

/// JSON body extractor that runs `validator` rules before the handler sees
/// the value. Every failure is a 400: malformed bodies carry a single
/// message, rule violations carry the per-field list.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;

        value.validate()?;

        Ok(ValidatedJson(value))
    }
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return AppError::bad_request(anyhow::anyhow!(
            "Missing 'Content-Type: application/json' header"
        ));
    }

    let body = rejection.body_text();

    if let Some(field) = body
        .split("missing field `")
        .nth(1)
        .and_then(|rest| rest.split('`').next())
    {
        return AppError::field(field, format!("{} is required", field));
    }

    if body.contains("unknown variant") {
        return AppError::bad_request(anyhow::anyhow!("Invalid value in request body"));
    }

    if body.contains("invalid type") {
        return AppError::bad_request(anyhow::anyhow!("Invalid field type in request"));
    }

    AppError::bad_request(anyhow::anyhow!("Invalid request body"))
}

/// Query string extractor whose rejection is a JSON 400 instead of axum's
/// plain-text body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e: QueryRejection| {
                AppError::bad_request(anyhow::anyhow!(
                    "Invalid query parameters: {}",
                    e.body_text()
                ))
            })?;

        Ok(ValidatedQuery(value))
    }
}

/// Path extractor whose rejection is a JSON 400, e.g. for an id that is not
/// a UUID.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(path_rejection_to_error)?;

        Ok(ValidatedPath(value))
    }
}

fn path_rejection_to_error(rejection: PathRejection) -> AppError {
    match rejection {
        PathRejection::FailedToDeserializePathParams(e) => {
            AppError::bad_request(anyhow::anyhow!("Invalid path parameter: {}", e.body_text()))
        }
        other => AppError::internal(anyhow::anyhow!(other.body_text())),
    }
}
