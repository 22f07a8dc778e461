//! Application error type with HTTP response conversion.
//!
//! Every handler returns `Result<_, AppError>`. Client errors are rendered as
//! `{"error": "...", "code": "..."}`, validation failures as
//! `{"errors": [{"field": "...", "msg": "..."}]}`, and server errors as a
//! generic message: the underlying cause is logged, never sent to the client.

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Message returned for every 5xx response.
pub const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong";

/// A single validation failure tied to a request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub msg: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            msg: msg.into(),
        }
    }
}

/// Body of a non-validation error response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
}

/// Body of a validation error response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ValidationErrorBody {
    pub errors: Vec<FieldError>,
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
    pub code: &'static str,
    pub field_errors: Vec<FieldError>,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
            code: default_code(status),
            field_errors: Vec::new(),
        }
    }

    /// Overrides the machine-readable code sent with the response.
    #[must_use]
    pub fn with_code(mut self, code: &'static str) -> Self {
        self.code = code;
        self
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn conflict<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::CONFLICT, err)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, anyhow::anyhow!(message.into()))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, anyhow::anyhow!(message.into()))
    }

    /// A 400 carrying one or more field errors.
    pub fn validation(errors: Vec<FieldError>) -> Self {
        let summary = errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.msg))
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            status: StatusCode::BAD_REQUEST,
            error: anyhow::anyhow!(summary),
            code: "validation_failed",
            field_errors: errors,
        }
    }

    /// Shorthand for a validation error on a single field.
    pub fn field(field: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::validation(vec![FieldError::new(field, msg)])
    }
}

fn default_code(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "bad_request",
        StatusCode::UNAUTHORIZED => "unauthorized",
        StatusCode::FORBIDDEN => "forbidden",
        StatusCode::NOT_FOUND => "not_found",
        StatusCode::CONFLICT => "conflict",
        StatusCode::UNPROCESSABLE_ENTITY => "unprocessable_entity",
        StatusCode::TOO_MANY_REQUESTS => "too_many_requests",
        s if s.is_server_error() => "internal_error",
        _ => "error",
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if !self.field_errors.is_empty() {
            let body = ValidationErrorBody {
                errors: self.field_errors,
            };
            return (self.status, Json(body)).into_response();
        }

        let message = if self.status.is_server_error() {
            error!(status = %self.status.as_u16(), error = ?self.error, "Request failed");
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.error.to_string()
        };

        let body = ErrorBody {
            error: message,
            code: self.code.to_string(),
        };

        (self.status, Json(body)).into_response()
    }
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        AppError::internal(err)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::internal(err)
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::internal(err)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut field_errors: Vec<FieldError> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    let msg = error
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field));
                    FieldError::new(field.to_string(), msg)
                })
            })
            .collect();
        field_errors.sort_by(|a, b| a.field.cmp(&b.field));

        AppError::validation(field_errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use validator::Validate;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_client_error_exposes_message_and_code() {
        let response = AppError::unauthorized("No token, authorization denied")
            .with_code("no_token")
            .into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["error"], "No token, authorization denied");
        assert_eq!(body["code"], "no_token");
    }

    #[tokio::test]
    async fn test_server_error_hides_detail() {
        let response =
            AppError::internal(anyhow::anyhow!("connection refused on 10.0.0.3")).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], INTERNAL_ERROR_MESSAGE);
        assert_eq!(body["code"], "internal_error");
    }

    #[tokio::test]
    async fn test_validation_error_lists_fields() {
        let response = AppError::validation(vec![
            FieldError::new("email", "Email already in use"),
            FieldError::new("username", "Username already in use"),
        ])
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        let errors = body["errors"].as_array().unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0]["field"], "email");
        assert_eq!(errors[1]["msg"], "Username already in use");
    }

    #[derive(Validate)]
    struct Signup {
        #[validate(email(message = "Must be a valid email"))]
        email: String,
        #[validate(length(min = 8))]
        password: String,
    }

    #[test]
    fn test_from_validation_errors() {
        let dto = Signup {
            email: "nope".to_string(),
            password: "short".to_string(),
        };
        let err = AppError::from(dto.validate().unwrap_err());

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "validation_failed");
        assert_eq!(
            err.field_errors,
            vec![
                FieldError::new("email", "Must be a valid email"),
                FieldError::new("password", "password is invalid"),
            ]
        );
    }

    #[test]
    fn test_default_codes() {
        assert_eq!(AppError::forbidden("nope").code, "forbidden");
        assert_eq!(
            AppError::not_found(anyhow::anyhow!("missing")).code,
            "not_found"
        );
        assert_eq!(
            AppError::new(StatusCode::BAD_GATEWAY, anyhow::anyhow!("upstream")).code,
            "internal_error"
        );
    }
}
