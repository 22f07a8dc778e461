//! Templates: named sets of component flags that content can be rendered with.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use folio_core::serde::{
    deserialize_nullable_trimmed, deserialize_optional_trimmed, deserialize_trimmed,
};
use folio_core::{PaginationMeta, PaginationParams};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::max_chars;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Template {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Component flags, e.g. `{"header": true, "sidebar": false}`
    #[schema(value_type = Object)]
    pub components: Json<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Components are stored as JSONB and must be an object.
pub fn validate_components(components: &Value) -> Result<(), ValidationError> {
    if components.is_object() {
        Ok(())
    } else {
        Err(ValidationError::new("components_object")
            .with_message(Cow::Borrowed("Components must be a JSON object")))
    }
}

fn name_max_length(name: &str) -> Result<(), ValidationError> {
    max_chars(name, 100, "Template name must be at most 100 characters")
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTemplateDto {
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(
        length(min = 1, message = "Template name is required"),
        custom(function = "name_max_length")
    )]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    pub description: Option<String>,
    #[validate(
        required(message = "Components are required"),
        custom(function = "validate_components")
    )]
    #[schema(value_type = Object, required = true)]
    pub components: Option<Value>,
}

/// Partial update; absent fields are left unchanged. `description: null`
/// clears the description.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateTemplateDto {
    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    #[validate(
        length(min = 1, message = "Template name is required"),
        custom(function = "name_max_length")
    )]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable_trimmed")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[validate(custom(function = "validate_components"))]
    #[schema(value_type = Option<Object>)]
    pub components: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct TemplateFilterParams {
    /// Partial, case-insensitive match on the name
    pub name: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaginatedTemplatesResponse {
    pub data: Vec<Template>,
    pub meta: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_components_must_be_object() {
        assert!(validate_components(&json!({"header": true})).is_ok());
        assert!(validate_components(&json!({})).is_ok());
        assert!(validate_components(&json!([1, 2])).is_err());
        assert!(validate_components(&json!("header")).is_err());
        assert!(validate_components(&Value::Null).is_err());
    }

    #[test]
    fn test_create_dto_requires_components() {
        let dto: CreateTemplateDto = serde_json::from_str(r#"{"name":" Blog Post "}"#).unwrap();
        assert_eq!(dto.name, "Blog Post");
        let errors = dto.validate().unwrap_err();
        assert_eq!(
            errors.field_errors()["components"][0].message.as_deref(),
            Some("Components are required")
        );

        let dto: CreateTemplateDto =
            serde_json::from_str(r#"{"name":"Blog Post","components":{}}"#).unwrap();
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_over_long_name_names_the_limit() {
        let dto = CreateTemplateDto {
            name: "n".repeat(101),
            description: None,
            components: Some(json!({})),
        };
        let errors = dto.validate().unwrap_err();
        assert_eq!(
            errors.field_errors()["name"][0].message.as_deref(),
            Some("Template name must be at most 100 characters")
        );
    }

    #[test]
    fn test_update_dto_distinguishes_null_description() {
        let dto: UpdateTemplateDto = serde_json::from_str(r#"{"description":null}"#).unwrap();
        assert_eq!(dto.description, Some(None));

        let dto: UpdateTemplateDto =
            serde_json::from_str(r#"{"description":"  About pages "}"#).unwrap();
        assert_eq!(dto.description, Some(Some("About pages".to_string())));

        let dto: UpdateTemplateDto = serde_json::from_str(r#"{"name":"Landing"}"#).unwrap();
        assert_eq!(dto.description, None);
    }

    #[test]
    fn test_create_dto_rejects_blank_name_and_array_components() {
        let dto: CreateTemplateDto =
            serde_json::from_str(r#"{"name":"  ","components":[true]}"#).unwrap();
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
        assert!(errors.field_errors().contains_key("components"));
    }

    #[test]
    fn test_update_dto_validates_only_present_fields() {
        assert!(UpdateTemplateDto::default().validate().is_ok());

        let dto: UpdateTemplateDto = serde_json::from_str(r#"{"components":42}"#).unwrap();
        assert!(dto.validate().is_err());
    }
}
