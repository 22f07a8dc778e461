//! Content items: titled, slugged bodies written by a user and optionally
//! rendered with a template.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use folio_core::serde::{
    deserialize_nullable, deserialize_optional_trimmed, deserialize_optional_uuid,
    deserialize_trimmed,
};
use folio_core::{PaginationMeta, PaginationParams};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgArgumentBuffer, PgTypeInfo, PgValueRef};
use sqlx::types::Json;
use sqlx::{Decode, Encode, FromRow, Postgres, Type};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::max_chars;
use crate::users::AuthorSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    #[default]
    Draft,
    Published,
}

impl ContentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentStatus::Draft => "draft",
            ContentStatus::Published => "published",
        }
    }
}

impl fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(ContentStatus::Draft),
            "published" => Ok(ContentStatus::Published),
            other => Err(format!("unknown content status: {}", other)),
        }
    }
}

impl Type<Postgres> for ContentStatus {
    fn type_info() -> PgTypeInfo {
        <String as Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <String as Type<Postgres>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Postgres> for ContentStatus {
    fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
        let raw = <&str as Decode<'r, Postgres>>::decode(value)?;
        raw.parse().map_err(Into::into)
    }
}

impl Encode<'_, Postgres> for ContentStatus {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
        <&str as Encode<'_, Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}

/// Turns a title or user-supplied slug into a URL slug: lowercase ASCII
/// letters and digits separated by single dashes. Non-ASCII letters are
/// transliterated (`"Crème"` becomes `"creme"`).
pub fn slugify(input: &str) -> String {
    slug::slugify(input)
}

fn title_max_length(title: &str) -> Result<(), ValidationError> {
    max_chars(title, 255, "Title must be at most 255 characters")
}

/// A content row as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Content {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub status: ContentStatus,
    pub author_id: Uuid,
    pub template_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The template fields embedded in a content response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TemplateSummary {
    pub id: Uuid,
    pub name: String,
    #[schema(value_type = Object)]
    pub components: Value,
}

/// Content joined with its author and template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ContentWithRelations {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub status: ContentStatus,
    pub author: AuthorSummary,
    pub template: Option<TemplateSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Flat row produced by the content/author/template join.
#[derive(Debug, Clone, FromRow)]
pub struct ContentRow {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub status: ContentStatus,
    pub author_id: Uuid,
    pub author_username: String,
    pub author_email: String,
    pub template_id: Option<Uuid>,
    pub template_name: Option<String>,
    pub template_components: Option<Json<Value>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ContentRow> for ContentWithRelations {
    fn from(row: ContentRow) -> Self {
        let template = match (row.template_id, row.template_name) {
            (Some(id), Some(name)) => Some(TemplateSummary {
                id,
                name,
                components: row
                    .template_components
                    .map(|c| c.0)
                    .unwrap_or_else(|| Value::Object(Default::default())),
            }),
            _ => None,
        };

        Self {
            id: row.id,
            title: row.title,
            slug: row.slug,
            body: row.body,
            status: row.status,
            author: AuthorSummary {
                id: row.author_id,
                username: row.author_username,
                email: row.author_email,
            },
            template,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateContentDto {
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(
        length(min = 1, message = "Title is required"),
        custom(function = "title_max_length")
    )]
    pub title: String,
    /// Derived from the title when omitted
    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    pub slug: Option<String>,
    #[validate(length(min = 1, message = "Body is required"))]
    pub body: String,
    #[validate(required(message = "Status is required"))]
    #[schema(required = true)]
    pub status: Option<ContentStatus>,
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub template_id: Option<Uuid>,
}

impl CreateContentDto {
    /// The slug to store: the supplied one if any, else the title, slugified.
    pub fn resolved_slug(&self) -> String {
        match self.slug.as_deref() {
            Some(slug) if !slug.is_empty() => slugify(slug),
            _ => slugify(&self.title),
        }
    }
}

/// Partial update. `template_id: null` detaches the template; an absent
/// field leaves it as is.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateContentDto {
    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    #[validate(
        length(min = 1, message = "Title is required"),
        custom(function = "title_max_length")
    )]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    pub slug: Option<String>,
    #[validate(length(min = 1, message = "Body is required"))]
    pub body: Option<String>,
    pub status: Option<ContentStatus>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    #[schema(value_type = Option<Uuid>)]
    pub template_id: Option<Option<Uuid>>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ContentFilterParams {
    pub status: Option<ContentStatus>,
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub author_id: Option<Uuid>,
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub template_id: Option<Uuid>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaginatedContentsResponse {
    pub data: Vec<ContentWithRelations>,
    pub meta: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("  Hello,   World!  "), "hello-world");
        assert_eq!(slugify("Rust 2024 Edition"), "rust-2024-edition");
        assert_eq!(slugify("already-a-slug"), "already-a-slug");
        assert_eq!(slugify("snake_case_title"), "snake-case-title");
        assert_eq!(slugify("Café Crème Brûlée"), "cafe-creme-brulee");
        assert_eq!(slugify("Ünïcödé -- Title"), "unicode-title");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_resolved_slug_prefers_explicit_slug() {
        let dto: CreateContentDto = serde_json::from_str(
            r#"{"title":"My First Post","slug":"Custom Slug","body":"hi","status":"draft"}"#,
        )
        .unwrap();
        assert_eq!(dto.resolved_slug(), "custom-slug");
        assert_eq!(dto.status, Some(ContentStatus::Draft));

        let dto: CreateContentDto = serde_json::from_str(
            r#"{"title":"My First Post","slug":"  ","body":"hi","status":"published"}"#,
        )
        .unwrap();
        assert_eq!(dto.resolved_slug(), "my-first-post");
    }

    #[test]
    fn test_create_dto_requires_status() {
        let dto: CreateContentDto =
            serde_json::from_str(r#"{"title":"My First Post","body":"hi"}"#).unwrap();
        let errors = dto.validate().unwrap_err();
        let status_errors = &errors.field_errors()["status"];
        assert_eq!(
            status_errors[0].message.as_deref(),
            Some("Status is required")
        );
    }

    #[test]
    fn test_over_long_title_names_the_limit() {
        let dto: CreateContentDto = serde_json::from_str(&format!(
            r#"{{"title":"{}","body":"hi","status":"draft"}}"#,
            "a".repeat(256)
        ))
        .unwrap();
        let errors = dto.validate().unwrap_err();
        assert_eq!(
            errors.field_errors()["title"][0].message.as_deref(),
            Some("Title must be at most 255 characters")
        );
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!(
            "published".parse::<ContentStatus>(),
            Ok(ContentStatus::Published)
        );
        assert!("archived".parse::<ContentStatus>().is_err());
        assert!(serde_json::from_str::<ContentStatus>(r#""archived""#).is_err());
    }

    #[test]
    fn test_update_dto_distinguishes_null_template() {
        let dto: UpdateContentDto = serde_json::from_str(r#"{"template_id":null}"#).unwrap();
        assert_eq!(dto.template_id, Some(None));

        let dto: UpdateContentDto = serde_json::from_str(r#"{"title":"New"}"#).unwrap();
        assert_eq!(dto.template_id, None);
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_row_without_template_has_null_template() {
        let now = Utc::now();
        let row = ContentRow {
            id: Uuid::new_v4(),
            title: "T".to_string(),
            slug: "t".to_string(),
            body: "b".to_string(),
            status: ContentStatus::Published,
            author_id: Uuid::new_v4(),
            author_username: "alice".to_string(),
            author_email: "alice@example.com".to_string(),
            template_id: None,
            template_name: None,
            template_components: None,
            created_at: now,
            updated_at: now,
        };
        let content = ContentWithRelations::from(row);
        assert!(content.template.is_none());
        assert_eq!(content.author.username, "alice");

        let json = serde_json::to_value(&content).unwrap();
        assert!(json["template"].is_null());
        assert_eq!(json["status"], "published");
    }
}
