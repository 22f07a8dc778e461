use sqlx::PgPool;
use sqlx::types::Json;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use folio_core::{AppError, PaginationMeta};
use folio_models::{
    CreateTemplateDto, PaginatedTemplatesResponse, Template, TemplateFilterParams,
    UpdateTemplateDto,
};

use crate::metrics;

const TEMPLATE_COLUMNS: &str = "id, name, description, components, created_at, updated_at";

fn name_in_use() -> AppError {
    AppError::field("name", "Template name already in use")
}

fn map_write_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e
        && db_err.is_unique_violation()
    {
        warn!("Template write raced a duplicate name");
        return name_in_use();
    }
    error!(error = %e, "Database error writing template");
    AppError::from(e)
}

pub struct TemplateService;

impl TemplateService {
    async fn name_taken(db: &PgPool, name: &str, except: Option<Uuid>) -> Result<bool, AppError> {
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM templates WHERE name = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(name)
        .bind(except)
        .fetch_one(db)
        .await?;
        Ok(taken)
    }

    #[instrument(skip(db, dto), fields(template.name = %dto.name, db.operation = "INSERT", db.table = "templates"))]
    pub async fn create_template(
        db: &PgPool,
        dto: CreateTemplateDto,
    ) -> Result<Template, AppError> {
        let components = dto
            .components
            .ok_or_else(|| AppError::field("components", "Components are required"))?;

        if Self::name_taken(db, &dto.name, None).await? {
            return Err(name_in_use());
        }

        let template = sqlx::query_as::<_, Template>(&format!(
            "INSERT INTO templates (name, description, components) VALUES ($1, $2, $3)
             RETURNING {TEMPLATE_COLUMNS}"
        ))
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(Json(&components))
        .fetch_one(db)
        .await
        .map_err(map_write_error)?;

        metrics::track_template_created();
        info!(template.id = %template.id, "Template created");

        Ok(template)
    }

    #[instrument(skip(db, filters), fields(db.operation = "SELECT", db.table = "templates"))]
    pub async fn list_templates(
        db: &PgPool,
        filters: TemplateFilterParams,
    ) -> Result<PaginatedTemplatesResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();
        let name_pattern = filters
            .name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", s));

        let where_clause = " WHERE deleted_at IS NULL AND ($1::text IS NULL OR name ILIKE $1)";

        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM templates{where_clause}"
        ))
        .bind(&name_pattern)
        .fetch_one(db)
        .await?;

        let templates = sqlx::query_as::<_, Template>(&format!(
            "SELECT {TEMPLATE_COLUMNS} FROM templates{where_clause}
             ORDER BY created_at DESC LIMIT {limit} OFFSET {offset}"
        ))
        .bind(&name_pattern)
        .fetch_all(db)
        .await?;

        debug!(total, returned = templates.len(), "Templates fetched");

        Ok(PaginatedTemplatesResponse {
            data: templates,
            meta: PaginationMeta::new(total, &filters.pagination),
        })
    }

    #[instrument(skip(db), fields(template.id = %id, db.operation = "SELECT", db.table = "templates"))]
    pub async fn get_template(db: &PgPool, id: Uuid) -> Result<Template, AppError> {
        sqlx::query_as::<_, Template>(&format!(
            "SELECT {TEMPLATE_COLUMNS} FROM templates WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Template not found")))
    }

    #[instrument(skip(db, dto), fields(template.id = %id, db.operation = "UPDATE", db.table = "templates"))]
    pub async fn update_template(
        db: &PgPool,
        id: Uuid,
        dto: UpdateTemplateDto,
    ) -> Result<Template, AppError> {
        let existing = Self::get_template(db, id).await?;

        if let Some(name) = dto.name.as_deref()
            && name != existing.name
            && Self::name_taken(db, name, Some(id)).await?
        {
            return Err(name_in_use());
        }

        let template = sqlx::query_as::<_, Template>(&format!(
            "UPDATE templates SET
                name = COALESCE($2, name),
                description = CASE WHEN $3 THEN $4 ELSE description END,
                components = COALESCE($5, components),
                updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {TEMPLATE_COLUMNS}"
        ))
        .bind(id)
        .bind(&dto.name)
        .bind(dto.description.is_some())
        .bind(dto.description.flatten())
        .bind(dto.components.as_ref().map(Json))
        .fetch_optional(db)
        .await
        .map_err(map_write_error)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Template not found")))?;

        info!(template.id = %template.id, "Template updated");
        Ok(template)
    }

    /// Soft-deletes the template and detaches it from every content item in
    /// one transaction.
    #[instrument(skip(db), fields(template.id = %id, db.operation = "UPDATE", db.table = "templates"))]
    pub async fn delete_template(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let mut tx = db.begin().await?;

        let result = sqlx::query(
            "UPDATE templates SET deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Template not found")));
        }

        let detached = sqlx::query(
            "UPDATE contents SET template_id = NULL, updated_at = NOW() WHERE template_id = $1",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tx.commit().await?;

        info!(template.id = %id, contents.detached = detached, "Template soft-deleted");
        Ok(())
    }
}
