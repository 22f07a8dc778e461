use sqlx::PgPool;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use folio_auth::AuthError;
use folio_core::{AppError, PaginationMeta};
use folio_models::{
    Content, ContentFilterParams, ContentRow, ContentStatus, ContentWithRelations, CreateContentDto,
    PaginatedContentsResponse, UpdateContentDto, slugify,
};

use crate::metrics;
use crate::middleware::auth::AuthUser;
use crate::middleware::role::check_owner_or_admin;

const MAX_SLUG_LEN: usize = 255;

const CONTENT_SELECT: &str = "SELECT
        c.id, c.title, c.slug, c.body, c.status, c.author_id,
        u.username AS author_username, u.email AS author_email,
        t.id AS template_id, t.name AS template_name, t.components AS template_components,
        c.created_at, c.updated_at
    FROM contents c
    JOIN users u ON u.id = c.author_id
    LEFT JOIN templates t ON t.id = c.template_id AND t.deleted_at IS NULL";

const CONTENT_COLUMNS: &str =
    "id, title, slug, body, status, author_id, template_id, created_at, updated_at";

#[derive(Debug, Clone, Copy)]
enum Lookup<'a> {
    Id(Uuid),
    Slug(&'a str),
}

/// Who is looking. Drafts are only visible to their author and to admins.
#[derive(Debug, Clone, Copy, Default)]
pub struct Viewer {
    pub user_id: Option<Uuid>,
    pub is_admin: bool,
}

impl Viewer {
    pub fn from_auth(user: Option<&AuthUser>) -> Self {
        match user {
            Some(user) => Self {
                user_id: user.user_id().ok(),
                is_admin: user.is_admin(),
            },
            None => Self::default(),
        }
    }

    fn can_see(&self, content: &ContentWithRelations) -> bool {
        self.is_admin
            || content.status == ContentStatus::Published
            || self.user_id == Some(content.author.id)
    }
}

fn slug_in_use() -> AppError {
    AppError::field("slug", "Slug already in use")
}

fn unknown_template() -> AppError {
    AppError::field("template_id", "Template not found")
}

fn not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("Content not found"))
}

fn checked_slug(raw: &str) -> Result<String, AppError> {
    let slug = slugify(raw);
    if slug.is_empty() {
        return Err(AppError::field(
            "slug",
            "Slug must contain at least one letter or digit",
        ));
    }
    if slug.len() > MAX_SLUG_LEN {
        return Err(AppError::field("slug", "Slug is too long"));
    }
    Ok(slug)
}

fn map_write_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            warn!("Content write raced a duplicate slug");
            return slug_in_use();
        }
        if db_err.is_foreign_key_violation() {
            warn!(constraint = ?db_err.constraint(), "Content write referenced a missing row");
            return unknown_template();
        }
    }
    error!(error = %e, "Database error writing content");
    AppError::from(e)
}

pub struct ContentService;

impl ContentService {
    async fn slug_taken(db: &PgPool, slug: &str, except: Option<Uuid>) -> Result<bool, AppError> {
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM contents WHERE slug = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(slug)
        .bind(except)
        .fetch_one(db)
        .await?;
        Ok(taken)
    }

    async fn template_exists(db: &PgPool, template_id: Uuid) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM templates WHERE id = $1 AND deleted_at IS NULL)",
        )
        .bind(template_id)
        .fetch_one(db)
        .await?;
        Ok(exists)
    }

    async fn find_raw(db: &PgPool, id: Uuid) -> Result<Content, AppError> {
        sqlx::query_as::<_, Content>(&format!(
            "SELECT {CONTENT_COLUMNS} FROM contents WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(not_found)
    }

    async fn find_with_relations(
        db: &PgPool,
        lookup: Lookup<'_>,
    ) -> Result<Option<ContentWithRelations>, AppError> {
        let column = match lookup {
            Lookup::Id(_) => "id",
            Lookup::Slug(_) => "slug",
        };
        let query = format!("{CONTENT_SELECT} WHERE c.{column} = $1 AND c.deleted_at IS NULL");

        let sql = sqlx::query_as::<_, ContentRow>(&query);
        let sql = match lookup {
            Lookup::Id(id) => sql.bind(id),
            Lookup::Slug(slug) => sql.bind(slug),
        };

        Ok(sql.fetch_optional(db).await?.map(ContentWithRelations::from))
    }

    #[instrument(skip(db, dto), fields(content.title = %dto.title, db.operation = "INSERT", db.table = "contents"))]
    pub async fn create_content(
        db: &PgPool,
        author_id: Uuid,
        dto: CreateContentDto,
    ) -> Result<ContentWithRelations, AppError> {
        let slug = checked_slug(&dto.resolved_slug())?;
        let status = dto
            .status
            .ok_or_else(|| AppError::field("status", "Status is required"))?;

        let author_active = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE id = $1 AND deleted_at IS NULL)",
        )
        .bind(author_id)
        .fetch_one(db)
        .await?;
        if !author_active {
            debug!(user.id = %author_id, "Token subject no longer exists");
            return Err(AuthError::InvalidToken.into());
        }

        if Self::slug_taken(db, &slug, None).await? {
            return Err(slug_in_use());
        }
        if let Some(template_id) = dto.template_id
            && !Self::template_exists(db, template_id).await?
        {
            return Err(unknown_template());
        }

        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO contents (title, slug, body, status, author_id, template_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id",
        )
        .bind(&dto.title)
        .bind(&slug)
        .bind(&dto.body)
        .bind(status)
        .bind(author_id)
        .bind(dto.template_id)
        .fetch_one(db)
        .await
        .map_err(map_write_error)?;

        metrics::track_content_created(status.as_str());
        info!(content.id = %id, content.slug = %slug, "Content created");

        Self::find_with_relations(db, Lookup::Id(id))
            .await?
            .ok_or_else(not_found)
    }

    #[instrument(skip(db, filters), fields(db.operation = "SELECT", db.table = "contents"))]
    pub async fn list_contents(
        db: &PgPool,
        viewer: Viewer,
        filters: ContentFilterParams,
    ) -> Result<PaginatedContentsResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        let where_clause = " WHERE c.deleted_at IS NULL
            AND ($1::text IS NULL OR c.status = $1)
            AND ($2::uuid IS NULL OR c.author_id = $2)
            AND ($3::uuid IS NULL OR c.template_id = $3)
            AND ($4 OR c.status = 'published' OR c.author_id = $5)";

        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM contents c{where_clause}"
        ))
        .bind(filters.status)
        .bind(filters.author_id)
        .bind(filters.template_id)
        .bind(viewer.is_admin)
        .bind(viewer.user_id)
        .fetch_one(db)
        .await?;

        let rows = sqlx::query_as::<_, ContentRow>(&format!(
            "{CONTENT_SELECT}{where_clause}
             ORDER BY c.created_at DESC LIMIT {limit} OFFSET {offset}"
        ))
        .bind(filters.status)
        .bind(filters.author_id)
        .bind(filters.template_id)
        .bind(viewer.is_admin)
        .bind(viewer.user_id)
        .fetch_all(db)
        .await?;

        debug!(total, returned = rows.len(), "Contents fetched");

        Ok(PaginatedContentsResponse {
            data: rows.into_iter().map(ContentWithRelations::from).collect(),
            meta: PaginationMeta::new(total, &filters.pagination),
        })
    }

    #[instrument(skip(db), fields(content.id = %id, db.operation = "SELECT", db.table = "contents"))]
    pub async fn get_content(
        db: &PgPool,
        viewer: Viewer,
        id: Uuid,
    ) -> Result<ContentWithRelations, AppError> {
        Self::find_with_relations(db, Lookup::Id(id))
            .await?
            .filter(|content| viewer.can_see(content))
            .ok_or_else(not_found)
    }

    #[instrument(skip(db), fields(content.slug = %slug, db.operation = "SELECT", db.table = "contents"))]
    pub async fn get_content_by_slug(
        db: &PgPool,
        viewer: Viewer,
        slug: &str,
    ) -> Result<ContentWithRelations, AppError> {
        Self::find_with_relations(db, Lookup::Slug(slug))
            .await?
            .filter(|content| viewer.can_see(content))
            .ok_or_else(not_found)
    }

    #[instrument(skip(db, user, dto), fields(content.id = %id, db.operation = "UPDATE", db.table = "contents"))]
    pub async fn update_content(
        db: &PgPool,
        user: &AuthUser,
        id: Uuid,
        dto: UpdateContentDto,
    ) -> Result<ContentWithRelations, AppError> {
        let existing = Self::find_raw(db, id).await?;
        check_owner_or_admin(user, existing.author_id)?;

        let slug = match dto.slug.as_deref() {
            Some(raw) => {
                let slug = checked_slug(raw)?;
                if slug != existing.slug && Self::slug_taken(db, &slug, Some(id)).await? {
                    return Err(slug_in_use());
                }
                Some(slug)
            }
            None => None,
        };

        if let Some(Some(template_id)) = dto.template_id
            && !Self::template_exists(db, template_id).await?
        {
            return Err(unknown_template());
        }

        sqlx::query(
            "UPDATE contents SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                body = COALESCE($4, body),
                status = COALESCE($5, status),
                template_id = CASE WHEN $6 THEN $7 ELSE template_id END,
                updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(&dto.title)
        .bind(&slug)
        .bind(&dto.body)
        .bind(dto.status)
        .bind(dto.template_id.is_some())
        .bind(dto.template_id.flatten())
        .execute(db)
        .await
        .map_err(map_write_error)?;

        info!(content.id = %id, "Content updated");

        Self::find_with_relations(db, Lookup::Id(id))
            .await?
            .ok_or_else(not_found)
    }

    #[instrument(skip(db, user), fields(content.id = %id, db.operation = "UPDATE", db.table = "contents"))]
    pub async fn delete_content(db: &PgPool, user: &AuthUser, id: Uuid) -> Result<(), AppError> {
        let existing = Self::find_raw(db, id).await?;
        check_owner_or_admin(user, existing.author_id)?;

        sqlx::query(
            "UPDATE contents SET deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(db)
        .await?;

        info!(content.id = %id, "Content soft-deleted");
        Ok(())
    }
}
