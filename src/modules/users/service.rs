use sqlx::PgPool;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use folio_core::{AppError, PaginationMeta, hash_password_async, verify_password_async};
use folio_models::{ChangePasswordRequest, PaginatedUsersResponse, User, UserFilterParams};

use crate::modules::auth::service::USER_COLUMNS;

pub struct UserService;

impl UserService {
    #[instrument(skip(db), fields(user.id = %user_id, db.operation = "SELECT", db.table = "users"))]
    pub async fn get_user(db: &PgPool, user_id: Uuid) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))
    }

    #[instrument(skip(db, dto), fields(user.id = %user_id, db.operation = "UPDATE", db.table = "users"))]
    pub async fn change_password(
        db: &PgPool,
        user_id: Uuid,
        dto: ChangePasswordRequest,
    ) -> Result<(), AppError> {
        let current_hash = sqlx::query_scalar::<_, String>(
            "SELECT password FROM users WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        if !verify_password_async(dto.current_password, current_hash).await? {
            return Err(AppError::unauthorized("Current password is incorrect")
                .with_code("invalid_credentials"));
        }

        let new_hash = hash_password_async(dto.new_password).await?;

        sqlx::query("UPDATE users SET password = $1, updated_at = NOW() WHERE id = $2")
            .bind(&new_hash)
            .bind(user_id)
            .execute(db)
            .await?;

        info!(user.id = %user_id, "Password changed");
        Ok(())
    }

    #[instrument(skip(db, filters), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn list_users(
        db: &PgPool,
        filters: UserFilterParams,
    ) -> Result<PaginatedUsersResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        let mut where_clause = String::from(" WHERE deleted_at IS NULL");
        let mut params = Vec::new();

        if let Some(username) = filters.username.as_deref().filter(|s| !s.is_empty()) {
            params.push(format!("%{}%", username));
            where_clause.push_str(&format!(" AND username ILIKE ${}", params.len()));
        }
        if let Some(email) = filters.email.as_deref().filter(|s| !s.is_empty()) {
            params.push(format!("%{}%", email));
            where_clause.push_str(&format!(" AND email ILIKE ${}", params.len()));
        }

        let count_query = format!("SELECT COUNT(*) FROM users{where_clause}");
        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        for param in &params {
            count_sql = count_sql.bind(param);
        }
        let total = count_sql.fetch_one(db).await.map_err(|e| {
            error!(error = %e, "Database error counting users");
            AppError::from(e)
        })?;

        let data_query = format!(
            "SELECT {USER_COLUMNS} FROM users{where_clause}
             ORDER BY created_at DESC LIMIT {limit} OFFSET {offset}"
        );
        let mut data_sql = sqlx::query_as::<_, User>(&data_query);
        for param in params {
            data_sql = data_sql.bind(param);
        }
        let users = data_sql.fetch_all(db).await.map_err(|e| {
            error!(error = %e, "Database error fetching users");
            AppError::from(e)
        })?;

        debug!(total, returned = users.len(), "Users fetched");

        Ok(PaginatedUsersResponse {
            data: users,
            meta: PaginationMeta::new(total, &filters.pagination),
        })
    }

    #[instrument(skip(db), fields(user.id = %user_id, db.operation = "UPDATE", db.table = "users"))]
    pub async fn delete_user(db: &PgPool, user_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE users SET deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(user_id)
        .execute(db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("User not found")));
        }

        info!(user.id = %user_id, "User soft-deleted");
        Ok(())
    }
}
