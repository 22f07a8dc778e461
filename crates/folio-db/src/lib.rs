//! # Folio DB
//!
//! PostgreSQL connection pool and embedded migrations.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: connection string (required)
//! - `DB_MAX_CONNECTIONS`: pool size (default: 10)
//! - `DB_RUN_MIGRATIONS`: apply pending migrations at startup (default: true)
//!
//! # Example
//!
//! ```ignore
//! use folio_db::{init_db_pool, run_migrations};
//!
//! let pool = init_db_pool().await?;
//! run_migrations(&pool).await?;
//! ```

use std::env;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tracing::info;

pub use sqlx::PgPool;

pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Connects to `DATABASE_URL`.
///
/// # Errors
///
/// Returns [`sqlx::Error::Configuration`] when `DATABASE_URL` is unset, or the
/// connection error when the database cannot be reached.
pub async fn init_db_pool() -> Result<PgPool, sqlx::Error> {
    let database_url = env::var("DATABASE_URL")
        .map_err(|_| sqlx::Error::Configuration("DATABASE_URL must be set".into()))?;

    let max_connections = env::var("DB_MAX_CONNECTIONS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_MAX_CONNECTIONS);

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&database_url)
        .await?;

    info!(max_connections, "Database pool initialized");

    Ok(pool)
}

/// Applies the SQL migrations embedded from the workspace `migrations/` directory.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}

/// Whether startup should apply migrations (`DB_RUN_MIGRATIONS`, default true).
pub fn migrations_enabled() -> bool {
    env::var("DB_RUN_MIGRATIONS")
        .map(|v| v.to_lowercase() != "false" && v != "0")
        .unwrap_or(true)
}
