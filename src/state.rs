use sqlx::PgPool;

use folio_config::{ConfigError, CorsConfig, JwtConfig, RateLimitConfig};
use folio_db::init_db_pool;

/// Shared, read-only state handed to every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub rate_limit_config: RateLimitConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("database connection failed: {0}")]
    Database(#[from] sqlx::Error),
}

pub async fn init_app_state() -> Result<AppState, StartupError> {
    let jwt_config = JwtConfig::from_env()?;

    Ok(AppState {
        db: init_db_pool().await?,
        jwt_config,
        cors_config: CorsConfig::from_env(),
        rate_limit_config: RateLimitConfig::from_env(),
    })
}
