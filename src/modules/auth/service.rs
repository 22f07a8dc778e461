use sqlx::PgPool;
use tracing::{debug, error, info, instrument, warn};

use folio_auth::create_access_token;
use folio_config::JwtConfig;
use folio_core::{AppError, FieldError, hash_password_async, verify_password_async};
use folio_models::{LoginRequest, LoginResponse, RegisterRequest, User, UserCredentials};

use crate::metrics;

pub(crate) const USER_COLUMNS: &str =
    "id, username, email, role, is_verified, created_at, updated_at";

const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto), fields(user.username = %dto.username, db.operation = "INSERT", db.table = "users"))]
    pub async fn register_user(db: &PgPool, dto: RegisterRequest) -> Result<User, AppError> {
        let email = dto.email.to_lowercase();

        let (username_taken, email_taken) = sqlx::query_as::<_, (bool, bool)>(
            "SELECT
                EXISTS(SELECT 1 FROM users WHERE username = $1),
                EXISTS(SELECT 1 FROM users WHERE email = $2)",
        )
        .bind(&dto.username)
        .bind(&email)
        .fetch_one(db)
        .await?;

        let mut conflicts = Vec::new();
        if username_taken {
            conflicts.push(FieldError::new("username", "Username already in use"));
        }
        if email_taken {
            conflicts.push(FieldError::new("email", "Email already in use"));
        }
        if !conflicts.is_empty() {
            debug!(?conflicts, "Registration rejected");
            return Err(AppError::validation(conflicts));
        }

        let password_hash = hash_password_async(dto.password).await?;

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, email, password) VALUES ($1, $2, $3)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&dto.username)
        .bind(&email)
        .bind(&password_hash)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                warn!(constraint = ?db_err.constraint(), "Registration raced a duplicate");
                return match db_err.constraint() {
                    Some("users_email_key") => AppError::field("email", "Email already in use"),
                    _ => AppError::field("username", "Username already in use"),
                };
            }
            error!(error = %e, "Database error creating user");
            AppError::from(e)
        })?;

        metrics::track_user_registered();
        info!(user.id = %user.id, "User registered");

        Ok(user)
    }

    #[instrument(skip(db, dto, jwt_config), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn login_user(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let credentials = sqlx::query_as::<_, UserCredentials>(
            "SELECT id, password, role FROM users WHERE email = $1 AND deleted_at IS NULL",
        )
        .bind(dto.email.to_lowercase())
        .fetch_optional(db)
        .await?;

        let Some(credentials) = credentials else {
            metrics::track_login_failure("unknown_email");
            return Err(invalid_credentials());
        };

        if !verify_password_async(dto.password, credentials.password).await? {
            metrics::track_login_failure("wrong_password");
            return Err(invalid_credentials());
        }

        let token = create_access_token(
            &credentials.id.to_string(),
            credentials.role,
            jwt_config,
        )?;

        metrics::track_login_success(credentials.role.as_str());
        metrics::track_token_issued();
        info!(user.id = %credentials.id, "User logged in");

        Ok(LoginResponse::bearer(token, jwt_config.access_token_expiry))
    }
}

fn invalid_credentials() -> AppError {
    AppError::unauthorized(INVALID_CREDENTIALS).with_code("invalid_credentials")
}
