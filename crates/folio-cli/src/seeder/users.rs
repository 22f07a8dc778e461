//! User seeding and admin account creation.

use std::time::Instant;

use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use folio_core::hash_password;
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::models::UserSeed;

pub const DEMO_ADMIN_USERNAME: &str = "admin";
pub const DEMO_ADMIN_EMAIL: &str = "admin@example.com";

pub const SEED_EMAIL_DOMAIN: &str = "example.com";

const MIN_PASSWORD_LEN: usize = 8;

pub fn hash_seed_password(password: &str) -> anyhow::Result<String> {
    hash_password(password).map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e.error))
}

/// Builds a username from a fake name, keeping only ASCII alphanumerics.
pub fn seed_username(first_name: &str, last_name: &str, run_tag: &str, idx: usize) -> String {
    let clean = |s: &str| -> String {
        s.chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_lowercase())
            .collect()
    };

    format!("{}.{}.{}{}", clean(first_name), clean(last_name), run_tag, idx)
}

pub fn generate_users(count: usize, run_tag: &str, password_hash: &str) -> Vec<UserSeed> {
    (0..count)
        .into_par_iter()
        .map(|idx| {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();
            let username = seed_username(&first_name, &last_name, run_tag, idx);
            let email = format!("{}@{}", username, SEED_EMAIL_DOMAIN);

            UserSeed {
                username,
                email,
                password_hash: password_hash.to_string(),
                seed_run: run_tag.to_string(),
            }
        })
        .collect()
}

pub async fn seed_users(
    db: &PgPool,
    count: usize,
    run_tag: &str,
    password_hash: &str,
) -> anyhow::Result<Vec<Uuid>> {
    let start_time = Instant::now();
    println!("👥 Seeding {} users...", count);

    let users = generate_users(count, run_tag, password_hash);
    let ids = insert_users_batch(db, &users).await?;

    println!(
        "   ✓ Inserted {} users in {:?}",
        ids.len(),
        start_time.elapsed()
    );

    Ok(ids)
}

/// Inserts users in one transaction. Rows that collide with an existing
/// username or email are skipped and missing from the returned ids.
pub async fn insert_users_batch(db: &PgPool, users: &[UserSeed]) -> anyhow::Result<Vec<Uuid>> {
    let mut tx = db.begin().await?;

    // 4 params per user
    const BATCH_SIZE: usize = 2000;

    let mut all_ids = Vec::with_capacity(users.len());
    for chunk in users.chunks(BATCH_SIZE) {
        all_ids.extend(insert_users_chunk(&mut tx, chunk).await?);
    }

    tx.commit().await?;
    Ok(all_ids)
}

async fn insert_users_chunk(
    tx: &mut Transaction<'_, Postgres>,
    users: &[UserSeed],
) -> anyhow::Result<Vec<Uuid>> {
    if users.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = String::from("INSERT INTO users (username, email, password, seed_run, is_verified) VALUES ");
    for i in 0..users.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let param_idx = i * 4;
        query.push_str(&format!(
            "(${}, ${}, ${}, ${}, TRUE)",
            param_idx + 1,
            param_idx + 2,
            param_idx + 3,
            param_idx + 4
        ));
    }
    query.push_str(" ON CONFLICT DO NOTHING RETURNING id");

    let mut q = sqlx::query_scalar(&query);
    for user in users {
        q = q
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.seed_run);
    }

    let ids: Vec<Uuid> = q.fetch_all(&mut **tx).await?;
    Ok(ids)
}

/// Ensures the demo admin exists and returns its id.
pub async fn seed_demo_admin(db: &PgPool, password_hash: &str) -> anyhow::Result<Uuid> {
    println!("🔑 Seeding demo admin...");

    let id: Option<Uuid> = sqlx::query_scalar(
        "INSERT INTO users (username, email, password, role, is_verified)
         VALUES ($1, $2, $3, 'admin', TRUE)
         ON CONFLICT DO NOTHING
         RETURNING id",
    )
    .bind(DEMO_ADMIN_USERNAME)
    .bind(DEMO_ADMIN_EMAIL)
    .bind(password_hash)
    .fetch_optional(db)
    .await?;

    let id = match id {
        Some(id) => {
            println!("   ✓ Created {}", DEMO_ADMIN_EMAIL);
            id
        }
        None => {
            println!("   ✓ {} already present", DEMO_ADMIN_EMAIL);
            sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
                .bind(DEMO_ADMIN_EMAIL)
                .fetch_one(db)
                .await?
        }
    };

    Ok(id)
}

/// Creates a verified admin account. Fails if the username or email is taken.
pub async fn create_admin(
    db: &PgPool,
    username: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<Uuid> {
    let username = username.trim();
    let email = email.trim().to_lowercase();

    if username.is_empty() {
        anyhow::bail!("Username is required");
    }
    if !email.contains('@') {
        anyhow::bail!("Invalid email format");
    }
    if password.len() < MIN_PASSWORD_LEN {
        anyhow::bail!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        );
    }

    let hashed_password = hash_seed_password(password)?;

    let id: Option<Uuid> = sqlx::query_scalar(
        "INSERT INTO users (username, email, password, role, is_verified)
         VALUES ($1, $2, $3, 'admin', TRUE)
         ON CONFLICT DO NOTHING
         RETURNING id",
    )
    .bind(username)
    .bind(&email)
    .bind(&hashed_password)
    .fetch_optional(db)
    .await?;

    id.ok_or_else(|| anyhow::anyhow!("A user with this username or email already exists"))
}

/// Deletes non-admin users created by the seeder, from every run or only
/// from `run_tag`. Their contents go with them. Accounts that registered
/// through the API carry no run tag and are never touched.
pub async fn clear_users(db: &PgPool, run_tag: Option<&str>) -> anyhow::Result<u64> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded users...");

    let result = sqlx::query(
        "DELETE FROM users
         WHERE seed_run IS NOT NULL
           AND ($1::text IS NULL OR seed_run = $1)
           AND role <> 'admin'",
    )
    .bind(run_tag)
    .execute(db)
    .await?;

    let deleted = result.rows_affected();
    println!(
        "   ✓ Deleted {} users in {:?}",
        deleted,
        start_time.elapsed()
    );

    Ok(deleted)
}
