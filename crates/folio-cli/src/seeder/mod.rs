//! Database seeding for development and manual testing.
//!
//! A full run creates the demo admin (`admin@example.com`), the demo
//! "Blog Post" template, a batch of fake users and their contents. Every
//! generated account shares the configured password. Generated rows carry
//! the run's tag in `seed_run`, which is what clearing keys on.

pub mod contents;
pub mod models;
pub mod templates;
pub mod users;

use std::time::Instant;

use sqlx::PgPool;
use uuid::Uuid;

pub use models::{ContentSeed, DEFAULT_SEED_PASSWORD, SeedConfig, UserSeed};

/// Short random tag that keeps generated usernames and slugs unique across runs.
pub fn new_run_tag() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

pub async fn seed_all(db: &PgPool, config: SeedConfig) -> anyhow::Result<()> {
    let start_time = Instant::now();
    let run_tag = new_run_tag();
    println!("🌱 Seeding database (run {})...\n", run_tag);

    let password_hash = users::hash_seed_password(&config.password)?;

    let admin_id = users::seed_demo_admin(db, &password_hash).await?;
    let template_id = templates::seed_demo_template(db, &run_tag).await?;
    let mut author_ids = users::seed_users(db, config.num_users, &run_tag, &password_hash).await?;
    author_ids.push(admin_id);

    contents::seed_contents(
        db,
        &author_ids,
        config.contents_per_user,
        Some(template_id),
        &run_tag,
    )
    .await?;

    println!("\n✅ Seeding complete in {:?}", start_time.elapsed());
    println!("   Login with any seeded email and password \"{}\"", config.password);
    println!("   Remove this run with: folio-cli clear-seed --run {}", run_tag);

    Ok(())
}

/// Removes rows the seeder created: contents, non-admin users (their
/// remaining contents cascade) and the demo template. `run_tag` limits the
/// sweep to one run. Admin accounts and anything created through the API
/// are kept.
pub async fn clear_all(db: &PgPool, run_tag: Option<&str>) -> anyhow::Result<()> {
    let start_time = Instant::now();
    match run_tag {
        Some(tag) => println!("🧹 Clearing seeded data from run {}...\n", tag),
        None => println!("🧹 Clearing seeded data...\n"),
    }

    let contents = sqlx::query(
        "DELETE FROM contents
         WHERE seed_run IS NOT NULL AND ($1::text IS NULL OR seed_run = $1)",
    )
    .bind(run_tag)
    .execute(db)
    .await?
    .rows_affected();
    println!("   ✓ Deleted {} seeded contents", contents);

    users::clear_users(db, run_tag).await?;

    let templates = templates::clear_seeded_templates(db, run_tag).await?;
    println!("   ✓ Deleted {} seeded templates", templates);

    println!("\n✅ Cleared in {:?}", start_time.elapsed());
    Ok(())
}
