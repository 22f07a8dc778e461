//! Demo template seeding.

use serde_json::json;
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

pub const DEMO_TEMPLATE_NAME: &str = "Blog Post";
pub const DEMO_TEMPLATE_DESCRIPTION: &str = "Template for blog posts";

/// Component flags of the demo template.
pub fn demo_components() -> serde_json::Value {
    json!({
        "header": true,
        "footer": true,
        "sidebar": false,
    })
}

/// Inserts the demo template tagged with `run_tag`, or returns the id of the
/// live one already present.
pub async fn seed_demo_template(db: &PgPool, run_tag: &str) -> anyhow::Result<Uuid> {
    println!("🧩 Seeding demo template...");

    let inserted: Option<Uuid> = sqlx::query_scalar(
        "INSERT INTO templates (name, description, components, seed_run)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT (name) DO NOTHING
         RETURNING id",
    )
    .bind(DEMO_TEMPLATE_NAME)
    .bind(DEMO_TEMPLATE_DESCRIPTION)
    .bind(Json(demo_components()))
    .bind(run_tag)
    .fetch_optional(db)
    .await?;

    if let Some(id) = inserted {
        println!("   ✓ Created template \"{}\"", DEMO_TEMPLATE_NAME);
        return Ok(id);
    }

    let existing: Option<Uuid> =
        sqlx::query_scalar("SELECT id FROM templates WHERE name = $1 AND deleted_at IS NULL")
            .bind(DEMO_TEMPLATE_NAME)
            .fetch_optional(db)
            .await?;

    match existing {
        Some(id) => {
            println!("   ✓ Template \"{}\" already present", DEMO_TEMPLATE_NAME);
            Ok(id)
        }
        None => anyhow::bail!(
            "template \"{}\" exists but is deleted; run clear-seed first",
            DEMO_TEMPLATE_NAME
        ),
    }
}

/// Removes templates the seeder created, from every run or only from
/// `run_tag`. Contents pointing at them are detached by the FK. A template
/// an admin created under the demo name is left alone.
pub async fn clear_seeded_templates(db: &PgPool, run_tag: Option<&str>) -> anyhow::Result<u64> {
    let result = sqlx::query(
        "DELETE FROM templates
         WHERE seed_run IS NOT NULL AND ($1::text IS NULL OR seed_run = $1)",
    )
    .bind(run_tag)
    .execute(db)
    .await?;

    Ok(result.rows_affected())
}
