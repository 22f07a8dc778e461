//! Content seeding.

use std::time::Instant;

use fake::Fake;
use fake::faker::boolean::en::Boolean;
use fake::faker::lorem::en::{Paragraph, Sentence};
use folio_models::{ContentStatus, slugify};
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::models::ContentSeed;

/// Generates `per_author` items for every author. Roughly half are
/// published and half use `template_id`.
pub fn generate_contents(
    author_ids: &[Uuid],
    per_author: usize,
    template_id: Option<Uuid>,
    run_tag: &str,
) -> Vec<ContentSeed> {
    author_ids
        .par_iter()
        .enumerate()
        .flat_map(|(author_idx, &author_id)| {
            (0..per_author)
                .map(|item_idx| {
                    let title: String = Sentence(3..8).fake();
                    let title = title.trim_end_matches('.').to_string();
                    let paragraphs: String = Paragraph(3..6).fake();
                    let published: bool = Boolean(50).fake();
                    let templated: bool = Boolean(50).fake();

                    ContentSeed {
                        slug: format!(
                            "{}-{}-{}",
                            slugify(&title),
                            run_tag,
                            author_idx * 1000 + item_idx
                        ),
                        title,
                        body: paragraphs,
                        status: if published {
                            ContentStatus::Published
                        } else {
                            ContentStatus::Draft
                        },
                        author_id,
                        template_id: template_id.filter(|_| templated),
                        seed_run: run_tag.to_string(),
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

pub async fn seed_contents(
    db: &PgPool,
    author_ids: &[Uuid],
    per_author: usize,
    template_id: Option<Uuid>,
    run_tag: &str,
) -> anyhow::Result<u64> {
    let start_time = Instant::now();
    println!(
        "📝 Seeding {} contents ({} per author)...",
        author_ids.len() * per_author,
        per_author
    );

    let contents = generate_contents(author_ids, per_author, template_id, run_tag);
    let inserted = insert_contents_batch(db, &contents).await?;

    println!(
        "   ✓ Inserted {} contents in {:?}",
        inserted,
        start_time.elapsed()
    );

    Ok(inserted)
}

pub async fn insert_contents_batch(db: &PgPool, contents: &[ContentSeed]) -> anyhow::Result<u64> {
    let mut tx = db.begin().await?;

    // 7 params per content
    const BATCH_SIZE: usize = 1000;

    let mut inserted = 0;
    for chunk in contents.chunks(BATCH_SIZE) {
        inserted += insert_contents_chunk(&mut tx, chunk).await?;
    }

    tx.commit().await?;
    Ok(inserted)
}

async fn insert_contents_chunk(
    tx: &mut Transaction<'_, Postgres>,
    contents: &[ContentSeed],
) -> anyhow::Result<u64> {
    if contents.is_empty() {
        return Ok(0);
    }

    let mut query = String::from(
        "INSERT INTO contents (title, slug, body, status, author_id, template_id, seed_run) VALUES ",
    );
    for i in 0..contents.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let p = i * 7;
        query.push_str(&format!(
            "(${}, ${}, ${}, ${}, ${}, ${}, ${})",
            p + 1,
            p + 2,
            p + 3,
            p + 4,
            p + 5,
            p + 6,
            p + 7
        ));
    }
    query.push_str(" ON CONFLICT (slug) DO NOTHING");

    let mut q = sqlx::query(&query);
    for content in contents {
        q = q
            .bind(&content.title)
            .bind(&content.slug)
            .bind(&content.body)
            .bind(content.status)
            .bind(content.author_id)
            .bind(content.template_id)
            .bind(&content.seed_run);
    }

    Ok(q.execute(&mut **tx).await?.rows_affected())
}
