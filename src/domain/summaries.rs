//! Named summary documents stored under a space.
//!
//! The summarization pipeline writes three documents per space: the final
//! summary, a `meta` document carrying the first-level section summaries it was
//! reduced from, and the stitched full transcript.

use sqlx::PgPool;

pub const FINAL_SUMMARY_DOC: &str = "final_summary";
pub const META_DOC: &str = "meta";
pub const FULL_TRANSCRIPT_DOC: &str = "full_transcript";

async fn get_summary_doc(
    pool: &PgPool,
    space_id: &str,
    name: &str,
) -> Result<Option<serde_json::Value>, sqlx::Error> {
    let row: Option<(serde_json::Value,)> =
        sqlx::query_as("SELECT body FROM summaries WHERE space_id = $1 AND name = $2")
            .bind(space_id)
            .bind(name)
            .fetch_optional(pool)
            .await?;
    Ok(row.map(|r| r.0))
}

pub async fn get_summary(
    pool: &PgPool,
    space_id: &str,
) -> Result<Option<serde_json::Value>, sqlx::Error> {
    get_summary_doc(pool, space_id, FINAL_SUMMARY_DOC).await
}

pub async fn get_first_level_summaries(
    pool: &PgPool,
    space_id: &str,
) -> Result<Option<serde_json::Value>, sqlx::Error> {
    Ok(get_summary_doc(pool, space_id, META_DOC)
        .await?
        .and_then(|mut body| {
            body.get_mut("first_level_summaries")
                .map(serde_json::Value::take)
        }))
}

pub async fn get_full_transcript(
    pool: &PgPool,
    space_id: &str,
) -> Result<Option<String>, sqlx::Error> {
    Ok(get_summary_doc(pool, space_id, FULL_TRANSCRIPT_DOC)
        .await?
        .and_then(|body| body.get("text").and_then(|t| t.as_str().map(str::to_owned))))
}
