//! Read queries over the spaces collection.
//!
//! The backend owns every write to these tables; this service only reads.

use sqlx::PgPool;

use crate::constants::SEGMENT_PAGE_SIZE;

use super::models::{Segment, Space, TranscriptionStatus};

pub async fn get_space(pool: &PgPool, space_id: &str) -> Result<Option<Space>, sqlx::Error> {
    sqlx::query_as::<_, Space>(
        r#"
        SELECT space_id, transcription_status, kind, title, admins, speakers,
               transcript_text, created_at
        FROM spaces
        WHERE space_id = $1
        "#,
    )
    .bind(space_id)
    .fetch_optional(pool)
    .await
}

pub async fn space_exists(pool: &PgPool, space_id: &str) -> Result<bool, sqlx::Error> {
    let row: Option<(i32,)> = sqlx::query_as("SELECT 1 FROM spaces WHERE space_id = $1")
        .bind(space_id)
        .fetch_optional(pool)
        .await?;
    Ok(row.is_some())
}

pub async fn count_spaces_by_status(
    pool: &PgPool,
    status: TranscriptionStatus,
) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM spaces WHERE transcription_status = $1")
        .bind(status)
        .fetch_one(pool)
        .await?;
    Ok(row.0)
}

/// Equality-filtered listing, newest first. Backs the landing page's strip of
/// finished spaces.
pub async fn list_spaces_by_status(
    pool: &PgPool,
    status: TranscriptionStatus,
    limit: i64,
    offset: i64,
) -> Result<Vec<Space>, sqlx::Error> {
    sqlx::query_as::<_, Space>(
        r#"
        SELECT space_id, transcription_status, kind, title, admins, speakers,
               transcript_text, created_at
        FROM spaces
        WHERE transcription_status = $1
        ORDER BY created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(status)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

/// First page of time-aligned transcript chunks, in playback order.
pub async fn get_segments(pool: &PgPool, space_id: &str) -> Result<Vec<Segment>, sqlx::Error> {
    sqlx::query_as::<_, Segment>(
        r#"
        SELECT idx, start_sec, end_sec, text, seek_off, no_speech_prob
        FROM segments
        WHERE space_id = $1
        ORDER BY idx ASC
        LIMIT $2
        "#,
    )
    .bind(space_id)
    .bind(SEGMENT_PAGE_SIZE)
    .fetch_all(pool)
    .await
}
