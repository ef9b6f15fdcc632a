//! Space read surface (/spaces/*)

use axum::{
    Json, Router,
    extract::{
        Path, Query, State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::AppState;
use crate::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::domain::spaces::{self, TranscriptionStatus};
use crate::domain::summaries;
use crate::services::audio;
use crate::services::error::LogErr;

use super::dto::{SegmentResponse, SpaceResponse};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        // The detail route the orchestrator's location points at; statically
        // named routes take precedence over it.
        .route("/{id}", get(get_space))
        .route("/spaces", get(list_spaces))
        .route("/spaces/{id}", get(get_space))
        .route("/spaces/{id}/summary", get(get_summary))
        .route("/spaces/{id}/summary/detailed", get(get_detailed_summary))
        .route("/spaces/{id}/transcript", get(get_transcript))
        .route("/spaces/{id}/segments", get(get_segments))
        .route("/spaces/{id}/audio-url", get(get_audio_url))
        .route("/spaces/{id}/watch", get(watch_space))
}

#[derive(Deserialize)]
struct ListSpacesQuery {
    status: Option<String>,
    limit: Option<i64>,
    offset: Option<i64>,
}

#[derive(Serialize)]
struct ListSpacesResponse {
    spaces: Vec<SpaceResponse>,
    total: i64,
    has_more: bool,
}

/// GET /spaces - list spaces by lifecycle status (defaults to finished ones)
async fn list_spaces(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListSpacesQuery>,
) -> Result<Json<ListSpacesResponse>, StatusCode> {
    let status = TranscriptionStatus::from_str(query.status.as_deref().unwrap_or("ENDED"));
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);
    let offset = query.offset.unwrap_or(0);

    let total = spaces::count_spaces_by_status(&state.db, status)
        .await
        .log_500("Count spaces error")?;

    let result = spaces::list_spaces_by_status(&state.db, status, limit, offset)
        .await
        .log_500("List spaces error")?;

    let has_more = offset + (result.len() as i64) < total;

    Ok(Json(ListSpacesResponse {
        spaces: result.into_iter().map(SpaceResponse::from).collect(),
        total,
        has_more,
    }))
}

/// GET /spaces/:id - the session record behind the detail view
async fn get_space(
    State(state): State<Arc<AppState>>,
    Path(space_id): Path<String>,
) -> Result<Json<SpaceResponse>, StatusCode> {
    let space = spaces::get_space(&state.db, &space_id)
        .await
        .log_500("Get space error")?
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(SpaceResponse::from(space)))
}

/// GET /spaces/:id/summary - the final summary document
async fn get_summary(
    State(state): State<Arc<AppState>>,
    Path(space_id): Path<String>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let summary = summaries::get_summary(&state.db, &space_id)
        .await
        .log_500("Get summary error")?
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(summary))
}

/// GET /spaces/:id/summary/detailed - the first-level section summaries
async fn get_detailed_summary(
    State(state): State<Arc<AppState>>,
    Path(space_id): Path<String>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let sections = summaries::get_first_level_summaries(&state.db, &space_id)
        .await
        .log_500("Get detailed summary error")?
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(sections))
}

#[derive(Serialize)]
struct TranscriptResponse {
    text: String,
}

/// GET /spaces/:id/transcript - the stitched full transcript
async fn get_transcript(
    State(state): State<Arc<AppState>>,
    Path(space_id): Path<String>,
) -> Result<Json<TranscriptResponse>, StatusCode> {
    let text = summaries::get_full_transcript(&state.db, &space_id)
        .await
        .log_500("Get transcript error")?
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(TranscriptResponse { text }))
}

/// GET /spaces/:id/segments - first page of time-aligned transcript chunks
async fn get_segments(
    State(state): State<Arc<AppState>>,
    Path(space_id): Path<String>,
) -> Result<Json<Vec<SegmentResponse>>, StatusCode> {
    let segments = spaces::get_segments(&state.db, &space_id)
        .await
        .log_500("Get segments error")?;

    Ok(Json(
        segments.into_iter().map(SegmentResponse::from).collect(),
    ))
}

#[derive(Serialize)]
struct SignedUrlResponse {
    url: String,
    content_type: &'static str,
}

/// GET /spaces/:id/audio-url - signed URL for the recording playback
async fn get_audio_url(
    State(state): State<Arc<AppState>>,
    Path(space_id): Path<String>,
) -> Result<Json<SignedUrlResponse>, StatusCode> {
    // 404 for spaces this deployment has never seen
    let exists = spaces::space_exists(&state.db, &space_id)
        .await
        .log_500("Space lookup error")?;
    if !exists {
        return Err(StatusCode::NOT_FOUND);
    }

    let url = audio::audio_download_url(&space_id)
        .await
        .log_500("Signed URL error")?;

    Ok(Json(SignedUrlResponse {
        url,
        content_type: "audio/mpeg",
    }))
}

/// GET /spaces/:id/watch - WebSocket pushing record snapshots as they change
async fn watch_space(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(space_id): Path<String>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_watch_ws(socket, state, space_id))
}

async fn handle_watch_ws(socket: WebSocket, state: Arc<AppState>, space_id: String) {
    let (mut sender, mut receiver) = socket.split();
    let mut rx = spaces::watch_space(state.db.clone(), space_id);

    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = rx.borrow_and_update().clone().map(SpaceResponse::from);
                let json = match serde_json::to_string(&snapshot) {
                    Ok(json) => json,
                    Err(_) => continue,
                };
                if sender.send(Message::Text(json.into())).await.is_err() {
                    break;
                }
            }
            msg = receiver.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    _ => {}
                }
            }
        }
    }
}
