//! Thread display and generation endpoints (/spaces/:id/thread*)

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::Serialize;
use std::sync::Arc;

use crate::AppState;
use crate::domain::{spaces, threads};
use crate::services::error::LogErr;

use super::dto::ThreadResponse;

/// Alert shown when generation fails; the caller can simply re-trigger.
const GENERATE_RETRY_MESSAGE: &str = "Could not generate the thread, please try again later";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/spaces/{id}/thread", get(get_thread))
        .route("/spaces/{id}/thread/generate", post(generate_thread))
}

/// GET /spaces/:id/thread - the generated thread, display-annotated
async fn get_thread(
    State(state): State<Arc<AppState>>,
    Path(space_id): Path<String>,
) -> Result<Json<ThreadResponse>, StatusCode> {
    let thread = threads::get_twitter_thread(&state.db, &space_id)
        .await
        .log_500("Get thread error")?
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(ThreadResponse::from(thread)))
}

#[derive(Serialize)]
struct GenerateError {
    error: String,
}

fn generate_error(status: StatusCode, message: &str) -> (StatusCode, Json<GenerateError>) {
    (
        status,
        Json(GenerateError {
            error: message.to_string(),
        }),
    )
}

/// POST /spaces/:id/thread/generate - defer to the backend, then return the
/// stored thread. Failure is explicit so the caller can leave its loading
/// state and offer a retry.
async fn generate_thread(
    State(state): State<Arc<AppState>>,
    Path(space_id): Path<String>,
) -> Result<Json<ThreadResponse>, (StatusCode, Json<GenerateError>)> {
    let exists = spaces::space_exists(&state.db, &space_id).await.map_err(|e| {
        tracing::error!("Space lookup error: {}", e);
        generate_error(StatusCode::INTERNAL_SERVER_ERROR, GENERATE_RETRY_MESSAGE)
    })?;
    if !exists {
        return Err(generate_error(StatusCode::NOT_FOUND, "Unknown space"));
    }

    if let Err(e) = state.transcriber.generate_twitter_thread(&space_id).await {
        tracing::error!("Thread generation for {} failed: {}", space_id, e);
        return Err(generate_error(
            StatusCode::BAD_GATEWAY,
            GENERATE_RETRY_MESSAGE,
        ));
    }

    // The backend stores the thread before acknowledging; an empty read here
    // still counts as a failure the caller can retry.
    let thread = threads::get_twitter_thread(&state.db, &space_id)
        .await
        .map_err(|e| {
            tracing::error!("Get thread error: {}", e);
            generate_error(StatusCode::INTERNAL_SERVER_ERROR, GENERATE_RETRY_MESSAGE)
        })?;

    match thread {
        Some(thread) if !thread.tweets.is_empty() => Ok(Json(ThreadResponse::from(thread))),
        _ => Err(generate_error(
            StatusCode::BAD_GATEWAY,
            GENERATE_RETRY_MESSAGE,
        )),
    }
}
