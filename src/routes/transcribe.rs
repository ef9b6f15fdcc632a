//! Landing orchestration endpoint (/transcribe)

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::AppState;
use crate::services::orchestrator::TranscribeOutcome;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/transcribe", post(transcribe))
}

#[derive(Deserialize)]
struct TranscribeRequest {
    url: String,
}

#[derive(Serialize)]
struct TranscribeResponse {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl TranscribeResponse {
    fn status_only(status: &'static str) -> Self {
        Self {
            status,
            location: None,
            message: None,
        }
    }
}

/// POST /transcribe - resolve a pasted space URL to a navigable detail route,
/// triggering backend transcription when the record does not exist yet
async fn transcribe(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TranscribeRequest>,
) -> (StatusCode, Json<TranscribeResponse>) {
    let outcome = state.orchestrator.transcribe_space(&payload.url).await;
    let location = outcome.location();

    match outcome {
        TranscribeOutcome::Ignored => {
            (StatusCode::OK, Json(TranscribeResponse::status_only("ignored")))
        }
        TranscribeOutcome::Busy => {
            (StatusCode::OK, Json(TranscribeResponse::status_only("busy")))
        }
        TranscribeOutcome::Existing { .. } => (
            StatusCode::OK,
            Json(TranscribeResponse {
                status: "exists",
                location,
                message: None,
            }),
        ),
        TranscribeOutcome::Requested { .. } => (
            StatusCode::OK,
            Json(TranscribeResponse {
                status: "requested",
                location,
                message: None,
            }),
        ),
        TranscribeOutcome::Failed { message } => (
            StatusCode::BAD_GATEWAY,
            Json(TranscribeResponse {
                status: "error",
                location: None,
                message: Some(message),
            }),
        ),
    }
}
