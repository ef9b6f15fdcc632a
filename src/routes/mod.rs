pub mod contact;
pub mod dto;
pub mod spaces;
pub mod threads;
pub mod transcribe;

use axum::{Router, routing::get};
use std::sync::Arc;

use crate::AppState;

/// Build all routes for the API
pub fn build_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .merge(transcribe::routes())
        .merge(spaces::routes())
        .merge(threads::routes())
        .merge(contact::routes())
}

async fn health() -> &'static str {
    "ok"
}
