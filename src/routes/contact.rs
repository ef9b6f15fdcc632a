//! Contact-form intake endpoint (/contact)

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::AppState;
use crate::services::airtable::{AirtableError, ContactForm};

const SUBMIT_RETRY_MESSAGE: &str = "Failed to submit, please try again later";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/contact", post(submit_contact))
}

#[derive(Deserialize)]
struct ContactRequest {
    name: String,
    email: String,
    telegram: String,
    message: String,
}

#[derive(Serialize)]
struct ContactResponse {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// POST /contact - forward a contact request to the intake table. The
/// configuration check happens before any network attempt and names the
/// missing value.
async fn submit_contact(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ContactRequest>,
) -> (StatusCode, Json<ContactResponse>) {
    let airtable = match &state.airtable {
        Ok(airtable) => airtable,
        Err(missing) => {
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ContactResponse {
                    status: "error",
                    message: Some(missing.clone()),
                }),
            );
        }
    };

    let form = ContactForm {
        name: payload.name,
        email: payload.email,
        telegram: payload.telegram,
        message: payload.message,
    };

    match airtable.submit(&form).await {
        Ok(()) => (
            StatusCode::CREATED,
            Json(ContactResponse {
                status: "ok",
                message: None,
            }),
        ),
        Err(e @ AirtableError::NotAuthorized) => {
            tracing::error!("Contact intake rejected: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(ContactResponse {
                    status: "error",
                    message: Some(e.to_string()),
                }),
            )
        }
        Err(e) => {
            tracing::error!("Contact intake error: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(ContactResponse {
                    status: "error",
                    message: Some(SUBMIT_RETRY_MESSAGE.to_string()),
                }),
            )
        }
    }
}
