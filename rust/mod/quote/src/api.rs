use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Map, Value};
use tracing::{error, info};

use cover_core::ServiceError;

use crate::store::SubmissionStore;

pub const SAVED_MESSAGE: &str = "Form saved successfully";
pub const SAVE_FAILED: &str = "Failed to save form data";

type StoreState = Arc<SubmissionStore>;

/// Build the quote module router.
///
/// Routes:
/// - `GET  /`            liveness
/// - `POST /api/submit`  append a form submission
pub fn router(store: Arc<SubmissionStore>) -> Router {
    Router::new()
        .route("/", get(status))
        .route("/api/submit", post(submit))
        .with_state(store)
}

async fn status() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "message": "Health Cover API running",
    }))
}

/// POST /api/submit: cast and persist the body.
///
/// Any failure, parse, cast or storage, answers 500 with a fixed message. The
/// cause is only logged.
async fn submit(
    State(store): State<StoreState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>), ServiceError> {
    let saved = read_document(&headers, &body)
        .map_err(|e| ServiceError::Validation(format!("malformed JSON body: {e}")))
        .and_then(|document| store.submit(&document));

    match saved {
        Ok(record) => {
            info!(id = %record.id, "form submission saved");
            Ok((StatusCode::CREATED, Json(json!({ "message": SAVED_MESSAGE }))))
        }
        Err(e) => {
            error!(error = %e, code = e.error_code(), "failed to save form submission");
            Err(ServiceError::Storage(SAVE_FAILED.into()))
        }
    }
}

/// Only JSON bodies are read. Any other content type, or an empty body,
/// is an empty document.
fn read_document(headers: &HeaderMap, body: &[u8]) -> Result<Value, serde_json::Error> {
    if !is_json(headers) || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(body)
}

fn is_json(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}
