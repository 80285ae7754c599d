//! HTTP client for the Submission Sink.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use crate::model::SubmissionPayload;

pub const DEFAULT_SERVER: &str = "http://localhost:5000";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client-side submission error.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP {status}: {message}")]
    Server { status: u16, message: String },

    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    #[error("decode: {0}")]
    Decode(String),
}

/// Body of a successful `POST /api/submit`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubmitAck {
    pub message: String,
}

pub struct SubmitClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl SubmitClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// POST the payload. Not retried.
    pub async fn submit(&self, payload: &SubmissionPayload) -> Result<SubmitAck, ClientError> {
        let url = format!("{}/api/submit", self.base_url);
        let resp = self
            .http
            .post(&url)
            .json(payload)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Server {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        resp.json::<SubmitAck>()
            .await
            .map_err(|e| ClientError::Decode(format!("submit response: {e}")))
    }
}

/// The `error` field of a JSON error body, or the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use cover_kv::{KVStore, RedbStore};

    use super::*;
    use crate::store::SubmissionStore;

    fn payload() -> SubmissionPayload {
        SubmissionPayload {
            name: "Asha".into(),
            age: 34,
            city: "Pune".into(),
            income: 500_000.0,
            dependents: 2,
            cover: 800_000,
            premium: 7_200,
        }
    }

    #[tokio::test]
    async fn submit_against_real_router() {
        let dir = tempfile::tempdir().unwrap();
        let kv: Arc<dyn KVStore> = Arc::new(RedbStore::open(&dir.path().join("c.redb")).unwrap());
        let store = Arc::new(SubmissionStore::new(kv));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = crate::api::router(Arc::clone(&store));
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = SubmitClient::new(format!("http://{addr}/"));
        let ack = client.submit(&payload()).await.unwrap();
        assert_eq!(ack.message, "Form saved successfully");
        assert_eq!(store.count().unwrap(), 1);
    }

    #[tokio::test]
    async fn submit_unreachable_server() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = SubmitClient::new(format!("http://{addr}"));
        let err = client.submit(&payload()).await.unwrap_err();
        assert!(matches!(err, ClientError::Network(_)));
    }

    #[test]
    fn error_message_prefers_error_field() {
        assert_eq!(
            error_message(r#"{"code":"STORAGE_ERROR","error":"Failed to save form data"}"#),
            "Failed to save form data"
        );
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
    }
}
