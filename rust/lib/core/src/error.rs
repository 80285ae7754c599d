use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Error returned by service handlers.
///
/// Rendered as `{"code": "STORAGE_ERROR", "error": "Failed to save form data"}`.
/// Clients match on `code`. The message goes out verbatim, so a handler that
/// must hide a driver error logs it and returns its own text instead.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The body could not be read or cast to the stored shape. A persistence
    /// failure like any other, so it is a 500 with its own code.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Storage(String),

    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    pub const VALIDATION_FAILED: &'static str = "VALIDATION_FAILED";
    pub const STORAGE_ERROR: &'static str = "STORAGE_ERROR";
    pub const INTERNAL: &'static str = "INTERNAL";

    fn parts(&self) -> (StatusCode, &'static str) {
        match self {
            ServiceError::Validation(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, Self::VALIDATION_FAILED)
            }
            ServiceError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, Self::STORAGE_ERROR),
            ServiceError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, Self::INTERNAL),
        }
    }

    pub fn error_code(&self) -> &'static str {
        self.parts().1
    }

    pub fn status_code(&self) -> StatusCode {
        self.parts().0
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, code) = self.parts();
        let body = serde_json::json!({
            "code": code,
            "error": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cast_errors_are_persistence_failures() {
        let err = ServiceError::Validation("age: expected a number".into());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "VALIDATION_FAILED");
        assert_eq!(err.to_string(), "age: expected a number");
    }

    #[test]
    fn backend_errors_are_server_errors() {
        for err in [
            ServiceError::Storage("disk full".into()),
            ServiceError::Internal("bad json".into()),
        ] {
            assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        }
        assert_eq!(ServiceError::Storage(String::new()).error_code(), "STORAGE_ERROR");
        assert_eq!(ServiceError::Internal(String::new()).error_code(), "INTERNAL");
    }

    #[tokio::test]
    async fn renders_code_and_message() {
        let resp = ServiceError::Storage("Failed to save form data".into()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"code": "STORAGE_ERROR", "error": "Failed to save form data"})
        );
    }
}
