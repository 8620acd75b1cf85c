//! Server error types.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rpc_protocol::{error_codes, ErrorBody, ValidationErrors};

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Invalid request parameters.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The body is not JSON of the expected shape.
    #[error("Malformed body: {0}")]
    MalformedBody(#[from] JsonRejection),

    /// Field validation failed.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A third-party integration is missing its configuration.
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] library_store::LibraryStoreError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ServerError::InvalidRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody::new(error_codes::INVALID_REQUEST, msg),
            ),
            // Keep axum's status: 400 for bad syntax, 415 for a wrong content
            // type, 422 for missing or mistyped fields.
            ServerError::MalformedBody(rejection) => (
                rejection.status(),
                ErrorBody::new(error_codes::INVALID_REQUEST, rejection.body_text()),
            ),
            ServerError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorBody::new(error_codes::VALIDATION_FAILED, "Invalid request")
                    .with_fields(errors.into_fields()),
            ),
            ServerError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody::new(error_codes::RESOURCE_NOT_FOUND, msg),
            ),
            ServerError::NotConfigured(what) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorBody::new(error_codes::NOT_CONFIGURED, format!("{} is not configured", what)),
            ),
            ServerError::Database(e) if e.is_already_exists() => (
                StatusCode::CONFLICT,
                ErrorBody::new(error_codes::ALREADY_EXISTS, "Resource already exists"),
            ),
            ServerError::Database(e) => {
                // Storage details stay in the log.
                tracing::error!(error = %e, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new(error_codes::INTERNAL_ERROR, "Internal server error"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use library_store::LibraryStoreError;
    use serde_json::Value;

    use super::*;

    async fn render(err: ServerError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_store_conflict_is_409() {
        let err = LibraryStoreError::already_exists("Book", "42");

        let (status, body) = render(err.into()).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "ALREADY_EXISTS");
    }

    #[tokio::test]
    async fn test_store_failure_hides_details() {
        let err = LibraryStoreError::Other("disk I/O error at /var/lib/library.db".to_string());

        let (status, body) = render(err.into()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
        assert!(!body.to_string().contains("disk"));
    }
}
