//! HTTP error mapping.
//!
//! Every error leaves the process as `{"error": {"message": "..."}}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use noteful_core::ValidationError;

/// Message sent for any failure the client cannot act on.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug)]
pub enum ApiError {
    /// Store or other unexpected failure. Details are logged, never sent.
    Internal(noteful_core::Error),
    Unauthorized(String),
    NotFound(String),
    BadRequest(String),
    /// Framework rejection that already carries its own status.
    Rejection { status: StatusCode, message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Rejection { status, .. } => *status,
        }
    }
}

impl From<noteful_core::Error> for ApiError {
    fn from(err: noteful_core::Error) -> Self {
        match err {
            noteful_core::Error::NotFound(msg) => ApiError::NotFound(msg),
            noteful_core::Error::Validation(err) => ApiError::BadRequest(err.to_string()),
            other => ApiError::Internal(other),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::Internal(err) => {
                tracing::error!(error = %err, "Request failed");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            ApiError::Unauthorized(msg)
            | ApiError::NotFound(msg)
            | ApiError::BadRequest(msg)
            | ApiError::Rejection { message: msg, .. } => msg,
        };

        let body = Json(serde_json::json!({
            "error": { "message": message },
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let (status, body) = body_of(ApiError::NotFound("Note doesn't exist".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            serde_json::json!({"error": {"message": "Note doesn't exist"}})
        );
    }

    #[tokio::test]
    async fn test_internal_hides_details() {
        let err: ApiError =
            noteful_core::Error::Internal("connection reset by peer".into()).into();
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["message"], INTERNAL_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn test_validation_maps_to_bad_request() {
        let err: ApiError = ValidationError::MissingField("title").into();
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Missing 'title' in request body");

        let err: ApiError =
            noteful_core::Error::from(ValidationError::MissingField("content")).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_core_not_found_maps_to_404() {
        let err: ApiError = noteful_core::Error::NotFound("Folder doesn't exist".into()).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_rejection_keeps_status() {
        let err = ApiError::Rejection {
            status: StatusCode::PAYLOAD_TOO_LARGE,
            message: "too big".into(),
        };
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
