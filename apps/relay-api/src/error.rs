//! HTTP error mapping for the relay API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use bgi_notify::NotifyError;

/// Per-request fault surfaced at the HTTP boundary.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub NotifyError);

/// JSON error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status: u16,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self.0 {
            // The raw payload is logged so the gap can be diagnosed.
            NotifyError::ClassificationGap { payload } => {
                tracing::error!(
                    target: "relay",
                    payload = %payload,
                    "Notification matched no message branch"
                );
                (StatusCode::INTERNAL_SERVER_ERROR, "classification_gap")
            }
            NotifyError::AttachmentDecode(_) => (StatusCode::BAD_REQUEST, "invalid_screenshot"),
            NotifyError::SinkRequest(_) | NotifyError::SinkStatus { .. } => {
                (StatusCode::BAD_GATEWAY, "sink_forwarding_failed")
            }
            NotifyError::TokenStore(_) | NotifyError::Serialize(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        };

        tracing::error!(target: "relay", error = %self.0, error_type, "Request failed");

        let body = ErrorResponse {
            error: error_type.to_string(),
            message: self.0.to_string(),
            status: status.as_u16(),
        };

        (status, axum::Json(body)).into_response()
    }
}
