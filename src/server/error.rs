use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{error, warn};
use serde_json::json;

use crate::error::RelayError;

/// Everything a handler can fail with, rendered as `{"detail": ...}`
#[derive(Debug)]
pub enum ApiError {
    Relay(RelayError),
    /// The multipart body could not be read (malformed or too large)
    Upload(MultipartError),
}

impl From<RelayError> for ApiError {
    fn from(error: RelayError) -> Self {
        ApiError::Relay(error)
    }
}

impl From<MultipartError> for ApiError {
    fn from(error: MultipartError) -> Self {
        ApiError::Upload(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::Relay(error) => {
                let status = StatusCode::from_u16(error.status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, error.to_string())
            }
            ApiError::Upload(error) => (error.status(), error.body_text()),
        };

        if status.is_server_error() {
            error!("Request failed with {}: {}", status, detail);
        } else {
            warn!("Request rejected with {}: {}", status, detail);
        }

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
