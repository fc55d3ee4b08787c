//! HTTP error mapping
//!
//! Converts core errors into JSON error responses with a matching
//! status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::core::error::QuarryError;

/// HTTP status code for a core error
pub fn status_code(err: &QuarryError) -> StatusCode {
    match err {
        QuarryError::DocumentNotFound(_) => StatusCode::NOT_FOUND,
        QuarryError::InvalidQuery(_) | QuarryError::InvalidId(_) => StatusCode::BAD_REQUEST,
        QuarryError::UpstreamFailed(_) => StatusCode::BAD_GATEWAY,
        QuarryError::Unsupported(_) => StatusCode::NOT_IMPLEMENTED,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for QuarryError {
    fn into_response(self) -> Response {
        let status = status_code(&self);
        if status.is_server_error() {
            tracing::error!("Request error: {}", self);
        }

        let body = Json(json!({
            "error": self.message(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
