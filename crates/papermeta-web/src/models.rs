use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::upload::UploadError;

// ── Response bodies ─────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ErrorJson {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthJson {
    pub status: &'static str,
}

// ── Handler errors ──────────────────────────────────────────────────────

/// Errors surfaced by `/analyze`.
#[derive(Debug)]
pub enum ApiError {
    /// Missing field, wrong extension or unreadable multipart body.
    Upload(UploadError),
    /// Document unreadable, temp-file I/O failure or extraction task panic.
    Extraction(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Upload(_) => StatusCode::BAD_REQUEST,
            ApiError::Extraction(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::Upload(e) => e.to_string(),
            ApiError::Extraction(msg) => msg.clone(),
        }
    }
}

impl From<UploadError> for ApiError {
    fn from(e: UploadError) -> Self {
        ApiError::Upload(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status(),
            Json(ErrorJson {
                error: self.message(),
            }),
        )
            .into_response()
    }
}
