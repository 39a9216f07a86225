//! Error types and error handling for the application
//!
//! This module defines custom error types that can be converted to HTTP responses.
//! All errors implement `IntoResponse` to provide consistent error formatting.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error types
///
/// All errors that can occur in the application are represented by this enum.
/// Each variant implements automatic conversion to HTTP responses via `IntoResponse`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Listing with the given ID was not found
    #[error("Listing not found: {0}")]
    ListingNotFound(String),

    /// A required field is missing or invalid
    #[error("{0}")]
    Validation(String),

    /// The supplied edit token does not match the listing's token
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// An uploaded file violated the upload policy (MIME type, size, count)
    #[error("Upload rejected: {0}")]
    UploadRejected(String),

    /// The multipart request body could not be read
    #[error("Malformed multipart request: {0}")]
    BadMultipart(String),

    /// Internal server error (catch-all for unexpected errors)
    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::ListingNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::Forbidden(_) => (StatusCode::FORBIDDEN, self.to_string()),
            AppError::UploadRejected(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::BadMultipart(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = Json(json!({
            "message": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
