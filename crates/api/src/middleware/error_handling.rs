//! # Error Handling Middleware
//!
//! Maps domain-specific errors to HTTP status codes and JSON error
//! responses, so every endpoint fails the same way. Storage and validation
//! failures surface to the client as non-fatal JSON errors; nothing here
//! mutates state.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cartent_core::errors::TentError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping.
///
/// `AppError` wraps domain-specific `TentError` instances and implements
/// `IntoResponse` to convert them into HTTP responses with appropriate
/// status codes and JSON payloads.
#[derive(Debug)]
pub struct AppError(pub TentError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map error types to HTTP status codes
        let status = match &self.0 {
            TentError::NotFound(_) => StatusCode::NOT_FOUND,
            TentError::Validation(_) => StatusCode::BAD_REQUEST,
            TentError::InvalidDate(_) => StatusCode::BAD_REQUEST,
            TentError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            TentError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Get the error message and format as JSON
        let message = self.0.to_string();
        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

/// Allows using `?` with functions that return `Result<T, TentError>` in
/// handlers returning `Result<T, AppError>`.
impl From<TentError> for AppError {
    fn from(err: TentError) -> Self {
        AppError(err)
    }
}

/// Wraps repository-level `eyre::Report` failures as database errors.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(TentError::Database(err))
    }
}
