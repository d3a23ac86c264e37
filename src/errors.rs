use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Application-specific error types.
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// The submitted body is not a well-formed receipt.
    InvalidPayload(String),
    /// No receipt is stored under the requested id.
    NotFound(String),
}

impl fmt::Display for AppError {
    /// Formats the error for display.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidPayload(msg) => write!(f, "Invalid payload: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    /// Converts the error into an HTTP response.
    ///
    /// Maps each error variant to an appropriate HTTP status code and JSON body.
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::InvalidPayload(msg) => {
                tracing::warn!("Rejected receipt payload: {}", msg);
                (StatusCode::BAD_REQUEST, "Invalid JSON payload".to_string())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<serde_json::Error> for AppError {
    /// Converts a JSON decode failure into `InvalidPayload`.
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidPayload(err.to_string())
    }
}

/// Failure to read one receipt field during scoring.
///
/// Never surfaced to clients: the rule reading the field contributes nothing
/// (or falls back to its default) and scoring carries on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldParseError {
    /// A `total` or `price` value that is not a decimal number.
    Amount(String),
    /// A well-formed amount too large to represent (e.g. `"1e400"`).
    AmountOutOfRange(String),
    /// A purchase date with no parsable day segment.
    Day(String),
    /// A purchase time that is not `HH:MM` with a numeric hour.
    Hour(String),
}

impl fmt::Display for FieldParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldParseError::Amount(raw) => write!(f, "invalid amount {:?}", raw),
            FieldParseError::AmountOutOfRange(raw) => write!(f, "amount out of range {:?}", raw),
            FieldParseError::Day(raw) => write!(f, "invalid purchase date {:?}", raw),
            FieldParseError::Hour(raw) => write!(f, "invalid purchase time {:?}", raw),
        }
    }
}

impl std::error::Error for FieldParseError {}
