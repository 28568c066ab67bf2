//! Response envelope.

use axum::{Json, http::StatusCode};
use serde::Serialize;

/// Successful response: `{status: "success", message, data}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Always `success`.
    pub status: &'static str,
    /// Human-readable summary.
    pub message: String,
    /// Report or record.
    pub data: T,
}

/// Failed response: `{status: "error", message, error}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Always `error`.
    pub status: &'static str,
    /// Short summary.
    pub message: &'static str,
    /// Underlying cause.
    pub error: String,
    /// Machine-readable error code.
    pub code: &'static str,
}

/// Wraps `data` in a 200 envelope.
pub fn success<T: Serialize>(message: &str, data: T) -> (StatusCode, Json<ApiResponse<T>>) {
    with_status(StatusCode::OK, message, data)
}

/// Wraps `data` in an envelope with an explicit status.
pub fn with_status<T: Serialize>(
    status: StatusCode,
    message: &str,
    data: T,
) -> (StatusCode, Json<ApiResponse<T>>) {
    (
        status,
        Json(ApiResponse {
            status: "success",
            message: message.to_string(),
            data,
        }),
    )
}
