//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// This enum represents all possible errors that can occur in the application.
/// Each variant maps to a specific HTTP status code and error message.
///
/// # Error Categories
///
/// - **Database Errors**: Any sqlx::Error from database operations
/// - **Resource Errors**: Appointment not found for the caller's tenant
/// - **Access Errors**: Missing or expired live-access token
/// - **Validation Errors**: Unknown status value, bad query parameters
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed (e.g., connection error, query error).
    ///
    /// This wraps any sqlx::Error using the `#[from]` attribute, which
    /// automatically implements `From<sqlx::Error> for AppError`.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested status is not one of the known workflow statuses.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("Unknown status: {0}")]
    InvalidStatus(String),

    /// Request body or parameters are invalid.
    ///
    /// Returns HTTP 400 Bad Request.
    /// The String contains details about what was invalid.
    #[error("Invalid request")]
    InvalidRequest(String),

    /// Requested appointment does not exist or doesn't belong to the caller's tenant.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Appointment not found")]
    AppointmentNotFound,

    /// Live-access token is missing, unknown, or expired.
    ///
    /// Returns HTTP 403 Forbidden. Unknown and expired tokens produce the
    /// exact same response so a caller cannot probe whether a token ever
    /// existed.
    #[error("Live session unavailable")]
    LiveSessionForbidden,
}

/// Convert AppError into an HTTP response.
///
/// This implementation allows Axum handlers to return `Result<T, AppError>`
/// and have errors automatically converted to proper HTTP responses.
///
/// # Response Format
///
/// All errors return JSON in this format:
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
///
/// # Status Code Mapping
///
/// - `InvalidStatus` → 400 Bad Request
/// - `InvalidRequest` → 400 Bad Request
/// - `AppointmentNotFound` → 404 Not Found
/// - `LiveSessionForbidden` → 403 Forbidden
/// - `Database` → 500 Internal Server Error (hides details from client)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map each error variant to (HTTP status, error code, message)
        let (status, code, message) = match self {
            AppError::InvalidStatus(_) => {
                (StatusCode::BAD_REQUEST, "invalid_status", self.to_string())
            }
            AppError::InvalidRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", msg.clone())
            }
            AppError::AppointmentNotFound => (
                StatusCode::NOT_FOUND,
                "appointment_not_found",
                self.to_string(),
            ),
            AppError::LiveSessionForbidden => {
                (StatusCode::FORBIDDEN, "forbidden", self.to_string())
            }
            AppError::Database(ref e) => {
                // Log the real cause server-side, return a generic message
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        // Build JSON response body
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        // Return the response with status code and JSON body
        (status, body).into_response()
    }
}
