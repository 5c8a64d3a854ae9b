//! # Error Handling Middleware
//!
//! This module provides a standardized way to handle errors in the RoomSync API.
//! It maps domain-specific errors to appropriate HTTP status codes and JSON
//! error responses, ensuring a consistent error handling experience across
//! the entire API.
//!
//! The implementation is based on Axum's error handling mechanisms and integrates
//! with RoomSync's custom error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use roomsync_core::errors::BookingError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps domain-specific `BookingError` instances and implements
/// `IntoResponse` to convert them into HTTP responses with appropriate
/// status codes and JSON payloads.
///
/// # Example
///
/// ```
/// use axum::Json;
/// use roomsync_api::middleware::error_handling::AppError;
/// use roomsync_core::errors::BookingError;
/// use uuid::Uuid;
///
/// // Type definitions to make the example compile
/// struct SlotResponse {}
/// struct Repository {}
///
/// impl Repository {
///     async fn get_slot(&self, _id: Uuid) -> Result<SlotResponse, String> {
///         Ok(SlotResponse {})
///     }
/// }
///
/// async fn handler(id: Uuid) -> Result<Json<SlotResponse>, AppError> {
///     let repository = Repository {};
///     let slot = repository.get_slot(id)
///         .await
///         .map_err(|e| AppError(BookingError::NotFound(e.to_string())))?;
///
///     Ok(Json(slot))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub BookingError);

/// Converts application errors to HTTP responses
///
/// This implementation maps each error type to the appropriate HTTP status code
/// and formats the error message into a JSON response body.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map error types to HTTP status codes
        let status = match &self.0 {
            BookingError::NotFound(_) => StatusCode::NOT_FOUND,
            BookingError::Validation(_) => StatusCode::BAD_REQUEST,
            BookingError::Conflict(_) => StatusCode::CONFLICT,
            BookingError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BookingError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Get the error message and format as JSON
        let message = self.0.to_string();
        let body = Json(json!({ "error": message }));

        // Combine status code and JSON body into a response
        (status, body).into_response()
    }
}

/// Automatic conversion from BookingError to AppError
///
/// This implementation allows using `?` operator with functions that return
/// `Result<T, BookingError>` in handler functions that return `Result<T, AppError>`.
impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError(err)
    }
}

/// Automatic conversion from eyre::Report to AppError
///
/// This implementation allows using `?` operator with functions that return
/// `Result<T, eyre::Report>` in handler functions that return `Result<T, AppError>`.
/// It wraps the eyre error in a BookingError::Database variant.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(BookingError::Database(err))
    }
}

/// Maps a BookingError to an HTTP response
///
/// # Example
///
/// ```ignore
/// match result {
///     Ok(slot) => (StatusCode::OK, Json(slot)).into_response(),
///     Err(err) => map_error(BookingError::NotFound(err.to_string())),
/// }
/// ```
pub fn map_error(err: BookingError) -> Response {
    AppError(err).into_response()
}
