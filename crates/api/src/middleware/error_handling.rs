//! # Error Handling Middleware
//!
//! This module maps domain errors to HTTP status codes and JSON error
//! bodies so every endpoint fails the same way:
//!
//! | Error                                             | Status |
//! |---------------------------------------------------|--------|
//! | `NotFound`                                        | 404    |
//! | `Validation`, `InvalidTimeFormat`, `InvalidRange` | 400    |
//! | `Persistence`, `Internal`                         | 500    |
//!
//! The body is always `{"error": "<message>"}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    BoxError, Json,
};
use clinicdesk_core::errors::TimeError;
use serde_json::json;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use clinicdesk_api::middleware::error_handling::AppError;
/// use clinicdesk_core::time::{parse_time, TimeOfDay};
///
/// async fn handler(raw: String) -> Result<Json<TimeOfDay>, AppError> {
///     let time = parse_time(&raw)?;
///     Ok(Json(time))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub TimeError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            TimeError::NotFound(_) => StatusCode::NOT_FOUND,
            TimeError::Validation(_)
            | TimeError::InvalidTimeFormat(_)
            | TimeError::InvalidRange { .. } => StatusCode::BAD_REQUEST,
            TimeError::Persistence(_) | TimeError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {:?}", self.0);
        }

        let body = Json(json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

/// Allows `?` on `TimeResult` inside handlers
impl From<TimeError> for AppError {
    fn from(err: TimeError) -> Self {
        AppError(err)
    }
}

/// Store failures arrive as `eyre::Report` and become persistence errors
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(TimeError::Persistence(err))
    }
}

/// Maps a TimeError to an HTTP response
pub fn map_error(err: TimeError) -> Response {
    AppError(err).into_response()
}

/// Turns a failure of the timeout layer into a JSON response
pub async fn handle_timeout_error(err: BoxError) -> Response {
    if err.is::<tower::timeout::error::Elapsed>() {
        (
            StatusCode::REQUEST_TIMEOUT,
            Json(json!({ "error": "Request timed out" })),
        )
            .into_response()
    } else {
        map_error(TimeError::Internal(err))
    }
}
