//! # Error Handling Middleware
//!
//! This module provides a standardized way to handle errors in the Clinicare API.
//! It maps domain-specific errors to appropriate HTTP status codes and JSON
//! error responses of the form `{ "error": "<message>" }`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use clinicare_core::errors::ClinicError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps domain-specific `ClinicError` instances and implements
/// `IntoResponse` to convert them into HTTP responses with appropriate
/// status codes and JSON payloads.
///
/// # Example
///
/// ```
/// use axum::Json;
/// use clinicare_api::middleware::error_handling::AppError;
/// use clinicare_core::{availability::parse_date, errors::ClinicError};
///
/// async fn handler(date: String) -> Result<Json<String>, AppError> {
///     let date = parse_date(&date)?;
///     if date.format("%u").to_string() == "7" {
///         return Err(AppError(ClinicError::Validation("Clinic is closed on Sundays".into())));
///     }
///     Ok(Json(date.to_string()))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub ClinicError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ClinicError::NotFound(_) => StatusCode::NOT_FOUND,
            ClinicError::Validation(_) => StatusCode::BAD_REQUEST,
            ClinicError::MissingParameter(_) => StatusCode::BAD_REQUEST,
            ClinicError::InvalidDateFormat(_) => StatusCode::BAD_REQUEST,
            ClinicError::Authentication(_) => StatusCode::UNAUTHORIZED,
            ClinicError::Authorization(_) => StatusCode::FORBIDDEN,
            ClinicError::Conflict(_) => StatusCode::CONFLICT,
            ClinicError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ClinicError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Server-side failures keep their detail in the log, not the response
        let message = if status.is_server_error() {
            tracing::error!("{}: {:?}", status, self.0);
            "Internal server error".to_string()
        } else {
            tracing::debug!("{}: {}", status, self.0);
            self.0.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Automatic conversion from ClinicError to AppError
impl From<ClinicError> for AppError {
    fn from(err: ClinicError) -> Self {
        AppError(err)
    }
}

/// Automatic conversion from eyre::Report to AppError
///
/// Repository functions return `eyre::Result`, so their failures surface as
/// `ClinicError::Database`.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(ClinicError::Database(err))
    }
}

/// Maps a ClinicError to an HTTP response
pub fn map_error(err: ClinicError) -> Response {
    AppError(err).into_response()
}
