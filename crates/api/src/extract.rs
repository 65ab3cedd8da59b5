//! Extractors whose rejections use the API's JSON error body.

use axum::extract::{FromRequestParts, rejection::{PathRejection, QueryRejection}};
use clinicare_core::errors::ClinicError;

use crate::middleware::error_handling::AppError;

/// `axum::extract::Path`, rejecting with `{"error": ...}` on a bad segment
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct Path<T>(pub T);

/// `axum::extract::Query`, rejecting with `{"error": ...}` on a bad query string
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct Query<T>(pub T);

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError(ClinicError::Validation(rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError(ClinicError::Validation(rejection.body_text()))
    }
}
