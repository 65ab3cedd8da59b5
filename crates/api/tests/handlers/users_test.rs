use axum::http::StatusCode;
use clinicare_api::{handlers::users::map_user_write_error, middleware::error_handling::AppError};
use clinicare_core::errors::ClinicError;
use pretty_assertions::assert_eq;
use sqlx::error::{DatabaseError, ErrorKind};
use std::{borrow::Cow, fmt};

#[derive(Debug)]
struct DuplicateEmail;

impl fmt::Display for DuplicateEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("duplicate key value violates unique constraint \"users_email_key\"")
    }
}

impl std::error::Error for DuplicateEmail {}

impl DatabaseError for DuplicateEmail {
    fn message(&self) -> &str {
        "duplicate key value violates unique constraint \"users_email_key\""
    }

    fn code(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed("23505"))
    }

    fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
        self
    }

    fn kind(&self) -> ErrorKind {
        ErrorKind::UniqueViolation
    }
}

// Two admins creating the same email at once: the second insert loses at the constraint.
#[test]
fn test_concurrent_duplicate_email_is_conflict() {
    let err = eyre::Report::new(sqlx::Error::Database(Box::new(DuplicateEmail)));

    let mapped = AppError(map_user_write_error("dup@clinic.org", err));

    assert!(matches!(mapped.0, ClinicError::Conflict(_)));
    assert_eq!(mapped.status(), StatusCode::CONFLICT);
    assert_eq!(
        mapped.0.to_string(),
        "Conflict: A user with email dup@clinic.org already exists"
    );
}

#[test]
fn test_other_write_failures_stay_database_errors() {
    let err = eyre::Report::new(sqlx::Error::PoolTimedOut);

    let mapped = AppError(map_user_write_error("dup@clinic.org", err));

    assert!(matches!(mapped.0, ClinicError::Database(_)));
    assert_eq!(mapped.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
