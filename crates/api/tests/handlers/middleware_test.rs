use axum::{body::to_bytes, http::StatusCode};
use chrono::{Duration, NaiveTime};
use clinicare_api::{
    config::{parse_log_level, parse_working_window},
    middleware::{auth, error_handling::map_error},
};
use clinicare_core::{errors::ClinicError, models::{auth::TokenType, user::Role}};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::Value;
use tracing::Level;
use uuid::Uuid;

use crate::test_utils::test_tokens;

#[rstest]
#[case(ClinicError::NotFound("Patient not found".into()), StatusCode::NOT_FOUND)]
#[case(ClinicError::Validation("Invalid input".into()), StatusCode::BAD_REQUEST)]
#[case(ClinicError::MissingParameter("Date".into()), StatusCode::BAD_REQUEST)]
#[case(ClinicError::InvalidDateFormat("2024-13-45".into()), StatusCode::BAD_REQUEST)]
#[case(ClinicError::Authentication("Invalid password".into()), StatusCode::UNAUTHORIZED)]
#[case(ClinicError::Authorization("Not authorized".into()), StatusCode::FORBIDDEN)]
#[case(ClinicError::Conflict("Email taken".into()), StatusCode::CONFLICT)]
#[case(ClinicError::Database(eyre::eyre!("Database error")), StatusCode::INTERNAL_SERVER_ERROR)]
#[tokio::test]
async fn test_error_status_mapping(#[case] error: ClinicError, #[case] expected: StatusCode) {
    let response = map_error(error);

    assert_eq!(response.status(), expected);
}

#[tokio::test]
async fn test_client_error_body_carries_message() {
    let response = map_error(ClinicError::InvalidDateFormat("tomorrow".into()));

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(
        body["error"],
        "Invalid date format. Use YYYY-MM-DD"
    );
}

#[tokio::test]
async fn test_server_error_body_hides_detail() {
    let response = map_error(ClinicError::Internal(Box::new(std::io::Error::new(
        std::io::ErrorKind::Other,
        "disk on fire",
    ))));
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(body["error"], "Internal server error");
}

#[test]
fn test_hash_password() {
    let password = "test_password";
    let hashed = auth::hash_password(password).unwrap();

    assert_ne!(hashed, password);
    assert!(hashed.starts_with("$argon2"));

    // Salted: the same password never hashes the same way twice
    assert_ne!(auth::hash_password(password).unwrap(), hashed);
}

#[test]
fn test_verify_password() {
    let hashed = auth::hash_password("test_password").unwrap();

    assert!(auth::verify_password(&hashed, "test_password").unwrap());
    assert!(!auth::verify_password(&hashed, "wrong_password").unwrap());
    assert!(auth::verify_password("not-a-phc-string", "test_password").is_err());
}

#[test]
fn test_token_round_trip() {
    let tokens = test_tokens();
    let user_id = Uuid::new_v4();

    let token = tokens
        .issue(user_id, "doctor@clinic.org", Role::Doctor, TokenType::Access)
        .unwrap();
    let claims = tokens.validate(&token, TokenType::Access).unwrap();

    assert_eq!(claims.sub, user_id);
    assert_eq!(claims.email, "doctor@clinic.org");
    assert_eq!(claims.role, Role::Doctor);
    assert_eq!(claims.exp - claims.iat, 5 * 60);
}

#[test]
fn test_token_type_is_enforced() {
    let tokens = test_tokens();

    let refresh = tokens
        .issue(Uuid::new_v4(), "admin@clinic.org", Role::Admin, TokenType::Refresh)
        .unwrap();

    assert!(matches!(
        tokens.validate(&refresh, TokenType::Access),
        Err(ClinicError::Authentication(_))
    ));
    assert!(tokens.validate(&refresh, TokenType::Refresh).is_ok());
}

#[test]
fn test_token_signed_with_other_secret_is_rejected() {
    let other = auth::TokenSettings::new("another-secret", Duration::minutes(5), Duration::hours(1));
    let token = other
        .issue(Uuid::new_v4(), "admin@clinic.org", Role::Admin, TokenType::Access)
        .unwrap();

    match test_tokens().validate(&token, TokenType::Access) {
        Err(ClinicError::Authentication(msg)) => assert_eq!(msg, "Invalid or expired token"),
        other => panic!("Expected authentication error, got {:?}", other),
    }
}

#[test]
fn test_expired_token_is_rejected() {
    let expired = auth::TokenSettings::new(
        crate::test_utils::TEST_SECRET,
        Duration::minutes(-10),
        Duration::minutes(-10),
    );
    let token = expired
        .issue(Uuid::new_v4(), "admin@clinic.org", Role::Admin, TokenType::Access)
        .unwrap();

    assert!(test_tokens().validate(&token, TokenType::Access).is_err());
}

#[test]
fn test_parse_working_window() {
    let window = parse_working_window("08:00", "12:00:00", " 20 ").unwrap();

    assert_eq!(window.start(), NaiveTime::from_hms_opt(8, 0, 0).unwrap());
    assert_eq!(window.end(), NaiveTime::from_hms_opt(12, 0, 0).unwrap());
    assert_eq!(window.grid().len(), 12);
}

#[rstest]
#[case("8am", "17:00", "30")]
#[case("09:00", "17:00", "half an hour")]
#[case("17:00", "09:00", "30")]
#[case("09:00", "17:00", "0")]
fn test_parse_working_window_rejects(#[case] start: &str, #[case] end: &str, #[case] slot: &str) {
    assert!(parse_working_window(start, end, slot).is_err());
}

#[rstest]
#[case("trace", Level::TRACE)]
#[case("DEBUG", Level::DEBUG)]
#[case("warn", Level::WARN)]
#[case("error", Level::ERROR)]
#[case("info", Level::INFO)]
#[case("", Level::INFO)]
#[case("verbose", Level::INFO)]
fn test_parse_log_level(#[case] value: &str, #[case] expected: Level) {
    assert_eq!(parse_log_level(value), expected);
}
