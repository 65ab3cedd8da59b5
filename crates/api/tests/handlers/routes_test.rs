use axum::http::{HeaderName, HeaderValue, StatusCode, header::AUTHORIZATION};
use axum_test::TestServer;
use clinicare_api::build_router;
use clinicare_core::models::{auth::TokenType, user::Role};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::test_utils::{bearer, build_state};

fn server() -> TestServer {
    TestServer::new(build_router(build_state())).unwrap()
}

fn auth_header(user_id: Uuid, role: Role, token_type: TokenType) -> (HeaderName, HeaderValue) {
    let value = HeaderValue::from_str(&bearer(user_id, role, token_type)).unwrap();
    (AUTHORIZATION, value)
}

#[tokio::test]
async fn test_health_check() {
    let server = server();
    let response = server.get("/health").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_version() {
    let server = server();
    let response = server.get("/version").await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["version"],
        env!("CARGO_PKG_VERSION")
    );
}

#[tokio::test]
async fn test_modules_are_public() {
    let server = server();
    let response = server.get("/api/modules").await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({ "modules": ["Patients", "Appointments", "Inventory", "Reports", "Prescriptions"] })
    );
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let server = server();

    for path in [
        "/api/users",
        "/api/patients",
        "/api/appointments",
        "/api/inventory",
        "/api/prescriptions",
        "/api/reports/users",
        "/api/doctors/6f1c1c1e-3a4b-4f7e-9a2d-0c5e8b7d9f10/availability?date=2025-03-10",
    ] {
        let response = server.get(path).await;

        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED, "{}", path);
        assert_eq!(
            response.json::<Value>()["error"],
            "Authentication error: Authentication credentials were not provided"
        );
    }
}

#[tokio::test]
async fn test_refresh_token_cannot_authenticate() {
    let (name, value) = auth_header(Uuid::new_v4(), Role::Admin, TokenType::Refresh);

    let server = server();
    let response = server.get("/api/patients").add_header(name, value).await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_malformed_authorization_header() {
    let server = server();
    let response = server
        .get("/api/patients")
        .add_header(AUTHORIZATION, HeaderValue::from_static("Token abc"))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_availability_requires_date() {
    let (name, value) = auth_header(Uuid::new_v4(), Role::Staff, TokenType::Access);
    let doctor_id = Uuid::new_v4();

    let server = server();
    let response = server
        .get(&format!("/api/doctors/{}/availability", doctor_id))
        .add_header(name, value)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "Date parameter required"
    );
}

#[tokio::test]
async fn test_availability_rejects_invalid_date() {
    let (name, value) = auth_header(Uuid::new_v4(), Role::Staff, TokenType::Access);
    let doctor_id = Uuid::new_v4();

    let server = server();
    let response = server
        .get(&format!("/api/doctors/{}/availability?date=2024-13-45", doctor_id))
        .add_header(name, value)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "Invalid date format. Use YYYY-MM-DD"
    );
}

#[tokio::test]
async fn test_malformed_id_gets_json_error() {
    let (name, value) = auth_header(Uuid::new_v4(), Role::Staff, TokenType::Access);

    let server = server();
    for path in [
        "/api/doctors/not-a-uuid/availability?date=2025-03-10",
        "/api/users/not-a-uuid",
        "/api/patients/42",
    ] {
        let response = server.get(path).add_header(name.clone(), value.clone()).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json::<Value>();
        let message = body["error"].as_str().unwrap_or_default();
        assert!(
            message.starts_with("Validation error: "),
            "{} returned {}",
            path,
            body
        );
    }
}

#[tokio::test]
async fn test_user_management_is_admin_only() {
    let (name, value) = auth_header(Uuid::new_v4(), Role::Nurse, TokenType::Access);

    let server = server();
    let response = server
        .post("/api/users")
        .add_header(name, value)
        .json(&json!({ "email": "new@clinic.org", "password": "pw" }))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_cannot_delete_self() {
    let admin_id = Uuid::new_v4();
    let (name, value) = auth_header(admin_id, Role::Admin, TokenType::Access);

    let server = server();
    let response = server
        .delete(&format!("/api/users/{}", admin_id))
        .add_header(name, value)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_appointment_requires_fields() {
    let (name, value) = auth_header(Uuid::new_v4(), Role::Staff, TokenType::Access);

    let server = server();
    let response = server
        .post("/api/appointments")
        .add_header(name, value)
        .json(&json!({ "date": "2025-03-10" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "Validation error: Missing required fields: patient_id, date and time are required"
    );
}

#[tokio::test]
async fn test_refresh_endpoint_rejects_access_token() {
    let token = crate::test_utils::test_tokens()
        .issue(Uuid::new_v4(), "staff@clinic.org", Role::Staff, TokenType::Access)
        .unwrap();

    let server = server();
    let response = server
        .post("/api/token/refresh")
        .json(&json!({ "refresh": token }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}
