use axum::Json;
use chrono::{NaiveDate, NaiveTime};
use clinicare_core::{errors::ClinicError, models::availability::DoctorAvailabilityResponse};
use mockall::predicate;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use crate::test_utils::TestContext;
use clinicare_api::{
    handlers::availability::AvailabilityQuery,
    middleware::error_handling::AppError,
};

// Mirrors doctor_availability with the appointment store replaced by a mock
async fn doctor_availability_wrapper(
    ctx: &TestContext,
    doctor_id: Uuid,
    query: AvailabilityQuery,
) -> Result<Json<DoctorAvailabilityResponse>, AppError> {
    let (raw_date, date) = query.date()?;

    let booked = ctx.appointment_repo.get_booked_times(doctor_id, date).await?;

    Ok(Json(ctx.availability.compute(doctor_id, raw_date, booked)?))
}

fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

#[tokio::test]
async fn test_availability_excludes_booked_times() {
    let mut ctx = TestContext::new();
    let doctor_id = Uuid::new_v4();
    let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

    ctx.appointment_repo
        .expect_get_booked_times()
        .with(predicate::eq(doctor_id), predicate::eq(date))
        .times(1)
        .returning(|_, _| Ok(vec![at(9, 30), at(10, 0)]));

    let query = AvailabilityQuery {
        date: Some("2025-03-10".to_string()),
    };

    let Json(response) = doctor_availability_wrapper(&ctx, doctor_id, query)
        .await
        .unwrap();

    assert_eq!(response.doctor_id, doctor_id);
    assert_eq!(response.date, "2025-03-10");
    assert_eq!(response.available_slots.len(), 14);
    assert_eq!(
        response.available_slots[..3].to_vec(),
        vec!["09:00", "10:30", "11:00"]
    );
}

#[tokio::test]
async fn test_availability_unknown_doctor_gets_full_grid() {
    let mut ctx = TestContext::new();

    ctx.appointment_repo
        .expect_get_booked_times()
        .times(1)
        .returning(|_, _| Ok(Vec::new()));

    let query = AvailabilityQuery {
        date: Some("2025-03-11".to_string()),
    };

    let Json(response) = doctor_availability_wrapper(&ctx, Uuid::new_v4(), query)
        .await
        .unwrap();

    assert_eq!(response.available_slots.len(), 16);
    assert_eq!(response.available_slots.last().map(String::as_str), Some("16:30"));
}

#[tokio::test]
async fn test_availability_missing_date() {
    let mut ctx = TestContext::new();
    ctx.appointment_repo.expect_get_booked_times().times(0);

    let result =
        doctor_availability_wrapper(&ctx, Uuid::new_v4(), AvailabilityQuery::default()).await;

    match result {
        Err(err @ AppError(ClinicError::MissingParameter(_))) => {
            assert_eq!(err.0.to_string(), "Date parameter required");
            assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
        }
        other => panic!("Expected missing parameter error, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_availability_invalid_date_never_queries_store() {
    let mut ctx = TestContext::new();
    ctx.appointment_repo.expect_get_booked_times().times(0);

    let query = AvailabilityQuery {
        date: Some("2024-13-45".to_string()),
    };

    let result = doctor_availability_wrapper(&ctx, Uuid::new_v4(), query).await;

    assert!(matches!(
        result,
        Err(AppError(ClinicError::InvalidDateFormat(_)))
    ));
}

#[tokio::test]
async fn test_availability_store_failure() {
    let mut ctx = TestContext::new();

    ctx.appointment_repo
        .expect_get_booked_times()
        .returning(|_, _| Err(eyre::eyre!("connection refused")));

    let query = AvailabilityQuery {
        date: Some("2025-03-10".to_string()),
    };

    let result = doctor_availability_wrapper(&ctx, Uuid::new_v4(), query).await;

    let err = result.unwrap_err();
    assert_eq!(err.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
}
