use axum::{Json, http::StatusCode};
use clinicare_core::{
    errors::ClinicError,
    models::{
        appointment::{Appointment, AppointmentStatus, CreateAppointmentRequest, NewAppointment},
        user::Role,
    },
};
use clinicare_db::models::DbAppointment;
use mockall::predicate;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use crate::test_utils::{TestContext, db_patient, db_user};
use clinicare_api::{
    handlers::{patients::check_patient, users::check_doctor},
    middleware::error_handling::AppError,
};

// Mirrors create_appointment with every store call going through the mocks
async fn create_appointment_wrapper(
    ctx: &TestContext,
    payload: CreateAppointmentRequest,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    let appointment = payload.validate()?;

    let patient = ctx.patient_repo.get_patient_by_id(appointment.patient_id).await?;
    check_patient(appointment.patient_id, patient)?;

    if let Some(doctor_id) = appointment.doctor_id {
        let doctor = ctx.user_repo.get_user_by_id(doctor_id).await?;
        check_doctor(doctor_id, doctor)?;
    }

    let created = ctx.appointment_repo.create_appointment(appointment).await?;

    Ok((StatusCode::CREATED, Json(Appointment::try_from(created)?)))
}

fn stored(appointment: &NewAppointment, patient_name: &str, doctor_email: Option<&str>) -> DbAppointment {
    DbAppointment {
        id: Uuid::new_v4(),
        patient_id: appointment.patient_id,
        patient_name: patient_name.to_string(),
        doctor_id: appointment.doctor_id,
        doctor_email: doctor_email.map(String::from),
        date: appointment.date,
        time: appointment.time,
        notes: appointment.notes.clone(),
        status: appointment.status.to_string(),
    }
}

fn request(patient_id: Uuid, doctor_id: Option<Uuid>) -> CreateAppointmentRequest {
    CreateAppointmentRequest {
        patient_id: Some(patient_id),
        doctor_id,
        date: Some("2025-03-10".to_string()),
        time: Some("09:30".to_string()),
        notes: Some("Annual check-up".to_string()),
        status: None,
    }
}

#[tokio::test]
async fn test_create_appointment_with_doctor() {
    let mut ctx = TestContext::new();
    let patient_id = Uuid::new_v4();
    let doctor = db_user(Role::Doctor, "pw");
    let doctor_id = doctor.id;

    ctx.patient_repo
        .expect_get_patient_by_id()
        .with(predicate::eq(patient_id))
        .times(1)
        .returning(move |id| Ok(Some(db_patient(id, "Ada Lovelace"))));

    ctx.user_repo
        .expect_get_user_by_id()
        .with(predicate::eq(doctor_id))
        .times(1)
        .returning(move |_| Ok(Some(doctor.clone())));

    ctx.appointment_repo
        .expect_create_appointment()
        .withf(move |appointment| {
            appointment.patient_id == patient_id
                && appointment.doctor_id == Some(doctor_id)
                && appointment.status == AppointmentStatus::Scheduled
        })
        .times(1)
        .returning(|appointment| Ok(stored(&appointment, "Ada Lovelace", Some("doctor@clinic.org"))));

    let (status, Json(appointment)) =
        create_appointment_wrapper(&ctx, request(patient_id, Some(doctor_id)))
            .await
            .unwrap();

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(appointment.patient_name, "Ada Lovelace");
    assert_eq!(appointment.doctor_name.as_deref(), Some("doctor@clinic.org"));
    assert_eq!(appointment.time.to_string(), "09:30:00");
}

#[tokio::test]
async fn test_create_appointment_without_doctor() {
    let mut ctx = TestContext::new();
    let patient_id = Uuid::new_v4();

    ctx.patient_repo
        .expect_get_patient_by_id()
        .returning(move |id| Ok(Some(db_patient(id, "Grace Hopper"))));
    ctx.user_repo.expect_get_user_by_id().times(0);
    ctx.appointment_repo
        .expect_create_appointment()
        .times(1)
        .returning(|appointment| Ok(stored(&appointment, "Grace Hopper", None)));

    let (_, Json(appointment)) = create_appointment_wrapper(&ctx, request(patient_id, None))
        .await
        .unwrap();

    assert_eq!(appointment.doctor_id, None);
    assert_eq!(appointment.doctor_name, None);
}

#[tokio::test]
async fn test_create_appointment_unknown_patient() {
    let mut ctx = TestContext::new();

    ctx.patient_repo
        .expect_get_patient_by_id()
        .returning(|_| Ok(None));
    ctx.appointment_repo.expect_create_appointment().times(0);

    let result = create_appointment_wrapper(&ctx, request(Uuid::new_v4(), None)).await;

    let err = result.unwrap_err();
    assert!(matches!(err.0, ClinicError::NotFound(_)));
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_appointment_rejects_non_doctor() {
    let mut ctx = TestContext::new();
    let nurse = db_user(Role::Nurse, "pw");
    let nurse_id = nurse.id;

    ctx.patient_repo
        .expect_get_patient_by_id()
        .returning(move |id| Ok(Some(db_patient(id, "Ada Lovelace"))));
    ctx.user_repo
        .expect_get_user_by_id()
        .returning(move |_| Ok(Some(nurse.clone())));
    ctx.appointment_repo.expect_create_appointment().times(0);

    let result = create_appointment_wrapper(&ctx, request(Uuid::new_v4(), Some(nurse_id))).await;

    match result {
        Err(AppError(ClinicError::Validation(msg))) => {
            assert_eq!(msg, "User nurse@clinic.org is not a doctor")
        }
        other => panic!("Expected validation error, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_create_appointment_missing_fields_touch_nothing() {
    let mut ctx = TestContext::new();
    ctx.patient_repo.expect_get_patient_by_id().times(0);
    ctx.appointment_repo.expect_create_appointment().times(0);

    let payload = CreateAppointmentRequest {
        patient_id: Some(Uuid::new_v4()),
        ..Default::default()
    };

    let err = create_appointment_wrapper(&ctx, payload).await.unwrap_err();

    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}
