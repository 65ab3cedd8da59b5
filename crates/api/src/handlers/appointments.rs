//! # Appointment Handlers
//!
//! Appointments always reference an existing patient by id. A doctor is
//! optional, but when given it must be an account with the doctor role.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use clinicare_core::{
    errors::ClinicError,
    models::appointment::{
        Appointment, AppointmentQuery, CreateAppointmentRequest, NewAppointment,
        UpdateAppointmentRequest,
    },
};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    ApiState,
    extract::{Path, Query},
    handlers::{patients::ensure_patient, users::ensure_doctor},
    middleware::error_handling::AppError,
};

fn not_found(id: Uuid) -> ClinicError {
    ClinicError::NotFound(format!("Appointment with ID {} not found", id))
}

async fn check_references(pool: &PgPool, appointment: &NewAppointment) -> Result<(), AppError> {
    ensure_patient(pool, appointment.patient_id).await?;
    if let Some(doctor_id) = appointment.doctor_id {
        ensure_doctor(pool, doctor_id).await?;
    }
    Ok(())
}

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<AppointmentQuery>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let date = query.parsed_date()?;

    let appointments = clinicare_db::repositories::appointment::list_appointments(
        &state.db_pool,
        date,
        query.patient_id,
        query.doctor_id,
    )
    .await
    .map_err(ClinicError::Database)?
    .into_iter()
    .map(Appointment::try_from)
    .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(appointments))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Appointment>, AppError> {
    let appointment =
        clinicare_db::repositories::appointment::get_appointment_by_id(&state.db_pool, id)
            .await
            .map_err(ClinicError::Database)?
            .ok_or_else(|| not_found(id))?;

    Ok(Json(Appointment::try_from(appointment)?))
}

#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    let appointment = payload.validate()?;
    check_references(&state.db_pool, &appointment).await?;

    let created =
        clinicare_db::repositories::appointment::create_appointment(&state.db_pool, &appointment)
            .await
            .map_err(ClinicError::Database)?;

    tracing::info!(
        "Booked appointment {} for patient {} on {} at {}",
        created.id,
        created.patient_id,
        created.date,
        created.time
    );

    Ok((StatusCode::CREATED, Json(Appointment::try_from(created)?)))
}

#[axum::debug_handler]
pub async fn update_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAppointmentRequest>,
) -> Result<Json<Appointment>, AppError> {
    let current =
        clinicare_db::repositories::appointment::get_appointment_by_id(&state.db_pool, id)
            .await
            .map_err(ClinicError::Database)?
            .ok_or_else(|| not_found(id))?;

    let appointment = payload.apply_to(current.to_new_appointment()?)?;
    check_references(&state.db_pool, &appointment).await?;

    let updated = clinicare_db::repositories::appointment::update_appointment(
        &state.db_pool,
        id,
        &appointment,
    )
    .await
    .map_err(ClinicError::Database)?
    .ok_or_else(|| not_found(id))?;

    Ok(Json(Appointment::try_from(updated)?))
}

#[axum::debug_handler]
pub async fn delete_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = clinicare_db::repositories::appointment::delete_appointment(&state.db_pool, id)
        .await
        .map_err(ClinicError::Database)?;
    if !deleted {
        return Err(AppError(not_found(id)));
    }

    Ok(StatusCode::NO_CONTENT)
}
