use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use clinicare_core::{
    errors::{ClinicError, ClinicResult},
    models::patient::{CreatePatientRequest, Patient, PatientQuery, UpdatePatientRequest},
};
use clinicare_db::models::DbPatient;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    ApiState,
    extract::{Path, Query},
    middleware::error_handling::AppError,
};

fn not_found(id: Uuid) -> ClinicError {
    ClinicError::NotFound(format!("Patient with ID {} not found", id))
}

/// Turns a missing patient into `NotFound`
pub fn check_patient(patient_id: Uuid, patient: Option<DbPatient>) -> ClinicResult<DbPatient> {
    patient.ok_or_else(|| not_found(patient_id))
}

/// Looks up `patient_id` and applies [`check_patient`]
pub(crate) async fn ensure_patient(pool: &PgPool, patient_id: Uuid) -> Result<DbPatient, AppError> {
    let patient = clinicare_db::repositories::patient::get_patient_by_id(pool, patient_id)
        .await
        .map_err(ClinicError::Database)?;

    Ok(check_patient(patient_id, patient)?)
}

async fn ensure_user_exists(pool: &PgPool, user_id: Option<Uuid>) -> Result<(), AppError> {
    if let Some(user_id) = user_id {
        clinicare_db::repositories::user::get_user_by_id(pool, user_id)
            .await
            .map_err(ClinicError::Database)?
            .ok_or_else(|| ClinicError::Validation(format!("User with ID {} does not exist", user_id)))?;
    }
    Ok(())
}

#[axum::debug_handler]
pub async fn list_patients(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<PatientQuery>,
) -> Result<Json<Vec<Patient>>, AppError> {
    let patients =
        clinicare_db::repositories::patient::list_patients(&state.db_pool, query.name.as_deref())
            .await
            .map_err(ClinicError::Database)?
            .into_iter()
            .map(Patient::try_from)
            .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(patients))
}

#[axum::debug_handler]
pub async fn get_patient(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Patient>, AppError> {
    let patient = ensure_patient(&state.db_pool, id).await?;

    Ok(Json(Patient::try_from(patient)?))
}

#[axum::debug_handler]
pub async fn create_patient(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreatePatientRequest>,
) -> Result<(StatusCode, Json<Patient>), AppError> {
    payload.validate()?;
    ensure_user_exists(&state.db_pool, payload.user_id).await?;

    let patient = clinicare_db::repositories::patient::create_patient(&state.db_pool, &payload)
        .await
        .map_err(ClinicError::Database)?;

    Ok((StatusCode::CREATED, Json(Patient::try_from(patient)?)))
}

#[axum::debug_handler]
pub async fn update_patient(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePatientRequest>,
) -> Result<Json<Patient>, AppError> {
    payload.validate()?;
    ensure_user_exists(&state.db_pool, payload.user_id).await?;

    let patient = clinicare_db::repositories::patient::update_patient(&state.db_pool, id, &payload)
        .await
        .map_err(ClinicError::Database)?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(Patient::try_from(patient)?))
}

#[axum::debug_handler]
pub async fn delete_patient(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = clinicare_db::repositories::patient::delete_patient(&state.db_pool, id)
        .await
        .map_err(ClinicError::Database)?;
    if !deleted {
        return Err(AppError(not_found(id)));
    }

    Ok(StatusCode::NO_CONTENT)
}
