use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use clinicare_core::{
    errors::ClinicError,
    models::prescription::{
        CreatePrescriptionRequest, Prescription, PrescriptionQuery, UpdatePrescriptionRequest,
    },
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    ApiState,
    extract::{Path, Query},
    handlers::{patients::ensure_patient, users::ensure_doctor},
    middleware::error_handling::AppError,
};

fn not_found(id: Uuid) -> ClinicError {
    ClinicError::NotFound(format!("Prescription with ID {} not found", id))
}

#[axum::debug_handler]
pub async fn list_prescriptions(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<PrescriptionQuery>,
) -> Result<Json<Vec<Prescription>>, AppError> {
    let prescriptions = clinicare_db::repositories::prescription::list_prescriptions(
        &state.db_pool,
        query.patient_id,
        query.doctor_id,
        query.active_only(),
    )
    .await
    .map_err(ClinicError::Database)?;

    Ok(Json(
        prescriptions.into_iter().map(Prescription::from).collect(),
    ))
}

#[axum::debug_handler]
pub async fn get_prescription(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Prescription>, AppError> {
    let prescription =
        clinicare_db::repositories::prescription::get_prescription_by_id(&state.db_pool, id)
            .await
            .map_err(ClinicError::Database)?
            .ok_or_else(|| not_found(id))?;

    Ok(Json(prescription.into()))
}

#[axum::debug_handler]
pub async fn create_prescription(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreatePrescriptionRequest>,
) -> Result<(StatusCode, Json<Prescription>), AppError> {
    payload.validate()?;
    ensure_patient(&state.db_pool, payload.patient_id).await?;
    ensure_doctor(&state.db_pool, payload.doctor_id).await?;

    let prescription =
        clinicare_db::repositories::prescription::create_prescription(&state.db_pool, &payload)
            .await
            .map_err(ClinicError::Database)?;

    tracing::info!(
        "Prescribed {} to patient {}",
        prescription.medication,
        prescription.patient_id
    );

    Ok((StatusCode::CREATED, Json(prescription.into())))
}

#[axum::debug_handler]
pub async fn update_prescription(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePrescriptionRequest>,
) -> Result<Json<Prescription>, AppError> {
    payload.validate()?;
    if let Some(patient_id) = payload.patient_id {
        ensure_patient(&state.db_pool, patient_id).await?;
    }
    if let Some(doctor_id) = payload.doctor_id {
        ensure_doctor(&state.db_pool, doctor_id).await?;
    }

    let prescription = clinicare_db::repositories::prescription::update_prescription(
        &state.db_pool,
        id,
        &payload,
    )
    .await
    .map_err(ClinicError::Database)?
    .ok_or_else(|| not_found(id))?;

    Ok(Json(prescription.into()))
}

#[axum::debug_handler]
pub async fn delete_prescription(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = clinicare_db::repositories::prescription::delete_prescription(&state.db_pool, id)
        .await
        .map_err(ClinicError::Database)?;
    if !deleted {
        return Err(AppError(not_found(id)));
    }

    Ok(StatusCode::NO_CONTENT)
}
