//! Read-only aggregate reports
//!
//! Each handler runs one grouping query and converts the rows into the
//! report types from `clinicare_core::models::report`.

use axum::{Json, extract::State};
use clinicare_core::{
    errors::ClinicError,
    models::report::{
        AppointmentTrendStat, InventoryStatusStat, PrescriptionStat, UserRegistrationStat,
    },
};
use std::sync::Arc;

use crate::{ApiState, middleware::error_handling::AppError};

#[axum::debug_handler]
pub async fn user_registration_report(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<UserRegistrationStat>>, AppError> {
    let stats = clinicare_db::repositories::report::user_registrations(&state.db_pool)
        .await
        .map_err(ClinicError::Database)?
        .into_iter()
        .map(UserRegistrationStat::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(stats))
}

#[axum::debug_handler]
pub async fn inventory_report(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<InventoryStatusStat>>, AppError> {
    let stats = clinicare_db::repositories::report::inventory_levels(&state.db_pool)
        .await
        .map_err(ClinicError::Database)?;

    Ok(Json(
        stats.into_iter().map(InventoryStatusStat::from).collect(),
    ))
}

#[axum::debug_handler]
pub async fn prescription_report(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<PrescriptionStat>>, AppError> {
    let stats = clinicare_db::repositories::report::prescription_stats(&state.db_pool)
        .await
        .map_err(ClinicError::Database)?;

    Ok(Json(stats.into_iter().map(PrescriptionStat::from).collect()))
}

#[axum::debug_handler]
pub async fn appointment_report(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<AppointmentTrendStat>>, AppError> {
    let stats = clinicare_db::repositories::report::appointment_trends(&state.db_pool)
        .await
        .map_err(ClinicError::Database)?
        .into_iter()
        .map(AppointmentTrendStat::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(stats))
}
