//! # Availability Handlers
//!
//! Serves the open appointment slots of a doctor for one day.
//!
//! The working window comes from the [`AvailabilityCalculator`] held in the
//! application state; the booked times come from the appointment store. The
//! date is validated before the store is queried, so a malformed request
//! never reaches the database.
//!
//! [`AvailabilityCalculator`]: clinicare_core::availability::AvailabilityCalculator

use axum::{Json, extract::State};
use chrono::NaiveDate;
use clinicare_core::{
    availability::parse_date,
    errors::{ClinicError, ClinicResult},
    models::availability::DoctorAvailabilityResponse,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    ApiState,
    extract::{Path, Query},
    middleware::error_handling::AppError,
};

/// Query parameters for the availability endpoint
#[derive(Debug, Default, Deserialize)]
pub struct AvailabilityQuery {
    /// Day to inspect, `YYYY-MM-DD`
    pub date: Option<String>,
}

impl AvailabilityQuery {
    /// Returns the raw date string together with the parsed date
    ///
    /// # Errors
    ///
    /// * `ClinicError::MissingParameter` - no `date` was supplied
    /// * `ClinicError::InvalidDateFormat` - `date` is not a valid `YYYY-MM-DD` date
    pub fn date(&self) -> ClinicResult<(&str, NaiveDate)> {
        let raw = self
            .date
            .as_deref()
            .filter(|date| !date.is_empty())
            .ok_or_else(|| ClinicError::MissingParameter("Date".to_string()))?;

        Ok((raw, parse_date(raw)?))
    }
}

/// Lists the open slots of a doctor on a given day
///
/// # Endpoint
///
/// ```text
/// GET /api/doctors/:doctor_id/availability?date=2025-03-10
/// ```
///
/// # Response
///
/// ```json
/// { "doctor_id": "…", "date": "2025-03-10", "available_slots": ["09:00", "09:30", "…"] }
/// ```
///
/// The doctor id is not checked for existence: an unknown doctor simply has
/// no bookings and therefore the full grid is returned.
///
/// # Errors
///
/// * `ClinicError::MissingParameter` - Missing `date` parameter
/// * `ClinicError::InvalidDateFormat` - Unparseable `date`
/// * `ClinicError::Database` - Failure loading booked times
#[axum::debug_handler]
pub async fn doctor_availability(
    State(state): State<Arc<ApiState>>,
    Path(doctor_id): Path<Uuid>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<DoctorAvailabilityResponse>, AppError> {
    let (raw_date, date) = query.date()?;

    let booked =
        clinicare_db::repositories::appointment::get_booked_times(&state.db_pool, doctor_id, date)
            .await
            .map_err(ClinicError::Database)?;

    let response = state.availability.compute(doctor_id, raw_date, booked)?;

    tracing::debug!(
        "Doctor {} has {} open slots on {}",
        doctor_id,
        response.available_slots.len(),
        raw_date
    );

    Ok(Json(response))
}
