use crate::models::DbAppointment;
use chrono::{NaiveDate, NaiveTime};
use clinicare_core::models::appointment::NewAppointment;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Selects a `DbAppointment` from `a`, the appointments relation in scope
const APPOINTMENT_SELECT: &str = r#"
    SELECT a.id, a.patient_id, p.name AS patient_name, a.doctor_id, u.email AS doctor_email,
           a.date, a.time, a.notes, a.status
    FROM a
    JOIN patients p ON p.id = a.patient_id
    LEFT JOIN users u ON u.id = a.doctor_id
"#;

pub async fn create_appointment(
    pool: &Pool<Postgres>,
    appointment: &NewAppointment,
) -> Result<DbAppointment> {
    let id = Uuid::new_v4();

    tracing::debug!(
        "Creating appointment: id={}, patient_id={}, doctor_id={:?}, date={}, time={}",
        id,
        appointment.patient_id,
        appointment.doctor_id,
        appointment.date,
        appointment.time
    );

    let created = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        WITH a AS (
            INSERT INTO appointments (id, patient_id, doctor_id, date, time, notes, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
        )
        {APPOINTMENT_SELECT}
        "#
    ))
    .bind(id)
    .bind(appointment.patient_id)
    .bind(appointment.doctor_id)
    .bind(appointment.date)
    .bind(appointment.time)
    .bind(appointment.notes.as_deref())
    .bind(appointment.status.as_str())
    .fetch_one(pool)
    .await?;

    Ok(created)
}

pub async fn get_appointment_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbAppointment>> {
    let appointment = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        WITH a AS (SELECT * FROM appointments WHERE id = $1)
        {APPOINTMENT_SELECT}
        "#
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(appointment)
}

/// Lists appointments, latest date first and by time within a day
pub async fn list_appointments(
    pool: &Pool<Postgres>,
    date: Option<NaiveDate>,
    patient_id: Option<Uuid>,
    doctor_id: Option<Uuid>,
) -> Result<Vec<DbAppointment>> {
    let appointments = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        WITH a AS (
            SELECT * FROM appointments
            WHERE ($1::date IS NULL OR date = $1)
              AND ($2::uuid IS NULL OR patient_id = $2)
              AND ($3::uuid IS NULL OR doctor_id = $3)
        )
        {APPOINTMENT_SELECT}
        ORDER BY a.date DESC, a.time ASC
        "#
    ))
    .bind(date)
    .bind(patient_id)
    .bind(doctor_id)
    .fetch_all(pool)
    .await?;

    Ok(appointments)
}

/// Overwrites every stored field with `appointment`
pub async fn update_appointment(
    pool: &Pool<Postgres>,
    id: Uuid,
    appointment: &NewAppointment,
) -> Result<Option<DbAppointment>> {
    let updated = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        WITH a AS (
            UPDATE appointments
            SET patient_id = $2, doctor_id = $3, date = $4, time = $5, notes = $6, status = $7
            WHERE id = $1
            RETURNING *
        )
        {APPOINTMENT_SELECT}
        "#
    ))
    .bind(id)
    .bind(appointment.patient_id)
    .bind(appointment.doctor_id)
    .bind(appointment.date)
    .bind(appointment.time)
    .bind(appointment.notes.as_deref())
    .bind(appointment.status.as_str())
    .fetch_optional(pool)
    .await?;

    Ok(updated)
}

pub async fn delete_appointment(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM appointments WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Every appointment of the doctor on that day holds its slot, whatever its status
const BOOKED_TIMES: &str = r#"
    SELECT time
    FROM appointments
    WHERE doctor_id = $1 AND date = $2
    ORDER BY time ASC
"#;

/// Times already taken for `doctor_id` on `date`
pub async fn get_booked_times(
    pool: &Pool<Postgres>,
    doctor_id: Uuid,
    date: NaiveDate,
) -> Result<Vec<NaiveTime>> {
    let times = sqlx::query_scalar::<_, NaiveTime>(BOOKED_TIMES)
        .bind(doctor_id)
        .bind(date)
        .fetch_all(pool)
        .await?;

    tracing::debug!(
        "Found {} booked times for doctor {} on {}",
        times.len(),
        doctor_id,
        date
    );

    Ok(times)
}
