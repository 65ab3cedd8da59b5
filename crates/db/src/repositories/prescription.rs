use crate::models::DbPrescription;
use chrono::Utc;
use clinicare_core::models::prescription::{CreatePrescriptionRequest, UpdatePrescriptionRequest};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Selects a `DbPrescription` from `rx`, the prescriptions relation in scope
const PRESCRIPTION_SELECT: &str = r#"
    SELECT rx.id, rx.patient_id, p.name AS patient_name, rx.doctor_id, u.email AS doctor_email,
           rx.medication, rx.dosage, rx.instructions, rx.date_prescribed, rx.is_active
    FROM rx
    JOIN patients p ON p.id = rx.patient_id
    JOIN users u ON u.id = rx.doctor_id
"#;

pub async fn create_prescription(
    pool: &Pool<Postgres>,
    prescription: &CreatePrescriptionRequest,
) -> Result<DbPrescription> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let created = sqlx::query_as::<_, DbPrescription>(&format!(
        r#"
        WITH rx AS (
            INSERT INTO prescriptions (
                id, patient_id, doctor_id, medication, dosage, instructions, date_prescribed, is_active
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
        )
        {PRESCRIPTION_SELECT}
        "#
    ))
    .bind(id)
    .bind(prescription.patient_id)
    .bind(prescription.doctor_id)
    .bind(&prescription.medication)
    .bind(&prescription.dosage)
    .bind(&prescription.instructions)
    .bind(now)
    .bind(prescription.is_active)
    .fetch_one(pool)
    .await?;

    Ok(created)
}

pub async fn get_prescription_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbPrescription>> {
    let prescription = sqlx::query_as::<_, DbPrescription>(&format!(
        r#"
        WITH rx AS (SELECT * FROM prescriptions WHERE id = $1)
        {PRESCRIPTION_SELECT}
        "#
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(prescription)
}

/// Lists prescriptions, newest first
pub async fn list_prescriptions(
    pool: &Pool<Postgres>,
    patient_id: Option<Uuid>,
    doctor_id: Option<Uuid>,
    active_only: bool,
) -> Result<Vec<DbPrescription>> {
    let prescriptions = sqlx::query_as::<_, DbPrescription>(&format!(
        r#"
        WITH rx AS (
            SELECT * FROM prescriptions
            WHERE ($1::uuid IS NULL OR patient_id = $1)
              AND ($2::uuid IS NULL OR doctor_id = $2)
              AND ($3 = FALSE OR is_active)
        )
        {PRESCRIPTION_SELECT}
        ORDER BY rx.date_prescribed DESC
        "#
    ))
    .bind(patient_id)
    .bind(doctor_id)
    .bind(active_only)
    .fetch_all(pool)
    .await?;

    Ok(prescriptions)
}

pub async fn update_prescription(
    pool: &Pool<Postgres>,
    id: Uuid,
    changes: &UpdatePrescriptionRequest,
) -> Result<Option<DbPrescription>> {
    let updated = sqlx::query_as::<_, DbPrescription>(&format!(
        r#"
        WITH rx AS (
            UPDATE prescriptions
            SET patient_id = COALESCE($2, patient_id),
                doctor_id = COALESCE($3, doctor_id),
                medication = COALESCE($4, medication),
                dosage = COALESCE($5, dosage),
                instructions = COALESCE($6, instructions),
                is_active = COALESCE($7, is_active)
            WHERE id = $1
            RETURNING *
        )
        {PRESCRIPTION_SELECT}
        "#
    ))
    .bind(id)
    .bind(changes.patient_id)
    .bind(changes.doctor_id)
    .bind(changes.medication.as_deref())
    .bind(changes.dosage.as_deref())
    .bind(changes.instructions.as_deref())
    .bind(changes.is_active)
    .fetch_optional(pool)
    .await?;

    Ok(updated)
}

pub async fn delete_prescription(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM prescriptions WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
