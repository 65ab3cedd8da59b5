use crate::models::DbPatient;
use clinicare_core::models::patient::{CreatePatientRequest, UpdatePatientRequest};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

const PATIENT_COLUMNS: &str = "id, user_id, name, age, gender, contact, medical_history, \
    blood_type, allergies, chronic_conditions, last_physical, insurance_provider, insurance_id";

pub async fn create_patient(
    pool: &Pool<Postgres>,
    patient: &CreatePatientRequest,
) -> Result<DbPatient> {
    let id = Uuid::new_v4();

    tracing::debug!("Creating patient: id={}, name={}", id, patient.name);

    let created = sqlx::query_as::<_, DbPatient>(&format!(
        r#"
        INSERT INTO patients (
            id, user_id, name, age, gender, contact, medical_history, blood_type,
            allergies, chronic_conditions, last_physical, insurance_provider, insurance_id
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        RETURNING {PATIENT_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(patient.user_id)
    .bind(&patient.name)
    .bind(patient.age)
    .bind(patient.gender.map(|gender| gender.as_str()))
    .bind(patient.contact.as_deref())
    .bind(patient.medical_history.as_deref())
    .bind(patient.blood_type.map(|blood_type| blood_type.as_str()))
    .bind(&patient.allergies)
    .bind(&patient.chronic_conditions)
    .bind(patient.last_physical)
    .bind(&patient.insurance_provider)
    .bind(&patient.insurance_id)
    .fetch_one(pool)
    .await?;

    Ok(created)
}

pub async fn get_patient_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbPatient>> {
    let patient = sqlx::query_as::<_, DbPatient>(&format!(
        "SELECT {PATIENT_COLUMNS} FROM patients WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(patient)
}

/// Lists patients ordered by name, optionally narrowed to names containing
/// `name` (case-insensitive)
pub async fn list_patients(pool: &Pool<Postgres>, name: Option<&str>) -> Result<Vec<DbPatient>> {
    let pattern = name
        .filter(|name| !name.is_empty())
        .map(|name| format!("%{}%", escape_like(name)));

    let patients = sqlx::query_as::<_, DbPatient>(&format!(
        r#"
        SELECT {PATIENT_COLUMNS}
        FROM patients
        WHERE ($1::text IS NULL OR name ILIKE $1)
        ORDER BY name ASC
        "#
    ))
    .bind(pattern)
    .fetch_all(pool)
    .await?;

    Ok(patients)
}

pub async fn update_patient(
    pool: &Pool<Postgres>,
    id: Uuid,
    changes: &UpdatePatientRequest,
) -> Result<Option<DbPatient>> {
    let patient = sqlx::query_as::<_, DbPatient>(&format!(
        r#"
        UPDATE patients
        SET user_id = COALESCE($2, user_id),
            name = COALESCE($3, name),
            age = COALESCE($4, age),
            gender = COALESCE($5, gender),
            contact = COALESCE($6, contact),
            medical_history = COALESCE($7, medical_history),
            blood_type = COALESCE($8, blood_type),
            allergies = COALESCE($9, allergies),
            chronic_conditions = COALESCE($10, chronic_conditions),
            last_physical = COALESCE($11, last_physical),
            insurance_provider = COALESCE($12, insurance_provider),
            insurance_id = COALESCE($13, insurance_id)
        WHERE id = $1
        RETURNING {PATIENT_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(changes.user_id)
    .bind(changes.name.as_deref())
    .bind(changes.age)
    .bind(changes.gender.map(|gender| gender.as_str()))
    .bind(changes.contact.as_deref())
    .bind(changes.medical_history.as_deref())
    .bind(changes.blood_type.map(|blood_type| blood_type.as_str()))
    .bind(changes.allergies.as_deref())
    .bind(changes.chronic_conditions.as_deref())
    .bind(changes.last_physical)
    .bind(changes.insurance_provider.as_deref())
    .bind(changes.insurance_id.as_deref())
    .fetch_optional(pool)
    .await?;

    Ok(patient)
}

pub async fn delete_patient(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM patients WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Escapes `ILIKE` wildcards so user input matches literally
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
