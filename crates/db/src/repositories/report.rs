use crate::models::{
    DbAppointmentTrendRow, DbInventoryItem, DbPrescriptionStatRow, DbUserRegistrationRow,
};
use eyre::Result;
use sqlx::{Pool, Postgres};

/// Account registrations grouped by month joined and role
pub async fn user_registrations(pool: &Pool<Postgres>) -> Result<Vec<DbUserRegistrationRow>> {
    let rows = sqlx::query_as::<_, DbUserRegistrationRow>(
        r#"
        SELECT date_trunc('month', date_joined)::date AS month, role, COUNT(*) AS count
        FROM users
        GROUP BY 1, 2
        ORDER BY 1, 2
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn inventory_levels(pool: &Pool<Postgres>) -> Result<Vec<DbInventoryItem>> {
    let rows = sqlx::query_as::<_, DbInventoryItem>(
        r#"
        SELECT id, medicine_name, quantity, expiry_date, threshold
        FROM inventory_items
        ORDER BY expiry_date ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Prescription counts per medication, most prescribed first
pub async fn prescription_stats(pool: &Pool<Postgres>) -> Result<Vec<DbPrescriptionStatRow>> {
    let rows = sqlx::query_as::<_, DbPrescriptionStatRow>(
        r#"
        SELECT medication,
               COUNT(*) AS count,
               COUNT(DISTINCT patient_id) AS patients,
               COUNT(*) FILTER (WHERE is_active) AS active
        FROM prescriptions
        GROUP BY medication
        ORDER BY count DESC, medication ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Appointment counts grouped by month and status
pub async fn appointment_trends(pool: &Pool<Postgres>) -> Result<Vec<DbAppointmentTrendRow>> {
    let rows = sqlx::query_as::<_, DbAppointmentTrendRow>(
        r#"
        SELECT date_trunc('month', date)::date AS month, status, COUNT(*) AS count
        FROM appointments
        GROUP BY 1, 2
        ORDER BY 1, 2
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
