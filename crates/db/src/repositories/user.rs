use crate::models::DbUser;
use chrono::Utc;
use clinicare_core::models::user::{Role, UpdateUserRequest};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

const USER_COLUMNS: &str =
    "id, email, password_hash, role, first_name, last_name, is_active, date_joined";

pub async fn create_user(
    pool: &Pool<Postgres>,
    email: &str,
    password_hash: &str,
    role: Role,
    first_name: &str,
    last_name: &str,
) -> Result<DbUser> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating user: id={}, email={}, role={}", id, email, role);

    let user = sqlx::query_as::<_, DbUser>(&format!(
        r#"
        INSERT INTO users (id, email, password_hash, role, first_name, last_name, is_active, date_joined)
        VALUES ($1, $2, $3, $4, $5, $6, TRUE, $7)
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(email)
    .bind(password_hash)
    .bind(role.as_str())
    .bind(first_name)
    .bind(last_name)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

pub async fn get_user_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbUser>> {
    let user = sqlx::query_as::<_, DbUser>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn get_user_by_email(pool: &Pool<Postgres>, email: &str) -> Result<Option<DbUser>> {
    let user = sqlx::query_as::<_, DbUser>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn list_users(pool: &Pool<Postgres>) -> Result<Vec<DbUser>> {
    let users = sqlx::query_as::<_, DbUser>(&format!(
        "SELECT {USER_COLUMNS} FROM users ORDER BY email ASC"
    ))
    .fetch_all(pool)
    .await?;

    Ok(users)
}

/// Applies the set fields of `changes`; `changes.password` is ignored in
/// favour of the already-hashed `password_hash`
pub async fn update_user(
    pool: &Pool<Postgres>,
    id: Uuid,
    changes: &UpdateUserRequest,
    password_hash: Option<&str>,
) -> Result<Option<DbUser>> {
    let user = sqlx::query_as::<_, DbUser>(&format!(
        r#"
        UPDATE users
        SET email = COALESCE($2, email),
            password_hash = COALESCE($3, password_hash),
            role = COALESCE($4, role),
            first_name = COALESCE($5, first_name),
            last_name = COALESCE($6, last_name),
            is_active = COALESCE($7, is_active)
        WHERE id = $1
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(changes.email.as_deref())
    .bind(password_hash)
    .bind(changes.role.map(|role| role.as_str()))
    .bind(changes.first_name.as_deref())
    .bind(changes.last_name.as_deref())
    .bind(changes.is_active)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn delete_user(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
