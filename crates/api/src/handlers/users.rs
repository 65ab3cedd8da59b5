use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
};
use clinicare_core::{
    errors::{ClinicError, ClinicResult},
    models::{
        auth::Claims,
        user::{CreateUserRequest, Role, UpdateUserRequest, User, normalize_email, validate_password},
    },
};
use clinicare_db::models::DbUser;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    ApiState,
    extract::Path,
    middleware::{auth, error_handling::AppError},
};

fn not_found(id: Uuid) -> ClinicError {
    ClinicError::NotFound(format!("User with ID {} not found", id))
}

fn email_taken(email: &str) -> ClinicError {
    ClinicError::Conflict(format!("A user with email {} already exists", email))
}

/// Turns a unique-constraint failure on a user write into a conflict
pub fn map_user_write_error(email: &str, err: eyre::Report) -> ClinicError {
    if clinicare_db::is_unique_violation(&err) {
        email_taken(email)
    } else {
        ClinicError::Database(err)
    }
}

/// Accepts `user` only if it is an account with the doctor role
pub fn check_doctor(doctor_id: Uuid, user: Option<DbUser>) -> ClinicResult<DbUser> {
    let user = user.ok_or_else(|| {
        ClinicError::Validation(format!("Doctor with ID {} does not exist", doctor_id))
    })?;

    if user.role.parse::<Role>()? != Role::Doctor {
        return Err(ClinicError::Validation(format!(
            "User {} is not a doctor",
            user.email
        )));
    }

    Ok(user)
}

/// Looks up `doctor_id` and applies [`check_doctor`]
pub(crate) async fn ensure_doctor(pool: &PgPool, doctor_id: Uuid) -> Result<DbUser, AppError> {
    let user = clinicare_db::repositories::user::get_user_by_id(pool, doctor_id)
        .await
        .map_err(ClinicError::Database)?;

    Ok(check_doctor(doctor_id, user)?)
}

#[axum::debug_handler]
pub async fn list_users(State(state): State<Arc<ApiState>>) -> Result<Json<Vec<User>>, AppError> {
    let users = clinicare_db::repositories::user::list_users(&state.db_pool)
        .await
        .map_err(ClinicError::Database)?
        .into_iter()
        .map(User::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(users))
}

#[axum::debug_handler]
pub async fn get_user(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    let user = clinicare_db::repositories::user::get_user_by_id(&state.db_pool, id)
        .await
        .map_err(ClinicError::Database)?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(User::try_from(user)?))
}

#[axum::debug_handler]
pub async fn create_user(
    State(state): State<Arc<ApiState>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    claims.require_role(&[Role::Admin])?;

    let email = normalize_email(&payload.email)?;
    validate_password(&payload.password)?;

    let existing = clinicare_db::repositories::user::get_user_by_email(&state.db_pool, &email)
        .await
        .map_err(ClinicError::Database)?;
    if existing.is_some() {
        return Err(AppError(email_taken(&email)));
    }

    let password_hash = auth::hash_password(&payload.password)?;

    let user = clinicare_db::repositories::user::create_user(
        &state.db_pool,
        &email,
        &password_hash,
        payload.role,
        &payload.first_name,
        &payload.last_name,
    )
    .await
    .map_err(|err| map_user_write_error(&email, err))?;

    tracing::info!("{} created user {} ({})", claims.email, user.email, user.role);

    Ok((StatusCode::CREATED, Json(User::try_from(user)?)))
}

#[axum::debug_handler]
pub async fn update_user(
    State(state): State<Arc<ApiState>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(mut payload): Json<UpdateUserRequest>,
) -> Result<Json<User>, AppError> {
    claims.require_role(&[Role::Admin])?;

    if let Some(email) = &payload.email {
        let email = normalize_email(email)?;

        let existing = clinicare_db::repositories::user::get_user_by_email(&state.db_pool, &email)
            .await
            .map_err(ClinicError::Database)?;
        if existing.is_some_and(|user| user.id != id) {
            return Err(AppError(email_taken(&email)));
        }

        payload.email = Some(email);
    }

    let password_hash = match &payload.password {
        Some(password) => {
            validate_password(password)?;
            Some(auth::hash_password(password)?)
        }
        None => None,
    };

    let user = clinicare_db::repositories::user::update_user(
        &state.db_pool,
        id,
        &payload,
        password_hash.as_deref(),
    )
    .await
    .map_err(|err| map_user_write_error(payload.email.as_deref().unwrap_or_default(), err))?
    .ok_or_else(|| not_found(id))?;

    Ok(Json(User::try_from(user)?))
}

#[axum::debug_handler]
pub async fn delete_user(
    State(state): State<Arc<ApiState>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    claims.require_role(&[Role::Admin])?;

    if claims.sub == id {
        return Err(AppError(ClinicError::Validation(
            "You cannot delete your own account".to_string(),
        )));
    }

    let deleted = clinicare_db::repositories::user::delete_user(&state.db_pool, id)
        .await
        .map_err(ClinicError::Database)?;
    if !deleted {
        return Err(AppError(not_found(id)));
    }

    Ok(StatusCode::NO_CONTENT)
}
