use axum::{Json, extract::State};
use clinicare_core::{
    errors::{ClinicError, ClinicResult},
    models::{
        auth::{RefreshRequest, RefreshResponse, TokenRequest, TokenResponse, TokenType},
        user::{Role, normalize_email},
    },
};
use clinicare_db::models::DbUser;
use std::sync::Arc;

use crate::{
    ApiState,
    middleware::{
        auth::{TokenSettings, verify_password},
        error_handling::AppError,
    },
};

const INVALID_CREDENTIALS: &str = "No active account found with the given credentials";

/// Accepts `user` only if it exists, is active and `password` matches
///
/// Every failure yields the same `Authentication` message.
pub fn check_credentials(user: Option<DbUser>, password: &str) -> ClinicResult<DbUser> {
    let invalid = || ClinicError::Authentication(INVALID_CREDENTIALS.to_string());

    let user = user.filter(|user| user.is_active).ok_or_else(invalid)?;

    let matches = verify_password(&user.password_hash, password).map_err(ClinicError::Database)?;
    if !matches {
        return Err(invalid());
    }

    Ok(user)
}

/// Signs an access and refresh token for `user`
pub fn issue_token_pair(tokens: &TokenSettings, user: &DbUser) -> ClinicResult<TokenResponse> {
    let role: Role = user.role.parse()?;

    Ok(TokenResponse {
        access: tokens.issue(user.id, &user.email, role, TokenType::Access)?,
        refresh: tokens.issue(user.id, &user.email, role, TokenType::Refresh)?,
        role,
        email: user.email.clone(),
    })
}

#[axum::debug_handler]
pub async fn obtain_token(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<TokenRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let email = normalize_email(&payload.email)
        .map_err(|_| ClinicError::Authentication(INVALID_CREDENTIALS.to_string()))?;

    let user = clinicare_db::repositories::user::get_user_by_email(&state.db_pool, &email)
        .await
        .map_err(ClinicError::Database)?;

    let user = check_credentials(user, &payload.password).inspect_err(|_| {
        tracing::info!("Rejected login for {}", email);
    })?;

    let response = issue_token_pair(&state.tokens, &user)?;
    tracing::info!("Issued tokens for {} ({})", user.email, user.role);

    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn refresh_token(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>, AppError> {
    let claims = state.tokens.validate(&payload.refresh, TokenType::Refresh)?;

    // Deleted or deactivated accounts lose access at the next refresh
    let user = clinicare_db::repositories::user::get_user_by_id(&state.db_pool, claims.sub)
        .await
        .map_err(ClinicError::Database)?
        .filter(|user| user.is_active)
        .ok_or_else(|| ClinicError::Authentication("User is inactive or deleted".to_string()))?;

    let role: Role = user.role.parse()?;
    let access = state
        .tokens
        .issue(user.id, &user.email, role, TokenType::Access)?;

    Ok(Json(RefreshResponse { access }))
}
