//! # Authentication Module
//!
//! This module provides authentication for the Clinicare API:
//!
//! - Argon2 password hashing and verification for user accounts
//! - Issuing and validating HS256 JWT access and refresh tokens
//! - The [`require_auth`] middleware guarding every non-public route
//!
//! Access tokens authenticate requests. Refresh tokens are only accepted by
//! the token refresh endpoint.

use std::sync::Arc;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use chrono::{Duration, Utc};
use clinicare_core::{
    errors::{ClinicError, ClinicResult},
    models::{
        auth::{Claims, TokenType},
        user::Role,
    },
};
use eyre::{Result, eyre};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

/// Hashes a password using the Argon2 algorithm
///
/// A fresh random salt is generated for every call and the result is returned
/// in PHC string format.
///
/// # Example
///
/// ```
/// use clinicare_api::middleware::auth::{hash_password, verify_password};
///
/// let hashed = hash_password("correct horse").unwrap();
/// assert!(verify_password(&hashed, "correct horse").unwrap());
/// ```
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Checks `password` against a stored PHC hash
///
/// # Errors
///
/// Fails only when `password_hash` is not a parseable PHC string; a wrong
/// password is `Ok(false)`.
pub fn verify_password(password_hash: &str, password: &str) -> Result<bool> {
    let parsed_hash =
        PasswordHash::new(password_hash).map_err(|e| eyre!("Invalid password hash: {}", e))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Signing secret and token lifetimes
#[derive(Debug, Clone)]
pub struct TokenSettings {
    pub secret: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

impl TokenSettings {
    pub fn new(secret: impl Into<String>, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            secret: secret.into(),
            access_ttl,
            refresh_ttl,
        }
    }

    /// Signs a token of `token_type` for the given user
    pub fn issue(
        &self,
        user_id: Uuid,
        email: &str,
        role: Role,
        token_type: TokenType,
    ) -> ClinicResult<String> {
        let now = Utc::now();
        let ttl = match token_type {
            TokenType::Access => self.access_ttl,
            TokenType::Refresh => self.refresh_ttl,
        };

        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            role,
            token_type,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| ClinicError::Internal(Box::new(e)))
    }

    /// Decodes `token`, checking signature, expiry and token type
    pub fn validate(&self, token: &str, expected: TokenType) -> ClinicResult<Claims> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|e| {
            tracing::debug!("Token rejected: {}", e);
            ClinicError::Authentication("Invalid or expired token".to_string())
        })?;

        if data.claims.token_type != expected {
            return Err(ClinicError::Authentication(format!(
                "Expected a {:?} token",
                expected
            )));
        }

        Ok(data.claims)
    }
}

/// Rejects requests without a valid bearer access token
///
/// On success the decoded [`Claims`] are stored in the request extensions for
/// handlers to pick up with `Extension<Claims>`.
pub async fn require_auth(
    State(state): State<Arc<ApiState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| {
            ClinicError::Authentication("Authentication credentials were not provided".to_string())
        })?
        .to_str()
        .map_err(|_| ClinicError::Authentication("Invalid authorization header".to_string()))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ClinicError::Authentication("Invalid authorization header".to_string()))?;

    let claims = state.tokens.validate(token.trim(), TokenType::Access)?;
    tracing::debug!("Authenticated {} ({})", claims.email, claims.role);

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
