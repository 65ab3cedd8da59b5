use axum::Json;
use clinicare_core::{
    errors::ClinicError,
    models::{
        auth::{RefreshResponse, TokenResponse, TokenType},
        user::Role,
    },
};
use mockall::predicate;
use pretty_assertions::assert_eq;

use crate::test_utils::{TestContext, db_user};
use clinicare_api::{
    handlers::auth::{check_credentials, issue_token_pair},
    middleware::error_handling::AppError,
};

// Mirrors obtain_token against the mocked user store
async fn obtain_token_wrapper(
    ctx: &TestContext,
    email: &'static str,
    password: &str,
) -> Result<Json<TokenResponse>, AppError> {
    let user = ctx.user_repo.get_user_by_email(email).await?;
    let user = check_credentials(user, password)?;

    Ok(Json(issue_token_pair(&ctx.tokens, &user)?))
}

// Mirrors refresh_token against the mocked user store
async fn refresh_token_wrapper(
    ctx: &TestContext,
    refresh: &str,
) -> Result<Json<RefreshResponse>, AppError> {
    let claims = ctx.tokens.validate(refresh, TokenType::Refresh)?;

    let user = ctx
        .user_repo
        .get_user_by_id(claims.sub)
        .await?
        .filter(|user| user.is_active)
        .ok_or_else(|| ClinicError::Authentication("User is inactive or deleted".to_string()))?;

    let access = ctx
        .tokens
        .issue(user.id, &user.email, user.role.parse()?, TokenType::Access)?;

    Ok(Json(RefreshResponse { access }))
}

fn assert_unauthorized<T: std::fmt::Debug>(result: Result<T, AppError>) {
    match result {
        Err(AppError(ClinicError::Authentication(_))) => {}
        other => panic!("Expected authentication error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_obtain_token_success() {
    let mut ctx = TestContext::new();
    let user = db_user(Role::Doctor, "correct horse");
    let user_id = user.id;

    ctx.user_repo
        .expect_get_user_by_email()
        .with(predicate::eq("doctor@clinic.org"))
        .times(1)
        .returning(move |_| Ok(Some(user.clone())));

    let Json(response) = obtain_token_wrapper(&ctx, "doctor@clinic.org", "correct horse")
        .await
        .unwrap();

    assert_eq!(response.role, Role::Doctor);
    assert_eq!(response.email, "doctor@clinic.org");

    let access = ctx.tokens.validate(&response.access, TokenType::Access).unwrap();
    assert_eq!(access.sub, user_id);
    assert_eq!(access.role, Role::Doctor);

    let refresh = ctx.tokens.validate(&response.refresh, TokenType::Refresh).unwrap();
    assert_eq!(refresh.sub, user_id);
}

#[tokio::test]
async fn test_obtain_token_wrong_password() {
    let mut ctx = TestContext::new();
    let user = db_user(Role::Nurse, "correct horse");

    ctx.user_repo
        .expect_get_user_by_email()
        .returning(move |_| Ok(Some(user.clone())));

    assert_unauthorized(obtain_token_wrapper(&ctx, "nurse@clinic.org", "battery staple").await);
}

#[tokio::test]
async fn test_obtain_token_unknown_email() {
    let mut ctx = TestContext::new();

    ctx.user_repo
        .expect_get_user_by_email()
        .returning(|_| Ok(None));

    assert_unauthorized(obtain_token_wrapper(&ctx, "ghost@clinic.org", "anything").await);
}

#[tokio::test]
async fn test_obtain_token_inactive_user() {
    let mut ctx = TestContext::new();
    let mut user = db_user(Role::Staff, "correct horse");
    user.is_active = false;

    ctx.user_repo
        .expect_get_user_by_email()
        .returning(move |_| Ok(Some(user.clone())));

    assert_unauthorized(obtain_token_wrapper(&ctx, "staff@clinic.org", "correct horse").await);
}

#[tokio::test]
async fn test_refresh_issues_new_access_token() {
    let mut ctx = TestContext::new();
    let user = db_user(Role::Admin, "correct horse");
    let pair = issue_token_pair(&ctx.tokens, &user).unwrap();
    let user_id = user.id;

    ctx.user_repo
        .expect_get_user_by_id()
        .with(predicate::eq(user_id))
        .times(1)
        .returning(move |_| Ok(Some(user.clone())));

    let Json(response) = refresh_token_wrapper(&ctx, &pair.refresh).await.unwrap();

    let claims = ctx.tokens.validate(&response.access, TokenType::Access).unwrap();
    assert_eq!(claims.sub, user_id);
    assert_eq!(claims.role, Role::Admin);
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let mut ctx = TestContext::new();
    let user = db_user(Role::Admin, "correct horse");
    let pair = issue_token_pair(&ctx.tokens, &user).unwrap();

    ctx.user_repo.expect_get_user_by_id().times(0);

    assert_unauthorized(refresh_token_wrapper(&ctx, &pair.access).await);
}

#[tokio::test]
async fn test_refresh_rejects_deleted_user() {
    let mut ctx = TestContext::new();
    let user = db_user(Role::Doctor, "correct horse");
    let pair = issue_token_pair(&ctx.tokens, &user).unwrap();

    ctx.user_repo.expect_get_user_by_id().returning(|_| Ok(None));

    assert_unauthorized(refresh_token_wrapper(&ctx, &pair.refresh).await);
}
