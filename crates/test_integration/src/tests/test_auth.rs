use crate::runner::context::test_context::TestContext;
use crate::test_constants::{ADMIN_EMAIL, ADMIN_NAME, PASSWORD};
use crate::test_helpers::{admin_token, expect_json, register_customer, unique_email};
use app_state::constants;
use chrono::{DateTime, Utc};
use color_eyre::Result;
use color_eyre::eyre::eyre;
use common_services::api::auth::interfaces::{CreateUser, LoginUser, RefreshTokenPayload, Tokens};
use common_services::database::app_user::{User, UserRole};
use common_services::database::user_store::UserStore;
use reqwest::StatusCode;

async fn login_tokens(context: &TestContext) -> Result<Tokens> {
    let response = context
        .http_client
        .post(context.url("/auth/login"))
        .json(&LoginUser {
            email: ADMIN_EMAIL.to_owned(),
            password: PASSWORD.to_owned(),
        })
        .send()
        .await?;
    expect_json(response, StatusCode::OK).await
}

pub async fn test_register_admin(context: &TestContext) -> Result<()> {
    // ACT
    let response = context
        .http_client
        .post(context.url("/auth/register"))
        .json(&CreateUser {
            name: ADMIN_NAME.to_owned(),
            email: ADMIN_EMAIL.to_owned(),
            password: PASSWORD.to_owned(),
        })
        .send()
        .await?;
    let user: User = expect_json(response, StatusCode::CREATED).await?;

    // ASSERT
    assert_eq!(user.email, ADMIN_EMAIL);
    assert_eq!(user.role, UserRole::Admin);
    let all_users = UserStore::list_users(&context.pool).await?;
    assert_eq!(all_users.len(), 1);
    Ok(())
}

pub async fn test_register_customer(context: &TestContext) -> Result<()> {
    // ACT
    let (user, _) = register_customer(context).await?;

    // ASSERT
    assert_eq!(user.role, UserRole::Customer);
    Ok(())
}

pub async fn test_duplicate_register(context: &TestContext) -> Result<()> {
    // ACT
    let response = context
        .http_client
        .post(context.url("/auth/register"))
        .json(&CreateUser {
            name: "Someone Else".to_owned(),
            email: ADMIN_EMAIL.to_owned(),
            password: PASSWORD.to_owned(),
        })
        .send()
        .await?;
    let short_password = context
        .http_client
        .post(context.url("/auth/register"))
        .json(&CreateUser {
            name: "Short".to_owned(),
            email: unique_email("short"),
            password: "abc".to_owned(),
        })
        .send()
        .await?;

    // ASSERT
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(short_password.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

pub async fn test_login(context: &TestContext) -> Result<()> {
    // ACT
    let tokens = login_tokens(context).await?;
    let response = context
        .http_client
        .get(context.url("/auth/me"))
        .bearer_auth(&tokens.access_token)
        .send()
        .await?;
    let user: User = expect_json(response, StatusCode::OK).await?;
    let wrong_password = context
        .http_client
        .post(context.url("/auth/login"))
        .json(&LoginUser {
            email: ADMIN_EMAIL.to_owned(),
            password: "not-the-password".to_owned(),
        })
        .send()
        .await?;

    // ASSERT
    let expiry_date = DateTime::from_timestamp(tokens.expiry as i64, 0)
        .ok_or_else(|| eyre!("invalid expiry date"))?;
    let expire_seconds = (expiry_date - Utc::now()).as_seconds_f64();
    let configured_seconds = (constants().auth.access_token_expiry_minutes * 60) as f64;
    assert!((expire_seconds - configured_seconds).abs() < 5.);

    assert_eq!(user.email, ADMIN_EMAIL);
    assert_eq!(user.role, UserRole::Admin);
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

pub async fn test_refresh(context: &TestContext) -> Result<()> {
    // ARRANGE
    let initial = login_tokens(context).await?;

    // ACT
    let response = context
        .http_client
        .post(context.url("/auth/refresh"))
        .json(&RefreshTokenPayload {
            refresh_token: initial.refresh_token.clone(),
        })
        .send()
        .await?;
    let refreshed: Tokens = expect_json(response, StatusCode::OK).await?;
    let reused = context
        .http_client
        .post(context.url("/auth/refresh"))
        .json(&RefreshTokenPayload {
            refresh_token: initial.refresh_token,
        })
        .send()
        .await?;
    let me = context
        .http_client
        .get(context.url("/auth/me"))
        .bearer_auth(&refreshed.access_token)
        .send()
        .await?;

    // ASSERT
    assert_eq!(reused.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(me.status(), StatusCode::OK);
    Ok(())
}

pub async fn test_logout(context: &TestContext) -> Result<()> {
    // ARRANGE
    let tokens = login_tokens(context).await?;

    // ACT
    let logout = context
        .http_client
        .post(context.url("/auth/logout"))
        .json(&RefreshTokenPayload {
            refresh_token: tokens.refresh_token.clone(),
        })
        .send()
        .await?;
    let refresh_after_logout = context
        .http_client
        .post(context.url("/auth/refresh"))
        .json(&RefreshTokenPayload {
            refresh_token: tokens.refresh_token,
        })
        .send()
        .await?;

    // ASSERT
    assert_eq!(logout.status(), StatusCode::NO_CONTENT);
    assert_eq!(refresh_after_logout.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

pub async fn test_role_guard(context: &TestContext) -> Result<()> {
    // ARRANGE
    let (_, customer) = register_customer(context).await?;
    let admin = admin_token(context).await?;

    // ACT
    let anonymous = context.http_client.get(context.url("/admin/stats")).send().await?;
    let as_customer = context
        .http_client
        .get(context.url("/admin/stats"))
        .bearer_auth(&customer)
        .send()
        .await?;
    let admin_on_employee_route = context
        .http_client
        .get(context.url("/employee/jobs"))
        .bearer_auth(&admin)
        .send()
        .await?;
    let bad_token = context
        .http_client
        .get(context.url("/auth/me"))
        .bearer_auth("not-a-jwt")
        .send()
        .await?;

    // ASSERT
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(as_customer.status(), StatusCode::FORBIDDEN);
    assert_eq!(admin_on_employee_route.status(), StatusCode::FORBIDDEN);
    assert_eq!(bad_token.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}
