use crate::api::auth::error::AuthError;
use crate::api::auth::hashing::{hash_password, verify_password};
use crate::api::auth::interfaces::{AuthClaims, CreateUser, Tokens};
use crate::api::auth::token::{
    RefreshTokenParts, generate_refresh_token_parts, split_refresh_token, verify_token,
};
use crate::database::DbError;
use crate::database::app_user::{User, UserRole, UserWithPassword};
use crate::database::user_store::UserStore;
use app_state::constants;
use axum::http::StatusCode;
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use sqlx::{Executor, FromRow, PgPool, Postgres};
use tracing::{info, instrument};

const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(FromRow)]
struct RefreshTokenRecord {
    user_id: i32,
    verifier_hash: String,
}

/// Authenticates a user based on email and password.
///
/// # Errors
///
/// * `AuthError::InvalidCredentials` if the email or password is incorrect.
#[instrument(skip(pool, password))]
pub async fn authenticate_user(
    pool: &PgPool,
    email: &str,
    password: &str,
) -> Result<UserWithPassword, AuthError> {
    let user = UserStore::find_by_email_with_password(pool, email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let valid = verify_password(password.as_bytes(), &user.password)?;
    if !valid {
        return Err(AuthError::InvalidCredentials);
    }

    Ok(user)
}

/// Rejects obviously broken registration payloads before touching the database.
pub fn validate_new_user(payload: &CreateUser) -> Result<(), AuthError> {
    let name = payload.name.trim();
    if name.is_empty() || name.len() != payload.name.len() {
        return Err(AuthError::InvalidRegistration(
            "Name must be non-empty and not start or end with whitespace".to_string(),
        ));
    }
    let email_ok = payload
        .email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !email_ok {
        return Err(AuthError::InvalidRegistration(
            "Email address is not valid".to_string(),
        ));
    }
    if payload.password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::InvalidRegistration(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Inserts a user with the given role, mapping a duplicate email to `UserAlreadyExists`.
pub async fn insert_user(
    executor: impl Executor<'_, Database = Postgres>,
    payload: &CreateUser,
    role: UserRole,
) -> Result<User, AuthError> {
    validate_new_user(payload)?;
    let hashed = hash_password(payload.password.as_bytes())?;
    info!("Creating {role} user email={}", payload.email);
    match UserStore::create(executor, &payload.email, &payload.name, &hashed, role).await {
        Ok(user) => Ok(user),
        Err(DbError::UniqueViolation(_)) => Err(AuthError::UserAlreadyExists),
        Err(e) => Err(e.into()),
    }
}

/// Self-registration. The very first account becomes the admin, everyone after that
/// signs up as a customer. Employees are created by an admin.
///
/// # Errors
///
/// * `AuthError::UserAlreadyExists` if a user with the given email already exists.
/// * `AuthError::InvalidRegistration` when the payload is malformed.
pub async fn register_user(pool: &PgPool, payload: &CreateUser) -> Result<User, AuthError> {
    let role = if UserStore::any_user_exists(pool).await? {
        UserRole::Customer
    } else {
        UserRole::Admin
    };
    insert_user(pool, payload, role).await
}

/// Stores a refresh token in the database.
pub async fn store_refresh_token(
    executor: impl Executor<'_, Database = Postgres>,
    user_id: i32,
    parts: &RefreshTokenParts,
) -> Result<(), AuthError> {
    let exp = Utc::now() + Duration::days(constants().auth.refresh_token_expiry_days);
    sqlx::query(
        "INSERT INTO refresh_token (user_id, selector, verifier_hash, expires_at)
         VALUES ($1, $2, $3, $4)",
    )
    .bind(user_id)
    .bind(&parts.selector)
    .bind(&parts.verifier_hash)
    .bind(exp)
    .execute(executor)
    .await?;
    Ok(())
}

/// Creates a new access token for a given user ID and role.
///
/// # Errors
///
/// * `jsonwebtoken::Error` if token encoding fails.
pub fn create_access_token(
    jwt_secret: &str,
    user_id: i32,
    role: UserRole,
) -> Result<(String, u64), AuthError> {
    let exp =
        (Utc::now() + Duration::minutes(constants().auth.access_token_expiry_minutes)).timestamp();
    let claims = AuthClaims {
        sub: user_id,
        role,
        exp,
    };
    let access_token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_ref()),
    )?;

    Ok((access_token, exp as u64))
}

/// Issues a fresh access + refresh token pair for a user.
pub async fn issue_tokens(
    pool: &PgPool,
    jwt_secret: &str,
    user_id: i32,
    role: UserRole,
) -> Result<Tokens, AuthError> {
    let (access_token, expiry) = create_access_token(jwt_secret, user_id, role)?;
    let parts = generate_refresh_token_parts()?;
    store_refresh_token(pool, user_id, &parts).await?;
    Ok(Tokens {
        expiry,
        access_token,
        refresh_token: parts.raw_token,
    })
}

/// Handles refresh token rotation, invalidating the old token and issuing a new pair.
///
/// # Errors
///
/// * `AuthError::InvalidToken` if the provided refresh token is malformed or invalid.
/// * `AuthError::RefreshTokenExpiredOrNotFound` if the token is unknown or expired.
/// * `AuthError::UserNotFound` if the token's user no longer exists.
#[instrument(skip_all)]
pub async fn refresh_tokens(
    pool: &PgPool,
    jwt_secret: &str,
    raw_token: &str,
) -> Result<Tokens, AuthError> {
    let (selector, verifier_bytes) = split_refresh_token(raw_token)?;
    let record = sqlx::query_as::<_, RefreshTokenRecord>(
        "SELECT user_id, verifier_hash FROM refresh_token
         WHERE selector = $1 AND expires_at > NOW()",
    )
    .bind(&selector)
    .fetch_optional(pool)
    .await?
    .ok_or(AuthError::RefreshTokenExpiredOrNotFound)?;

    if !verify_token(&verifier_bytes, &record.verifier_hash)? {
        // Wrong verifier for a known selector: treat as theft and revoke every session.
        sqlx::query("DELETE FROM refresh_token WHERE user_id = $1")
            .bind(record.user_id)
            .execute(pool)
            .await
            .ok();
        return Err(AuthError::InvalidToken);
    }

    let user_role = UserStore::get_user_role(pool, record.user_id)
        .await?
        .ok_or(AuthError::UserNotFound)?;

    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM refresh_token WHERE selector = $1")
        .bind(&selector)
        .execute(&mut *tx)
        .await?;

    let new_parts = generate_refresh_token_parts()?;
    store_refresh_token(&mut *tx, record.user_id, &new_parts).await?;

    tx.commit().await?;

    let (access_token, expiry) = create_access_token(jwt_secret, record.user_id, user_role)?;
    Ok(Tokens {
        expiry,
        access_token,
        refresh_token: new_parts.raw_token,
    })
}

/// Deletes the refresh token matching the provided one.
pub async fn logout_user(pool: &PgPool, raw_token: &str) -> Result<StatusCode, AuthError> {
    // Malformed tokens are ignored.
    if let Ok((selector, verifier_bytes)) = split_refresh_token(raw_token)
        && let Some(record) = sqlx::query_as::<_, RefreshTokenRecord>(
            "SELECT user_id, verifier_hash FROM refresh_token WHERE selector = $1",
        )
        .bind(&selector)
        .fetch_optional(pool)
        .await?
        && verify_token(&verifier_bytes, &record.verifier_hash).unwrap_or(false)
    {
        sqlx::query("DELETE FROM refresh_token WHERE selector = $1")
            .bind(&selector)
            .execute(pool)
            .await?;
    }
    // Always succeed, so tokens cannot be enumerated.
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(email: &str, name: &str, password: &str) -> CreateUser {
        CreateUser {
            email: email.to_string(),
            name: name.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn accepts_reasonable_registration() {
        assert!(validate_new_user(&payload("ann@example.com", "Ann Lee", "longenough")).is_ok());
    }

    #[test]
    fn rejects_bad_registration_fields() {
        for bad in [
            payload("ann@example.com", " Ann", "longenough"),
            payload("ann@example.com", "", "longenough"),
            payload("ann.example.com", "Ann", "longenough"),
            payload("@example.com", "Ann", "longenough"),
            payload("ann@example.com", "Ann", "short"),
        ] {
            assert!(matches!(
                validate_new_user(&bad),
                Err(AuthError::InvalidRegistration(_))
            ));
        }
    }
}
