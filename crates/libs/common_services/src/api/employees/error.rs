use crate::api::auth::error::AuthError;
use crate::database::DbError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use color_eyre::eyre;
use serde_json::json;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum EmployeeError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("internal error")]
    Internal(#[from] eyre::Report),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),
}

fn log_error(error: &EmployeeError) {
    match error {
        EmployeeError::Database(e) => warn!("Database query failed: {}", e),
        EmployeeError::Internal(e) => warn!("Internal error: {:?}", e),
        EmployeeError::NotFound(message) => warn!("Employee -> Not found: {}", message),
        EmployeeError::Conflict(message) => warn!("Employee -> Conflict: {}", message),
        EmployeeError::BadRequest(message) => warn!("Employee -> Bad Request: {}", message),
    }
}

impl IntoResponse for EmployeeError {
    fn into_response(self) -> Response {
        log_error(&self);

        let (status, error_message) = match self {
            Self::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "A database error occurred.".to_string(),
            ),
            Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected internal error occurred.".to_string(),
            ),
            Self::NotFound(message) => (StatusCode::NOT_FOUND, format!("Not found: {message}")),
            Self::Conflict(message) => (StatusCode::CONFLICT, message),
            Self::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, format!("Bad request: {message}"))
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl From<DbError> for EmployeeError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::UniqueViolation(sql_err) | DbError::Sqlx(sql_err) => Self::Database(sql_err),
            DbError::SerdeJson(err) => Self::Internal(eyre::Report::new(err)),
        }
    }
}

impl From<AuthError> for EmployeeError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::UserAlreadyExists => {
                Self::Conflict("A user with this email already exists".to_string())
            }
            AuthError::InvalidRegistration(reason) => Self::BadRequest(reason),
            AuthError::Internal(report) => Self::Internal(report),
            other => Self::Internal(eyre::eyre!("unexpected auth error: {other:?}")),
        }
    }
}
