use crate::database::DbError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use color_eyre::eyre;
use serde_json::json;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("internal error")]
    Internal(#[from] eyre::Report),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("User has no employee profile")]
    NotAnEmployee,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Rating {average_rating:.2} is below {threshold:.2}")]
    RatingTooLow { average_rating: f64, threshold: f64 },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),
}

fn log_error(error: &DispatchError) {
    match error {
        DispatchError::Database(e) => warn!("Database query failed: {}", e),
        DispatchError::Internal(e) => warn!("Internal error: {:?}", e),
        DispatchError::NotFound(message) => warn!("Dispatch -> Not found: {}", message),
        DispatchError::NotAnEmployee => warn!("Dispatch -> Caller has no employee profile"),
        DispatchError::Forbidden(message) => warn!("Dispatch -> Forbidden: {}", message),
        DispatchError::RatingTooLow {
            average_rating,
            threshold,
        } => info!("Dispatch -> Claim refused, rating {average_rating:.2} < {threshold:.2}"),
        DispatchError::Conflict(message) => info!("Dispatch -> Conflict: {}", message),
        DispatchError::BadRequest(message) => warn!("Dispatch -> Bad Request: {}", message),
    }
}

impl IntoResponse for DispatchError {
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
            Self::NotAnEmployee => (
                StatusCode::NOT_FOUND,
                "No employee profile exists for this account.".to_string(),
            ),
            Self::Forbidden(message) => (StatusCode::FORBIDDEN, format!("Forbidden: {message}")),
            Self::RatingTooLow {
                average_rating,
                threshold,
            } => (
                StatusCode::FORBIDDEN,
                format!(
                    "An average rating of at least {threshold:.1} is required to hold more than one job (current: {average_rating:.2})."
                ),
            ),
            Self::Conflict(message) => (StatusCode::CONFLICT, message),
            Self::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, format!("Bad request: {message}"))
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl From<DbError> for DispatchError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::UniqueViolation(sql_err) | DbError::Sqlx(sql_err) => Self::Database(sql_err),
            DbError::SerdeJson(err) => Self::Internal(eyre::Report::new(err)),
        }
    }
}
