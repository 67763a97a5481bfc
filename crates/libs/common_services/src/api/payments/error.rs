use crate::database::DbError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use color_eyre::eyre;
use serde_json::json;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("internal error")]
    Internal(#[from] eyre::Report),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate charge: {0}")]
    DuplicateCharge(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),
}

fn log_error(error: &PaymentError) {
    match error {
        PaymentError::Database(e) => warn!("Database query failed: {}", e),
        PaymentError::Internal(e) => warn!("Internal error: {:?}", e),
        PaymentError::NotFound(message) => warn!("Payment -> Not found: {}", message),
        PaymentError::DuplicateCharge(charge_id) => {
            warn!("Payment -> Charge already recorded: {}", charge_id);
        }
        PaymentError::BadRequest(message) => warn!("Payment -> Bad Request: {}", message),
    }
}

impl IntoResponse for PaymentError {
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
            Self::DuplicateCharge(charge_id) => (
                StatusCode::CONFLICT,
                format!("Charge {charge_id} has already been recorded."),
            ),
            Self::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, format!("Bad request: {message}"))
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl From<DbError> for PaymentError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::UniqueViolation(sql_err) | DbError::Sqlx(sql_err) => Self::Database(sql_err),
            DbError::SerdeJson(err) => Self::Internal(eyre::Report::new(err)),
        }
    }
}
