use crate::database::DbError;
use crate::payment_processor::ProcessorError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use color_eyre::eyre;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum ReconciliationError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("internal error")]
    Internal(#[from] eyre::Report),

    #[error("Payment processor error: {0}")]
    Processor(#[from] ProcessorError),

    #[error("Not found: {0}")]
    NotFound(String),
}

fn log_error(error: &ReconciliationError) {
    match error {
        ReconciliationError::Database(e) => warn!("Database query failed: {}", e),
        ReconciliationError::Internal(e) => warn!("Internal error: {:?}", e),
        ReconciliationError::Processor(e) => error!("Reconciliation -> Processor error: {}", e),
        ReconciliationError::NotFound(message) => {
            warn!("Reconciliation -> Not found: {}", message);
        }
    }
}

impl IntoResponse for ReconciliationError {
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
            Self::Processor(_) => (
                StatusCode::BAD_GATEWAY,
                "Could not fetch charges from the payment processor.".to_string(),
            ),
            Self::NotFound(message) => (StatusCode::NOT_FOUND, format!("Not found: {message}")),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl From<DbError> for ReconciliationError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::UniqueViolation(sql_err) | DbError::Sqlx(sql_err) => Self::Database(sql_err),
            DbError::SerdeJson(err) => Self::Internal(eyre::Report::new(err)),
        }
    }
}
