use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use color_eyre::eyre;
use serde_json::json;
use tracing::{info, warn};

#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    InvalidCredentials,
    RefreshTokenExpiredOrNotFound,
    UserAlreadyExists,
    UserNotFound,
    InvalidRegistration(String),
    PermissionDenied { user_email: String, path: String },
    Internal(eyre::Report),
}

fn log_auth_failure(error: &AuthError) {
    match error {
        AuthError::MissingToken => warn!("Authentication failed: Missing Authorization token."),
        AuthError::InvalidToken => warn!("Authentication failed: Invalid token provided."),
        AuthError::InvalidCredentials => {
            info!("Authentication failed: Invalid credentials provided.");
        }
        AuthError::RefreshTokenExpiredOrNotFound => info!("Refresh token not found or expired."),
        AuthError::UserAlreadyExists => info!("Registration failed: User already exists."),
        AuthError::UserNotFound => warn!("Authentication failed: User from token not found."),
        AuthError::InvalidRegistration(reason) => info!("Registration rejected: {reason}"),
        AuthError::PermissionDenied { user_email, path } => {
            warn!("Authorization failed: User {user_email} tried to access {path}");
        }
        AuthError::Internal(e) => {
            tracing::error!("Internal server error during authentication: {:?}", e);
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        log_auth_failure(&self);

        let (status, error_message) = match self {
            Self::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid email or password".to_string(),
            ),
            Self::MissingToken
            | Self::InvalidToken
            | Self::UserNotFound
            | Self::RefreshTokenExpiredOrNotFound => {
                (StatusCode::UNAUTHORIZED, "Authentication failed".to_string())
            }
            Self::UserAlreadyExists => (
                StatusCode::CONFLICT,
                "A user with this email already exists".to_string(),
            ),
            Self::InvalidRegistration(reason) => (StatusCode::BAD_REQUEST, reason),
            Self::PermissionDenied { .. } => {
                (StatusCode::FORBIDDEN, "Permission denied".to_string())
            }
            Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal error occurred".to_string(),
            ),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

// Lets `?` turn database and other errors into `AuthError::Internal`.
impl<E> From<E> for AuthError
where
    E: Into<eyre::Report>,
{
    fn from(err: E) -> Self {
        Self::Internal(err.into())
    }
}
