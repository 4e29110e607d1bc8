use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::services::{AppointmentServiceError, AuthServiceError, UserServiceError};

// Type alias for Result with our AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error(transparent)]
    Auth(#[from] AuthServiceError),

    #[error(transparent)]
    Appointment(#[from] AppointmentServiceError),

    #[error(transparent)]
    User(#[from] UserServiceError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Auth(AuthServiceError::InvalidCredentials) => {
                (StatusCode::UNAUTHORIZED, "Authentication failed")
            }
            AppError::Appointment(AppointmentServiceError::Validation(_)) => {
                (StatusCode::BAD_REQUEST, "Invalid booking")
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };

        if status.is_server_error() {
            error!("Request failed: {}", self);
        }

        (status, message).into_response()
    }
}
