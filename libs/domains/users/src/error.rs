use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, auth::{AuthError, BlocklistError}};
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(i32),

    #[error("User '{0}' already exists")]
    DuplicateUsername(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Token error: {0}")]
    Token(#[from] AuthError),

    #[error("Token revocation failed: {0}")]
    Revocation(#[from] BlocklistError),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type UserResult<T> = Result<T, UserError>;

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => AppError::NotFound("User not found.".to_string()),
            UserError::DuplicateUsername(_) => {
                AppError::Conflict("A user with that username already exists.".to_string())
            }
            UserError::InvalidCredentials => {
                AppError::Unauthorized("Invalid credentials.".to_string())
            }
            UserError::PasswordHash(msg) => {
                tracing::error!("Password hash error: {}", msg);
                AppError::InternalServerError("An internal error occurred".to_string())
            }
            UserError::Token(e) => {
                tracing::error!("Failed to issue token: {}", e);
                AppError::InternalServerError("Failed to create token".to_string())
            }
            UserError::Revocation(e) => AppError::ServiceUnavailable(e.to_string()),
            UserError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
