use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ItemError {
    #[error("Item not found: {0}")]
    NotFound(i32),

    #[error("Store not found: {0}")]
    StoreNotFound(i32),

    #[error("Item with name '{0}' already exists in this store")]
    DuplicateName(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ItemResult<T> = Result<T, ItemError>;

/// Convert ItemError to AppError for standardized error responses
impl From<ItemError> for AppError {
    fn from(err: ItemError) -> Self {
        match err {
            ItemError::NotFound(_) => AppError::NotFound("Item not found.".to_string()),
            ItemError::StoreNotFound(_) => AppError::NotFound("Store not found.".to_string()),
            ItemError::DuplicateName(_) => AppError::Conflict(
                "An item with that name already exists in this store.".to_string(),
            ),
            ItemError::Validation(msg) => AppError::BadRequest(msg),
            ItemError::Database(e) => AppError::Database(e),
            ItemError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ItemError {
    fn into_response(self) -> Response {
        // Convert to AppError for the standardized error response format
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
