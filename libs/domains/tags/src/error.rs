use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TagError {
    #[error("Tag not found: {0}")]
    NotFound(i32),

    #[error("Store not found: {0}")]
    StoreNotFound(i32),

    #[error("Item not found: {0}")]
    ItemNotFound(i32),

    #[error("Tag with name '{0}' already exists in this store")]
    DuplicateName(String),

    #[error("Tag {0} is still linked to items")]
    StillLinked(i32),

    #[error("Item {item_id} and tag {tag_id} belong to different stores")]
    StoreMismatch { item_id: i32, tag_id: i32 },

    #[error("Item {item_id} is not linked to tag {tag_id}")]
    NotLinked { item_id: i32, tag_id: i32 },

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type TagResult<T> = Result<T, TagError>;

impl From<TagError> for AppError {
    fn from(err: TagError) -> Self {
        match err {
            TagError::NotFound(_) => AppError::NotFound("Tag not found.".to_string()),
            TagError::StoreNotFound(_) => AppError::NotFound("Store not found.".to_string()),
            TagError::ItemNotFound(_) => AppError::NotFound("Item not found.".to_string()),
            TagError::DuplicateName(_) => AppError::Conflict(
                "A tag with that name already exists in that store.".to_string(),
            ),
            TagError::StillLinked(_) => AppError::BadRequest(
                "Could not delete tag. Make sure tag is not associated with any items, then try again."
                    .to_string(),
            ),
            TagError::StoreMismatch { .. } => AppError::BadRequest(
                "Item and tag must belong to the same store.".to_string(),
            ),
            TagError::NotLinked { .. } => {
                AppError::NotFound("Item is not linked to this tag.".to_string())
            }
            TagError::Database(e) => AppError::Database(e),
            TagError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for TagError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
