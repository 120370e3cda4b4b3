use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// `{"message": "..."}` body for actions that have nothing else to return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
