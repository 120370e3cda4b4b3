use entity::{PlainItem, PlainTag, store};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A store with everything it owns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Store {
    pub id: i32,
    pub name: String,
    pub items: Vec<PlainItem>,
    pub tags: Vec<PlainTag>,
}

impl Store {
    pub fn from_parts(
        model: store::Model,
        items: impl IntoIterator<Item = entity::item::Model>,
        tags: impl IntoIterator<Item = entity::tag::Model>,
    ) -> Self {
        Self {
            id: model.id,
            name: model.name,
            items: items.into_iter().map(Into::into).collect(),
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }
}

/// DTO for creating a new store
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateStore {
    #[validate(length(min = 1, max = 80))]
    #[schema(example = "Downtown")]
    pub name: String,
}
