use entity::{PlainItem, PlainStore, item, store, tag};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A tag with its store and the items it is attached to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Tag {
    pub id: i32,
    pub name: String,
    pub store: PlainStore,
    pub items: Vec<PlainItem>,
}

impl Tag {
    pub fn from_parts(
        model: tag::Model,
        store: store::Model,
        items: impl IntoIterator<Item = item::Model>,
    ) -> Self {
        Self {
            id: model.id,
            name: model.name,
            store: store.into(),
            items: items.into_iter().map(Into::into).collect(),
        }
    }
}

/// DTO for creating a tag in a store
#[derive(Debug, Clone, PartialEq, Deserialize, Validate, ToSchema)]
pub struct CreateTag {
    #[validate(length(min = 1, max = 80))]
    #[schema(example = "Furniture")]
    pub name: String,
}

/// Body of `DELETE /item/{item_id}/tag/{tag_id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UnlinkResponse {
    #[schema(example = "Item removed from tag")]
    pub message: String,
    pub item: PlainItem,
    pub tag: Tag,
}
