use entity::{PlainStore, PlainTag, item, store, tag};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// An item with its store and tags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub store: PlainStore,
    pub tags: Vec<PlainTag>,
}

impl Item {
    pub fn from_parts(
        model: item::Model,
        store: store::Model,
        tags: impl IntoIterator<Item = tag::Model>,
    ) -> Self {
        Self {
            id: model.id,
            name: model.name,
            price: model.price,
            store: store.into(),
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }
}

/// DTO for creating a new item
#[derive(Debug, Clone, PartialEq, Deserialize, Validate, ToSchema)]
pub struct CreateItem {
    #[validate(length(min = 1, max = 80))]
    #[schema(example = "Chair")]
    pub name: String,
    #[validate(range(min = 0.0))]
    #[schema(example = 15.99)]
    pub price: f64,
    pub store_id: i32,
}

/// DTO for `PUT /item/{id}`. Every field is optional when the item exists;
/// all three are needed to create it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate, ToSchema)]
pub struct UpdateItem {
    #[validate(length(min = 1, max = 80))]
    pub name: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    pub store_id: Option<i32>,
}

impl UpdateItem {
    /// The full item this update describes, if every field is present.
    pub fn into_create(self) -> Option<CreateItem> {
        Some(CreateItem {
            name: self.name?,
            price: self.price?,
            store_id: self.store_id?,
        })
    }
}
