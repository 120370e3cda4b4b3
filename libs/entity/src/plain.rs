//! Flat renderings used when one resource embeds another.
//!
//! A store lists its items and tags, an item shows its store and tags, and so
//! on. The embedded side is always rendered flat so responses never recurse.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{item, store, tag};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PlainStore {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PlainItem {
    pub id: i32,
    pub name: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PlainTag {
    pub id: i32,
    pub name: String,
}

impl From<store::Model> for PlainStore {
    fn from(model: store::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

impl From<item::Model> for PlainItem {
    fn from(model: item::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            price: model.price,
        }
    }
}

impl From<tag::Model> for PlainTag {
    fn from(model: tag::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}
