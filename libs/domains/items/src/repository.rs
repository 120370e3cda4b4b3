use async_trait::async_trait;

use crate::error::ItemResult;
use crate::models::{CreateItem, Item, UpdateItem};

/// Repository trait for Item persistence
///
/// Business rules (owning store exists, names unique per store) are checked
/// by the service; implementations only store and load.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Insert an item. `id` pins the primary key, `None` lets the database pick.
    async fn create(&self, id: Option<i32>, input: CreateItem) -> ItemResult<Item>;

    async fn get_by_id(&self, id: i32) -> ItemResult<Option<Item>>;

    /// All items, ordered by id
    async fn list(&self) -> ItemResult<Vec<Item>>;

    /// Apply the present fields of `input` to an existing item
    async fn update(&self, id: i32, input: UpdateItem) -> ItemResult<Item>;

    /// Returns false if there was no such item
    async fn delete(&self, id: i32) -> ItemResult<bool>;

    async fn store_exists(&self, store_id: i32) -> ItemResult<bool>;

    /// True if the store already has an item called `name`, other than `exclude`
    async fn name_taken(&self, store_id: i32, name: &str, exclude: Option<i32>)
    -> ItemResult<bool>;
}
