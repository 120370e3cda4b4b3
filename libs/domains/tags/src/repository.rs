use async_trait::async_trait;
use entity::item;

use crate::error::TagResult;
use crate::models::Tag;

/// Repository trait for Tag persistence and item links
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn create(&self, store_id: i32, name: &str) -> TagResult<Tag>;

    async fn get_by_id(&self, id: i32) -> TagResult<Option<Tag>>;

    /// Tags of one store, ordered by id
    async fn list_by_store(&self, store_id: i32) -> TagResult<Vec<Tag>>;

    /// Returns false if there was no such tag
    async fn delete(&self, id: i32) -> TagResult<bool>;

    async fn store_exists(&self, store_id: i32) -> TagResult<bool>;

    async fn name_taken(&self, store_id: i32, name: &str) -> TagResult<bool>;

    /// True if the tag is attached to at least one item
    async fn has_items(&self, tag_id: i32) -> TagResult<bool>;

    async fn find_item(&self, item_id: i32) -> TagResult<Option<item::Model>>;

    /// Attach; attaching twice is a no-op
    async fn link(&self, item_id: i32, tag_id: i32) -> TagResult<()>;

    /// Detach; returns false if they were not linked
    async fn unlink(&self, item_id: i32, tag_id: i32) -> TagResult<bool>;
}
