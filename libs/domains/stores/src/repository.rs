use async_trait::async_trait;

use crate::error::StoreResult;
use crate::models::Store;

/// Repository trait for Store persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreRepository: Send + Sync {
    /// Insert a store. Fails with `DuplicateName` if the name is taken.
    async fn create(&self, name: &str) -> StoreResult<Store>;

    /// Get a store with its items and tags
    async fn get_by_id(&self, id: i32) -> StoreResult<Option<Store>>;

    /// All stores, ordered by id
    async fn list(&self) -> StoreResult<Vec<Store>>;

    /// Delete a store together with its items and tags. Returns false if
    /// there was no such store.
    async fn delete(&self, id: i32) -> StoreResult<bool>;

    async fn exists_by_name(&self, name: &str) -> StoreResult<bool>;
}
