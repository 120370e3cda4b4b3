//! Store Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;

use crate::error::{StoreError, StoreResult};
use crate::models::{CreateStore, Store};
use crate::repository::StoreRepository;

pub struct StoreService<R: StoreRepository> {
    repository: Arc<R>,
}

impl<R: StoreRepository> Clone for StoreService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: StoreRepository> StoreService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a store. Names are unique across all stores.
    #[instrument(skip(self, input), fields(store_name = %input.name))]
    pub async fn create_store(&self, input: CreateStore) -> StoreResult<Store> {
        if self.repository.exists_by_name(&input.name).await? {
            return Err(StoreError::DuplicateName(input.name));
        }

        self.repository.create(&input.name).await
    }

    #[instrument(skip(self))]
    pub async fn get_store(&self, id: i32) -> StoreResult<Store> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn list_stores(&self) -> StoreResult<Vec<Store>> {
        self.repository.list().await
    }

    /// Delete a store and everything it owns
    #[instrument(skip(self))]
    pub async fn delete_store(&self, id: i32) -> StoreResult<()> {
        if !self.repository.delete(id).await? {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockStoreRepository;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_create_rejects_duplicate_name() {
        let mut mock_repo = MockStoreRepository::new();
        mock_repo
            .expect_exists_by_name()
            .with(eq("Downtown"))
            .returning(|_| Ok(true));
        mock_repo.expect_create().never();

        let service = StoreService::new(mock_repo);
        let result = service
            .create_store(CreateStore {
                name: "Downtown".to_string(),
            })
            .await;

        assert!(matches!(result, Err(StoreError::DuplicateName(name)) if name == "Downtown"));
    }

    #[tokio::test]
    async fn test_create_inserts_when_name_free() {
        let mut mock_repo = MockStoreRepository::new();
        mock_repo.expect_exists_by_name().returning(|_| Ok(false));
        mock_repo.expect_create().times(1).returning(|name| {
            Ok(Store {
                id: 1,
                name: name.to_string(),
                items: vec![],
                tags: vec![],
            })
        });

        let service = StoreService::new(mock_repo);
        let store = service
            .create_store(CreateStore {
                name: "Downtown".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(store.id, 1);
    }

    #[tokio::test]
    async fn test_get_missing_store_is_not_found() {
        let mut mock_repo = MockStoreRepository::new();
        mock_repo
            .expect_get_by_id()
            .with(eq(42))
            .returning(|_| Ok(None));

        let service = StoreService::new(mock_repo);
        assert!(matches!(
            service.get_store(42).await,
            Err(StoreError::NotFound(42))
        ));
    }

    #[tokio::test]
    async fn test_delete_missing_store_is_not_found() {
        let mut mock_repo = MockStoreRepository::new();
        mock_repo.expect_delete().returning(|_| Ok(false));

        let service = StoreService::new(mock_repo);
        assert!(matches!(
            service.delete_store(7).await,
            Err(StoreError::NotFound(7))
        ));
    }
}
