//! Item Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;

use crate::error::{ItemError, ItemResult};
use crate::models::{CreateItem, Item, UpdateItem};
use crate::repository::ItemRepository;

pub struct ItemService<R: ItemRepository> {
    repository: Arc<R>,
}

impl<R: ItemRepository> Clone for ItemService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: ItemRepository> ItemService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create an item in an existing store. Names are unique per store.
    #[instrument(skip(self, input), fields(item_name = %input.name, store_id = input.store_id))]
    pub async fn create_item(&self, input: CreateItem) -> ItemResult<Item> {
        self.check_placement(input.store_id, &input.name, None).await?;
        self.repository.create(None, input).await
    }

    #[instrument(skip(self))]
    pub async fn get_item(&self, id: i32) -> ItemResult<Item> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ItemError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn list_items(&self) -> ItemResult<Vec<Item>> {
        self.repository.list().await
    }

    /// Update the item if it exists, otherwise create it under `id`.
    ///
    /// Creating needs `name`, `price` and `store_id`. The flag is true when
    /// the item was created.
    #[instrument(skip(self, input))]
    pub async fn put_item(&self, id: i32, input: UpdateItem) -> ItemResult<(Item, bool)> {
        match self.repository.get_by_id(id).await? {
            Some(existing) => {
                let store_id = input.store_id.unwrap_or(existing.store.id);
                let name = input.name.as_deref().unwrap_or(&existing.name);
                if input.store_id.is_some() || input.name.is_some() {
                    self.check_placement(store_id, name, Some(id)).await?;
                }
                let item = self.repository.update(id, input).await?;
                Ok((item, false))
            }
            None => {
                let create = input.into_create().ok_or_else(|| {
                    ItemError::Validation(
                        "name, price and store_id are required to create an item".to_string(),
                    )
                })?;
                self.check_placement(create.store_id, &create.name, None)
                    .await?;
                let item = self.repository.create(Some(id), create).await?;
                Ok((item, true))
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn delete_item(&self, id: i32) -> ItemResult<()> {
        if !self.repository.delete(id).await? {
            return Err(ItemError::NotFound(id));
        }
        Ok(())
    }

    async fn check_placement(
        &self,
        store_id: i32,
        name: &str,
        exclude: Option<i32>,
    ) -> ItemResult<()> {
        if !self.repository.store_exists(store_id).await? {
            return Err(ItemError::StoreNotFound(store_id));
        }
        if self.repository.name_taken(store_id, name, exclude).await? {
            return Err(ItemError::DuplicateName(name.to_string()));
        }
        Ok(())
    }
}
