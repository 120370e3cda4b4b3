//! Tag Service - Business logic layer

use entity::PlainItem;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{TagError, TagResult};
use crate::models::{CreateTag, Tag};
use crate::repository::TagRepository;

pub struct TagService<R: TagRepository> {
    repository: Arc<R>,
}

impl<R: TagRepository> Clone for TagService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: TagRepository> TagService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_store_tags(&self, store_id: i32) -> TagResult<Vec<Tag>> {
        self.require_store(store_id).await?;
        self.repository.list_by_store(store_id).await
    }

    /// Create a tag in a store. Names are unique per store.
    #[instrument(skip(self, input), fields(tag_name = %input.name))]
    pub async fn create_tag(&self, store_id: i32, input: CreateTag) -> TagResult<Tag> {
        self.require_store(store_id).await?;
        if self.repository.name_taken(store_id, &input.name).await? {
            return Err(TagError::DuplicateName(input.name));
        }
        self.repository.create(store_id, &input.name).await
    }

    #[instrument(skip(self))]
    pub async fn get_tag(&self, id: i32) -> TagResult<Tag> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(TagError::NotFound(id))
    }

    /// Delete a tag that is not attached to any item
    #[instrument(skip(self))]
    pub async fn delete_tag(&self, id: i32) -> TagResult<()> {
        self.get_tag(id).await?;
        if self.repository.has_items(id).await? {
            return Err(TagError::StillLinked(id));
        }
        if !self.repository.delete(id).await? {
            return Err(TagError::NotFound(id));
        }
        Ok(())
    }

    /// Attach a tag to an item of the same store. Returns the updated tag.
    #[instrument(skip(self))]
    pub async fn link_item(&self, item_id: i32, tag_id: i32) -> TagResult<Tag> {
        let item = self
            .repository
            .find_item(item_id)
            .await?
            .ok_or(TagError::ItemNotFound(item_id))?;
        let tag = self.get_tag(tag_id).await?;
        if item.store_id != tag.store.id {
            return Err(TagError::StoreMismatch { item_id, tag_id });
        }

        self.repository.link(item_id, tag_id).await?;
        self.get_tag(tag_id).await
    }

    /// Detach a tag from an item. Returns the item and the updated tag.
    #[instrument(skip(self))]
    pub async fn unlink_item(&self, item_id: i32, tag_id: i32) -> TagResult<(PlainItem, Tag)> {
        let item = self
            .repository
            .find_item(item_id)
            .await?
            .ok_or(TagError::ItemNotFound(item_id))?;
        self.get_tag(tag_id).await?;

        if !self.repository.unlink(item_id, tag_id).await? {
            return Err(TagError::NotLinked { item_id, tag_id });
        }
        Ok((item.into(), self.get_tag(tag_id).await?))
    }

    async fn require_store(&self, store_id: i32) -> TagResult<()> {
        if !self.repository.store_exists(store_id).await? {
            return Err(TagError::StoreNotFound(store_id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockTagRepository;
    use entity::{PlainStore, item};
    use mockall::predicate::eq;

    fn sample_tag(id: i32, store_id: i32) -> Tag {
        Tag {
            id,
            name: "Furniture".to_string(),
            store: PlainStore {
                id: store_id,
                name: "Main".to_string(),
            },
            items: vec![],
        }
    }

    fn sample_item(id: i32, store_id: i32) -> item::Model {
        item::Model {
            id,
            name: "Chair".to_string(),
            price: 10.0,
            store_id,
        }
    }

    #[tokio::test]
    async fn test_create_in_unknown_store() {
        let mut mock_repo = MockTagRepository::new();
        mock_repo.expect_store_exists().returning(|_| Ok(false));
        mock_repo.expect_create().never();

        let service = TagService::new(mock_repo);
        let result = service
            .create_tag(
                4,
                CreateTag {
                    name: "Furniture".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(TagError::StoreNotFound(4))));
    }

    #[tokio::test]
    async fn test_create_duplicate() {
        let mut mock_repo = MockTagRepository::new();
        mock_repo.expect_store_exists().returning(|_| Ok(true));
        mock_repo
            .expect_name_taken()
            .with(eq(1), eq("Furniture"))
            .returning(|_, _| Ok(true));
        mock_repo.expect_create().never();

        let service = TagService::new(mock_repo);
        let result = service
            .create_tag(
                1,
                CreateTag {
                    name: "Furniture".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(TagError::DuplicateName(_))));
    }

    #[tokio::test]
    async fn test_delete_linked_tag_refused() {
        let mut mock_repo = MockTagRepository::new();
        mock_repo
            .expect_get_by_id()
            .returning(|id| Ok(Some(sample_tag(id, 1))));
        mock_repo.expect_has_items().with(eq(2)).returning(|_| Ok(true));
        mock_repo.expect_delete().never();

        let service = TagService::new(mock_repo);
        assert!(matches!(
            service.delete_tag(2).await,
            Err(TagError::StillLinked(2))
        ));
    }

    #[tokio::test]
    async fn test_link_across_stores_refused() {
        let mut mock_repo = MockTagRepository::new();
        mock_repo
            .expect_find_item()
            .returning(|id| Ok(Some(sample_item(id, 1))));
        mock_repo
            .expect_get_by_id()
            .returning(|id| Ok(Some(sample_tag(id, 2))));
        mock_repo.expect_link().never();

        let service = TagService::new(mock_repo);
        assert!(matches!(
            service.link_item(5, 3).await,
            Err(TagError::StoreMismatch {
                item_id: 5,
                tag_id: 3
            })
        ));
    }

    #[tokio::test]
    async fn test_link_unknown_item() {
        let mut mock_repo = MockTagRepository::new();
        mock_repo.expect_find_item().returning(|_| Ok(None));
        mock_repo.expect_link().never();

        let service = TagService::new(mock_repo);
        assert!(matches!(
            service.link_item(5, 3).await,
            Err(TagError::ItemNotFound(5))
        ));
    }

    #[tokio::test]
    async fn test_unlink_when_not_linked() {
        let mut mock_repo = MockTagRepository::new();
        mock_repo
            .expect_find_item()
            .returning(|id| Ok(Some(sample_item(id, 1))));
        mock_repo
            .expect_get_by_id()
            .returning(|id| Ok(Some(sample_tag(id, 1))));
        mock_repo.expect_unlink().returning(|_, _| Ok(false));

        let service = TagService::new(mock_repo);
        assert!(matches!(
            service.unlink_item(5, 3).await,
            Err(TagError::NotLinked { .. })
        ));
    }
}
