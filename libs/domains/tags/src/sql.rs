use async_trait::async_trait;
use entity::prelude::{Item, ItemTag, Store, Tag as TagEntity};
use entity::{item, item_tag, store, tag};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, SqlErr,
};
use std::collections::HashMap;

use crate::{
    error::{TagError, TagResult},
    models::Tag,
    repository::TagRepository,
};

/// sea-orm backed tag repository (SQLite or Postgres)
#[derive(Clone)]
pub struct SqlTagRepository {
    db: DatabaseConnection,
}

impl SqlTagRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Attach stores and linked items to a batch of tag rows, keeping their order.
    async fn hydrate(&self, models: Vec<tag::Model>) -> TagResult<Vec<Tag>> {
        if models.is_empty() {
            return Ok(vec![]);
        }

        let store_ids: Vec<i32> = models.iter().map(|m| m.store_id).collect();
        let tag_ids: Vec<i32> = models.iter().map(|m| m.id).collect();

        let stores: HashMap<i32, store::Model> = Store::find()
            .filter(store::Column::Id.is_in(store_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();

        let mut items: HashMap<i32, Vec<item::Model>> = HashMap::new();
        let links = ItemTag::find()
            .filter(item_tag::Column::TagId.is_in(tag_ids))
            .order_by_asc(item_tag::Column::ItemId)
            .find_also_related(Item)
            .all(&self.db)
            .await?;
        for (link, item) in links {
            if let Some(item) = item {
                items.entry(link.tag_id).or_default().push(item);
            }
        }

        models
            .into_iter()
            .map(|model| {
                let store = stores
                    .get(&model.store_id)
                    .cloned()
                    .ok_or_else(|| TagError::Internal(format!("tag {} has no store", model.id)))?;
                let tag_items = items.remove(&model.id).unwrap_or_default();
                Ok(Tag::from_parts(model, store, tag_items))
            })
            .collect()
    }
}

#[async_trait]
impl TagRepository for SqlTagRepository {
    async fn create(&self, store_id: i32, name: &str) -> TagResult<Tag> {
        let model = tag::ActiveModel {
            name: Set(name.to_string()),
            store_id: Set(store_id),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => TagError::DuplicateName(name.to_string()),
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => TagError::StoreNotFound(store_id),
            _ => TagError::Database(e),
        })?;

        tracing::info!(tag_id = model.id, store_id, "Created tag");
        let id = model.id;
        self.hydrate(vec![model])
            .await?
            .pop()
            .ok_or(TagError::NotFound(id))
    }

    async fn get_by_id(&self, id: i32) -> TagResult<Option<Tag>> {
        let Some(model) = TagEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        Ok(self.hydrate(vec![model]).await?.pop())
    }

    async fn list_by_store(&self, store_id: i32) -> TagResult<Vec<Tag>> {
        let models = TagEntity::find()
            .filter(tag::Column::StoreId.eq(store_id))
            .order_by_asc(tag::Column::Id)
            .all(&self.db)
            .await?;
        self.hydrate(models).await
    }

    async fn delete(&self, id: i32) -> TagResult<bool> {
        let result = TagEntity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected > 0 {
            tracing::info!(tag_id = id, "Deleted tag");
        }
        Ok(result.rows_affected > 0)
    }

    async fn store_exists(&self, store_id: i32) -> TagResult<bool> {
        Ok(Store::find_by_id(store_id).count(&self.db).await? > 0)
    }

    async fn name_taken(&self, store_id: i32, name: &str) -> TagResult<bool> {
        let count = TagEntity::find()
            .filter(tag::Column::StoreId.eq(store_id))
            .filter(tag::Column::Name.eq(name))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn has_items(&self, tag_id: i32) -> TagResult<bool> {
        let count = ItemTag::find()
            .filter(item_tag::Column::TagId.eq(tag_id))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn find_item(&self, item_id: i32) -> TagResult<Option<item::Model>> {
        Ok(Item::find_by_id(item_id).one(&self.db).await?)
    }

    async fn link(&self, item_id: i32, tag_id: i32) -> TagResult<()> {
        let result = item_tag::ActiveModel {
            item_id: Set(item_id),
            tag_id: Set(tag_id),
            ..Default::default()
        }
        .insert(&self.db)
        .await;

        match result {
            Ok(_) => {
                tracing::info!(item_id, tag_id, "Linked item to tag");
                Ok(())
            }
            Err(e) => match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    tracing::debug!(item_id, tag_id, "Item already linked to tag");
                    Ok(())
                }
                _ => Err(TagError::Database(e)),
            },
        }
    }

    async fn unlink(&self, item_id: i32, tag_id: i32) -> TagResult<bool> {
        let result = ItemTag::delete_many()
            .filter(item_tag::Column::ItemId.eq(item_id))
            .filter(item_tag::Column::TagId.eq(tag_id))
            .exec(&self.db)
            .await?;
        if result.rows_affected > 0 {
            tracing::info!(item_id, tag_id, "Unlinked item from tag");
        }
        Ok(result.rows_affected > 0)
    }
}
