use async_trait::async_trait;
use entity::prelude::{Item as ItemEntity, ItemTag, Store, Tag};
use entity::{item, item_tag, store, tag};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend,
    DbErr, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, SqlErr,
    TransactionTrait,
};
use std::collections::HashMap;

use crate::{
    error::{ItemError, ItemResult},
    models::{CreateItem, Item, UpdateItem},
    repository::ItemRepository,
};

/// sea-orm backed item repository (SQLite or Postgres)
#[derive(Clone)]
pub struct SqlItemRepository {
    db: DatabaseConnection,
}

impl SqlItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Attach stores and tags to a batch of item rows, keeping their order.
    async fn hydrate(&self, models: Vec<item::Model>) -> ItemResult<Vec<Item>> {
        if models.is_empty() {
            return Ok(vec![]);
        }

        let store_ids: Vec<i32> = models.iter().map(|m| m.store_id).collect();
        let item_ids: Vec<i32> = models.iter().map(|m| m.id).collect();

        let stores: HashMap<i32, store::Model> = Store::find()
            .filter(store::Column::Id.is_in(store_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();

        let mut tags: HashMap<i32, Vec<tag::Model>> = HashMap::new();
        let links = ItemTag::find()
            .filter(item_tag::Column::ItemId.is_in(item_ids))
            .order_by_asc(item_tag::Column::TagId)
            .find_also_related(Tag)
            .all(&self.db)
            .await?;
        for (link, tag) in links {
            if let Some(tag) = tag {
                tags.entry(link.item_id).or_default().push(tag);
            }
        }

        models
            .into_iter()
            .map(|model| {
                let store = stores.get(&model.store_id).cloned().ok_or_else(|| {
                    ItemError::Internal(format!("item {} has no store", model.id))
                })?;
                let item_tags = tags.remove(&model.id).unwrap_or_default();
                Ok(Item::from_parts(model, store, item_tags))
            })
            .collect()
    }

    async fn hydrate_one(&self, model: item::Model) -> ItemResult<Item> {
        let id = model.id;
        self.hydrate(vec![model])
            .await?
            .pop()
            .ok_or(ItemError::NotFound(id))
    }
}

fn map_insert_error(e: DbErr, name: &str) -> ItemError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => ItemError::DuplicateName(name.to_string()),
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => ItemError::Validation(
            "store_id does not reference an existing store".to_string(),
        ),
        _ => ItemError::Database(e),
    }
}

#[async_trait]
impl ItemRepository for SqlItemRepository {
    async fn create(&self, id: Option<i32>, input: CreateItem) -> ItemResult<Item> {
        let mut active = item::ActiveModel {
            name: Set(input.name.clone()),
            price: Set(input.price),
            store_id: Set(input.store_id),
            ..Default::default()
        };
        if let Some(id) = id {
            active.id = Set(id);
        }

        let model = active
            .insert(&self.db)
            .await
            .map_err(|e| map_insert_error(e, &input.name))?;

        // An explicit id leaves the Postgres sequence behind
        if id.is_some() && self.db.get_database_backend() == DbBackend::Postgres {
            self.db
                .execute_unprepared(
                    "SELECT setval(pg_get_serial_sequence('items', 'id'), (SELECT MAX(id) FROM items))",
                )
                .await?;
        }

        tracing::info!(item_id = model.id, store_id = model.store_id, "Created item");
        self.hydrate_one(model).await
    }

    async fn get_by_id(&self, id: i32) -> ItemResult<Option<Item>> {
        match ItemEntity::find_by_id(id).one(&self.db).await? {
            Some(model) => Ok(Some(self.hydrate_one(model).await?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> ItemResult<Vec<Item>> {
        let models = ItemEntity::find()
            .order_by_asc(item::Column::Id)
            .all(&self.db)
            .await?;
        self.hydrate(models).await
    }

    async fn update(&self, id: i32, input: UpdateItem) -> ItemResult<Item> {
        let txn = self.db.begin().await?;

        let existing = ItemEntity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(ItemError::NotFound(id))?;
        let name = input.name.clone().unwrap_or_else(|| existing.name.clone());
        let moved = input.store_id.is_some_and(|s| s != existing.store_id);

        let mut active = existing.into_active_model();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(price) = input.price {
            active.price = Set(price);
        }
        if let Some(store_id) = input.store_id {
            active.store_id = Set(store_id);
        }
        let model = active
            .update(&txn)
            .await
            .map_err(|e| map_insert_error(e, &name))?;

        // Tags belong to the old store
        if moved {
            ItemTag::delete_many()
                .filter(item_tag::Column::ItemId.eq(id))
                .exec(&txn)
                .await?;
        }

        txn.commit().await?;

        tracing::info!(item_id = id, moved, "Updated item");
        self.hydrate_one(model).await
    }

    async fn delete(&self, id: i32) -> ItemResult<bool> {
        let txn = self.db.begin().await?;

        ItemTag::delete_many()
            .filter(item_tag::Column::ItemId.eq(id))
            .exec(&txn)
            .await?;
        let result = ItemEntity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        if result.rows_affected > 0 {
            tracing::info!(item_id = id, "Deleted item");
        }
        Ok(result.rows_affected > 0)
    }

    async fn store_exists(&self, store_id: i32) -> ItemResult<bool> {
        Ok(Store::find_by_id(store_id).count(&self.db).await? > 0)
    }

    async fn name_taken(
        &self,
        store_id: i32,
        name: &str,
        exclude: Option<i32>,
    ) -> ItemResult<bool> {
        let mut query = ItemEntity::find()
            .filter(item::Column::StoreId.eq(store_id))
            .filter(item::Column::Name.eq(name));
        if let Some(id) = exclude {
            query = query.filter(item::Column::Id.ne(id));
        }
        Ok(query.count(&self.db).await? > 0)
    }
}
