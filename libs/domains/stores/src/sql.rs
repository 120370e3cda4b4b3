use sea_orm::ExprTrait;
use async_trait::async_trait;
use entity::prelude::{Item, ItemTag, Store as StoreEntity, Tag};
use entity::{item, item_tag, store, tag};
use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    LoaderTrait, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, SqlErr, TransactionTrait,
};

use crate::{
    error::{StoreError, StoreResult},
    models::Store,
    repository::StoreRepository,
};

/// sea-orm backed store repository (SQLite or Postgres)
#[derive(Clone)]
pub struct SqlStoreRepository {
    db: DatabaseConnection,
}

impl SqlStoreRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn with_children(&self, model: store::Model) -> StoreResult<Store> {
        let items = model
            .find_related(Item)
            .order_by_asc(item::Column::Id)
            .all(&self.db)
            .await?;
        let tags = model
            .find_related(Tag)
            .order_by_asc(tag::Column::Id)
            .all(&self.db)
            .await?;
        Ok(Store::from_parts(model, items, tags))
    }
}

#[async_trait]
impl StoreRepository for SqlStoreRepository {
    async fn create(&self, name: &str) -> StoreResult<Store> {
        let model = store::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                StoreError::DuplicateName(name.to_string())
            }
            _ => StoreError::Database(e),
        })?;

        tracing::info!(store_id = model.id, "Created store");
        Ok(Store::from_parts(model, vec![], vec![]))
    }

    async fn get_by_id(&self, id: i32) -> StoreResult<Option<Store>> {
        match StoreEntity::find_by_id(id).one(&self.db).await? {
            Some(model) => Ok(Some(self.with_children(model).await?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> StoreResult<Vec<Store>> {
        let stores = StoreEntity::find()
            .order_by_asc(store::Column::Id)
            .all(&self.db)
            .await?;
        let items = stores.load_many(Item, &self.db).await?;
        let tags = stores.load_many(Tag, &self.db).await?;

        Ok(stores
            .into_iter()
            .zip(items)
            .zip(tags)
            .map(|((model, items), tags)| Store::from_parts(model, items, tags))
            .collect())
    }

    async fn delete(&self, id: i32) -> StoreResult<bool> {
        let txn = self.db.begin().await?;

        if StoreEntity::find_by_id(id).one(&txn).await?.is_none() {
            return Ok(false);
        }

        // Children first, so this works without foreign key enforcement too
        let store_items = Query::select()
            .column(item::Column::Id)
            .from(Item)
            .and_where(item::Column::StoreId.eq(id))
            .to_owned();
        let store_tags = Query::select()
            .column(tag::Column::Id)
            .from(Tag)
            .and_where(tag::Column::StoreId.eq(id))
            .to_owned();

        ItemTag::delete_many()
            .filter(
                item_tag::Column::ItemId
                    .in_subquery(store_items)
                    .or(item_tag::Column::TagId.in_subquery(store_tags)),
            )
            .exec(&txn)
            .await?;
        let items = Item::delete_many()
            .filter(item::Column::StoreId.eq(id))
            .exec(&txn)
            .await?;
        let tags = Tag::delete_many()
            .filter(tag::Column::StoreId.eq(id))
            .exec(&txn)
            .await?;
        StoreEntity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        tracing::info!(
            store_id = id,
            items_deleted = items.rows_affected,
            tags_deleted = tags.rows_affected,
            "Deleted store"
        );
        Ok(true)
    }

    async fn exists_by_name(&self, name: &str) -> StoreResult<bool> {
        let count = StoreEntity::find()
            .filter(store::Column::Name.eq(name))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }
}
