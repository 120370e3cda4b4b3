use async_trait::async_trait;
use entity::prelude::User;
use entity::user;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, SqlErr,
};

use crate::{
    error::{UserError, UserResult},
    repository::UserRepository,
};

/// sea-orm backed user repository (SQLite or Postgres)
#[derive(Clone)]
pub struct SqlUserRepository {
    db: DatabaseConnection,
}

impl SqlUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for SqlUserRepository {
    async fn create(&self, username: &str, password_hash: &str) -> UserResult<user::Model> {
        let model = user::ActiveModel {
            username: Set(username.to_string()),
            password_hash: Set(password_hash.to_string()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                UserError::DuplicateUsername(username.to_string())
            }
            _ => UserError::Database(e),
        })?;

        tracing::info!(user_id = model.id, "Created user");
        Ok(model)
    }

    async fn get_by_id(&self, id: i32) -> UserResult<Option<user::Model>> {
        Ok(User::find_by_id(id).one(&self.db).await?)
    }

    async fn get_by_username(&self, username: &str) -> UserResult<Option<user::Model>> {
        Ok(User::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?)
    }

    async fn delete(&self, id: i32) -> UserResult<bool> {
        let result = User::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected > 0 {
            tracing::info!(user_id = id, "Deleted user");
        }
        Ok(result.rows_affected > 0)
    }

    async fn username_exists(&self, username: &str) -> UserResult<bool> {
        let count = User::find()
            .filter(user::Column::Username.eq(username))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }
}
