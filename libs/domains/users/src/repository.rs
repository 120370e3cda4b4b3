use async_trait::async_trait;
use entity::user;

use crate::error::UserResult;

/// Repository trait for user accounts
///
/// Returns entity rows, password hash included; the service decides what
/// leaves the crate.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, username: &str, password_hash: &str) -> UserResult<user::Model>;

    async fn get_by_id(&self, id: i32) -> UserResult<Option<user::Model>>;

    async fn get_by_username(&self, username: &str) -> UserResult<Option<user::Model>>;

    /// Returns false if there was no such user
    async fn delete(&self, id: i32) -> UserResult<bool>;

    async fn username_exists(&self, username: &str) -> UserResult<bool>;
}
