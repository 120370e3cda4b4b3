//! Revoked-token stores.
//!
//! The gate only ever asks "is this `jti` revoked?" and "revoke this `jti`";
//! where the set lives is up to the implementation.

use async_trait::async_trait;
use redis::{AsyncCommands, aio::ConnectionManager};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Error)]
pub enum BlocklistError {
    #[error("blocklist backend unavailable: {0}")]
    Backend(String),
}

impl From<redis::RedisError> for BlocklistError {
    fn from(err: redis::RedisError) -> Self {
        BlocklistError::Backend(err.to_string())
    }
}

/// Set of revoked token ids.
#[async_trait]
pub trait TokenBlocklist: Send + Sync {
    /// True iff `jti` has been revoked. No side effects.
    async fn contains(&self, jti: &str) -> Result<bool, BlocklistError>;

    /// Revoke `jti`. `ttl` is how long the token could still be presented;
    /// stores may forget the entry after that.
    ///
    /// Returns true iff this call revoked it. Concurrent calls for the same
    /// `jti` see true exactly once.
    async fn add(&self, jti: &str, ttl: Duration) -> Result<bool, BlocklistError>;
}

/// Process-local blocklist.
///
/// Entries are never evicted, so memory grows with the number of logouts over
/// the process lifetime.
#[derive(Debug, Default, Clone)]
pub struct InMemoryBlocklist {
    revoked: Arc<RwLock<HashSet<String>>>,
}

impl InMemoryBlocklist {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.revoked.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.revoked.read().await.is_empty()
    }
}

#[async_trait]
impl TokenBlocklist for InMemoryBlocklist {
    async fn contains(&self, jti: &str) -> Result<bool, BlocklistError> {
        Ok(self.revoked.read().await.contains(jti))
    }

    async fn add(&self, jti: &str, _ttl: Duration) -> Result<bool, BlocklistError> {
        Ok(self.revoked.write().await.insert(jti.to_string()))
    }
}

/// Redis-backed blocklist shared by every replica.
///
/// Each revoked id is a key `jwt:blocklist:{jti}` that expires together with
/// the token.
#[derive(Clone)]
pub struct RedisBlocklist {
    conn: ConnectionManager,
}

impl RedisBlocklist {
    pub fn new(conn: ConnectionManager) -> Self {
        tracing::info!("Redis token blocklist initialized");
        Self { conn }
    }

    pub fn key(jti: &str) -> String {
        format!("jwt:blocklist:{}", jti)
    }

    /// Connection used by the readiness probe.
    pub fn connection(&self) -> ConnectionManager {
        self.conn.clone()
    }
}

#[async_trait]
impl TokenBlocklist for RedisBlocklist {
    async fn contains(&self, jti: &str) -> Result<bool, BlocklistError> {
        let mut conn = self.conn.clone();
        let exists: bool = conn.exists(Self::key(jti)).await?;
        Ok(exists)
    }

    async fn add(&self, jti: &str, ttl: Duration) -> Result<bool, BlocklistError> {
        let mut conn = self.conn.clone();
        // EX rejects a zero expiry
        let ttl_secs = ttl.as_secs().max(1);
        // NX replies nil when the key already exists
        let set: Option<String> = redis::cmd("SET")
            .arg(Self::key(jti))
            .arg("1")
            .arg("NX")
            .arg("EX")
            .arg(ttl_secs)
            .query_async(&mut conn)
            .await?;
        Ok(set.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_add_then_contains() {
        let blocklist = InMemoryBlocklist::new();
        assert!(!blocklist.contains("abc123").await.unwrap());

        blocklist.add("abc123", Duration::from_secs(60)).await.unwrap();

        assert!(blocklist.contains("abc123").await.unwrap());
        assert!(!blocklist.contains("other").await.unwrap());
        assert_eq!(blocklist.len().await, 1);
    }

    #[tokio::test]
    async fn test_in_memory_add_reports_first_revocation_only() {
        let blocklist = InMemoryBlocklist::new();
        assert!(blocklist.add("abc123", Duration::ZERO).await.unwrap());
        assert!(!blocklist.add("abc123", Duration::ZERO).await.unwrap());
        assert_eq!(blocklist.len().await, 1);
    }

    #[tokio::test]
    async fn test_in_memory_concurrent_adds_of_one_jti() {
        let blocklist = InMemoryBlocklist::new();
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let blocklist = blocklist.clone();
                tokio::spawn(async move {
                    blocklist.add("abc123", Duration::from_secs(1)).await.unwrap()
                })
            })
            .collect();
        let newly: Vec<bool> = futures::future::join_all(handles)
            .await
            .into_iter()
            .map(|r| r.unwrap())
            .collect();

        assert_eq!(newly.iter().filter(|n| **n).count(), 1);
    }

    #[tokio::test]
    async fn test_in_memory_clones_share_state() {
        let blocklist = InMemoryBlocklist::new();
        let shared: Arc<dyn TokenBlocklist> = Arc::new(blocklist.clone());

        shared.add("abc123", Duration::from_secs(1)).await.unwrap();
        assert!(blocklist.contains("abc123").await.unwrap());
    }

    #[tokio::test]
    async fn test_in_memory_concurrent_writers() {
        let blocklist = InMemoryBlocklist::new();
        let handles: Vec<_> = (0..32)
            .map(|i| {
                let blocklist = blocklist.clone();
                tokio::spawn(async move {
                    blocklist
                        .add(&format!("jti-{i}"), Duration::from_secs(1))
                        .await
                        .unwrap();
                })
            })
            .collect();
        futures::future::join_all(handles).await;

        assert_eq!(blocklist.len().await, 32);
    }

    #[test]
    fn test_redis_key_format() {
        assert_eq!(RedisBlocklist::key("abc123"), "jwt:blocklist:abc123");
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_redis_add_then_contains() {
        let redis = test_utils::TestRedis::new().await;
        let blocklist = RedisBlocklist::new(redis.connection());

        let jti = uuid::Uuid::new_v4().to_string();
        assert!(!blocklist.contains(&jti).await.unwrap());
        assert!(blocklist.add(&jti, Duration::from_secs(5)).await.unwrap());
        assert!(blocklist.contains(&jti).await.unwrap());
        assert!(!blocklist.add(&jti, Duration::from_secs(5)).await.unwrap());
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_redis_zero_ttl_still_revokes() {
        let redis = test_utils::TestRedis::new().await;
        let blocklist = RedisBlocklist::new(redis.connection());

        blocklist.add("abc123", Duration::ZERO).await.unwrap();
        assert!(blocklist.contains("abc123").await.unwrap());
    }
}
