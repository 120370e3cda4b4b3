/// Unified database error type for all database operations
///
/// This provides a consistent error interface across the SQL store and Redis.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// SQL errors (SeaORM)
    #[cfg(feature = "sql")]
    #[error("SQL error: {0}")]
    Sql(#[from] sea_orm::DbErr),

    /// Redis-specific errors
    #[cfg(feature = "redis")]
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// Health check failed
    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),

    /// Schema creation failed
    #[error("Schema creation failed: {0}")]
    SchemaError(String),
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;
