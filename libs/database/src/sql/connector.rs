use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use super::DatabaseConfig;
use crate::common::DatabaseError;

/// Open a connection pool for `config`.
///
/// No retries: a failure here is a startup failure and is returned to the caller.
///
/// # Example
/// ```ignore
/// use database::sql::{connect, DatabaseConfig};
///
/// let db = connect(&DatabaseConfig::resolve(None)).await?;
/// ```
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let backend = if config.url.starts_with("postgres") {
        "PostgreSQL"
    } else {
        "SQLite"
    };

    let db = Database::connect(config.clone().into_connect_options()).await?;

    info!(backend, in_memory = config.is_in_memory_sqlite(), "Connected to database");

    Ok(db)
}

/// Ensure every table exists.
///
/// Applies all pending migrations of `M`. Migrations create tables with
/// `IF NOT EXISTS` and applied ones are recorded, so calling this on every
/// startup is safe and a second call is a no-op.
///
/// # Example
/// ```ignore
/// use migration::Migrator;
/// use database::sql::create_schema;
///
/// create_schema::<Migrator>(&db).await?;
/// ```
pub async fn create_schema<M: MigratorTrait>(db: &DatabaseConnection) -> Result<(), DatabaseError> {
    info!("Ensuring database schema exists...");
    M::up(db, None)
        .await
        .map_err(|e| DatabaseError::SchemaError(e.to_string()))?;
    info!("Database schema ready");
    Ok(())
}
