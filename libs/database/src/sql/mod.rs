//! SQL connector and utilities
//!
//! Provides connection management, idempotent schema creation and health checks
//! for SQLite and PostgreSQL through SeaORM.

mod config;
mod connector;
mod health;

pub use config::{DATABASE_URL_ENV, DEFAULT_DATABASE_URL, DatabaseConfig};
pub use connector::{connect, create_schema};
pub use health::check_health;

// Re-export SeaORM types for convenience
pub use sea_orm::{DatabaseConnection, DbErr};
pub use sea_orm_migration::MigratorTrait;
