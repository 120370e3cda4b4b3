//! Database library providing connectors and utilities for the relational store
//! (SQLite or PostgreSQL through SeaORM) and Redis.
//!
//! # Features
//!
//! - `sql` (default) - SeaORM connection pool, schema creation and health checks
//! - `redis` (default) - Redis connection manager and health checks
//! - `config` - Configuration support with `core_config::FromEnv`
//! - `all` - All features
//!
//! # Examples
//!
//! ## SQL
//!
//! ```ignore
//! use database::sql::{self, DatabaseConfig};
//! use migration::Migrator;
//!
//! let config = DatabaseConfig::resolve(None); // DATABASE_URL or sqlite://data.db
//! let db = sql::connect(&config).await?;
//! sql::create_schema::<Migrator>(&db).await?;
//! ```
//!
//! ## Redis
//!
//! ```ignore
//! use database::redis;
//! use redis::AsyncCommands;
//!
//! let mut conn = redis::connect("redis://127.0.0.1:6379").await?;
//! conn.set::<_, _, ()>("key", "value").await?;
//! ```

pub mod common;

#[cfg(feature = "sql")]
pub mod sql;

#[cfg(feature = "redis")]
pub mod redis;

pub use common::{DatabaseError, DatabaseResult};
