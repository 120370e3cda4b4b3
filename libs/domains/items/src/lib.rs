//! Items Domain
//!
//! Priced items that belong to a store. Every route requires a valid access
//! token.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, behind the access-token gate
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business rules (owning store, unique names, upsert)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + sea-orm implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Views, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_items::{handlers, ItemService, SqlItemRepository};
//!
//! # fn example(db: sea_orm::DatabaseConnection, gate: axum_helpers::AuthGate) {
//! let service = ItemService::new(SqlItemRepository::new(db));
//! let router = handlers::router(service, gate);
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod sql;

// Re-export commonly used types
pub use error::{ItemError, ItemResult};
pub use handlers::ApiDoc;
pub use models::{CreateItem, Item, UpdateItem};
pub use repository::ItemRepository;
pub use service::ItemService;
pub use sql::SqlItemRepository;
