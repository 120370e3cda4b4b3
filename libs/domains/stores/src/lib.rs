//! Stores Domain
//!
//! Stores are the top-level resource: every item and tag belongs to exactly
//! one store, and deleting a store deletes them too.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints (/store, /store/{id})
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business rules
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
//! use domain_stores::{handlers, SqlStoreRepository, StoreService};
//!
//! # fn example(db: sea_orm::DatabaseConnection) {
//! let service = StoreService::new(SqlStoreRepository::new(db));
//! let router = handlers::router(service);
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod sql;

// Re-export commonly used types
pub use error::{StoreError, StoreResult};
pub use handlers::ApiDoc;
pub use models::{CreateStore, Store};
pub use repository::StoreRepository;
pub use service::StoreService;
pub use sql::SqlStoreRepository;
