//! Tags Domain
//!
//! Store-scoped labels and their links to items. A tag can only be attached to
//! items of its own store, and cannot be deleted while attached.

pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod sql;

// Re-export commonly used types
pub use error::{TagError, TagResult};
pub use handlers::ApiDoc;
pub use models::{CreateTag, Tag, UnlinkResponse};
pub use repository::TagRepository;
pub use service::TagService;
pub use sql::SqlTagRepository;
