//! Custom extractors for Axum handlers.
//!
//! Rejections render through [`crate::AppError`], so malformed ids and bodies
//! get the same error shape as every other failure.

pub mod id_path;
pub mod validated_json;

pub use id_path::{IdPairPath, IdPath};
pub use validated_json::ValidatedJson;
