//! Stores REST API
//!
//! Wires the stores, items, tags and users domains into one HTTP service:
//! configuration from the environment, SQLite or Postgres storage, JWT auth
//! with a revocation blocklist, and OpenAPI docs at `/swagger-ui` and `/redoc`.

pub mod app;
pub mod config;
pub mod openapi;
pub mod ready;

pub use app::{Application, build_app};
pub use config::{BlocklistBackend, Config};
