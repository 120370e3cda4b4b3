//! Users Domain
//!
//! Accounts and the token flows built on them:
//! - `POST /register`, `POST /login` issue credentials
//! - `POST /refresh` trades a refresh token for a new access token, once
//! - `POST /logout` revokes the presented access token
//! - `GET`/`DELETE /user/{id}`
//!
//! Passwords are stored as Argon2 PHC strings and never leave this crate.

pub mod auth_handlers;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod sql;

// Re-export commonly used types
pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{AccessTokenResponse, Credentials, TokenPair, User};
pub use repository::UserRepository;
pub use service::UserService;
pub use sql::SqlUserRepository;

use axum::Router;
use axum_helpers::AuthGate;

/// Account routes plus the token flows, ready to merge into the app.
pub fn router<R: UserRepository + 'static>(service: UserService<R>, gate: AuthGate) -> Router {
    handlers::router(service.clone()).merge(auth_handlers::router(service, gate))
}
