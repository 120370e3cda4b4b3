//! Authentication module.
//!
//! This module provides:
//! - HS256 access/refresh token issuing and verification
//! - A revocation blocklist (in-process or Redis-backed)
//! - The per-request auth gate and its middleware
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::auth::{AuthGate, InMemoryBlocklist, JwtAuth, JwtConfig, require_access_token};
//! use core_config::FromEnv;
//!
//! let config = JwtConfig::from_env()?;
//! let gate = AuthGate::new(JwtAuth::new(&config), Arc::new(InMemoryBlocklist::new()));
//!
//! let protected = Router::new()
//!     .route("/item", get(handler))
//!     .route_layer(axum::middleware::from_fn_with_state(gate, require_access_token));
//! ```

pub mod blocklist;
pub mod callbacks;
pub mod config;
pub mod gate;
pub mod jwt;
pub mod middleware;
pub mod openapi;

pub use blocklist::{BlocklistError, InMemoryBlocklist, RedisBlocklist, TokenBlocklist};
pub use callbacks::{AuthCallbacks, JsonAuthCallbacks, MissingTokenResponse, TokenRejectionResponse};
pub use config::JwtConfig;
pub use gate::{AuthGate, AuthRejection};
pub use jwt::{AuthError, JwtAuth, JwtClaims, TokenType};
pub use middleware::{AuthClaims, require_access_token, require_refresh_token};
pub use openapi::{BEARER_SCHEME, BearerSecurity};
