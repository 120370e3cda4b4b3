//! # Axum Helpers
//!
//! Shared building blocks for the HTTP services in this workspace.
//!
//! ## Modules
//!
//! - **[`auth`]**: JWT issuing, the revocation blocklist and the auth gate middleware
//! - **[`server`]**: Router setup, health checks, graceful shutdown
//! - **[`http`]**: HTTP middleware (CORS, security headers)
//! - **[`errors`]**: Structured error responses with error codes
//! - **[`extractors`]**: Custom extractors (integer id paths, validated JSON)
//! - **[`audit`]**: Audit logging for security-relevant actions
//! - **[`message`]**: `{"message": ...}` response body
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_router_with_openapi, serve};
//! use core_config::server::ServerConfig;
//! use std::time::Duration;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> eyre::Result<()> {
//!     let router = create_router_with_openapi(Router::new(), ApiDoc::openapi())?;
//!     serve(router, &ServerConfig::default(), Duration::from_secs(30), async {}).await?;
//!     Ok(())
//! }
//! ```

pub mod audit;
pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod message;
pub mod server;

// Re-export auth types
pub use auth::{
    AuthCallbacks, AuthClaims, AuthGate, AuthRejection, BearerSecurity, InMemoryBlocklist,
    JsonAuthCallbacks, JwtAuth, JwtClaims, JwtConfig, RedisBlocklist, TokenBlocklist, TokenType,
    require_access_token, require_refresh_token,
};

// Re-export server types
pub use server::{
    HealthCheckFuture, HealthResponse, OPENAPI_JSON_PATH, create_router_with_openapi,
    health_router, run_health_checks, serve, shutdown_signal,
};

// Re-export HTTP middleware
pub use http::{cors_layer_from_env, security_headers};

// Re-export error types
pub use errors::{AppError, ErrorCode, ErrorResponse};

// Re-export response bodies
pub use message::MessageResponse;

// Re-export extractors
pub use extractors::{IdPairPath, IdPath, ValidatedJson};

// Re-export audit types
pub use audit::{AuditEvent, AuditOutcome, extract_ip_from_headers, extract_user_agent};
