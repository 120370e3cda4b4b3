//! Server infrastructure module.
//!
//! This module provides:
//! - Router setup with OpenAPI documentation
//! - Health and readiness helpers
//! - Graceful shutdown with post-shutdown cleanup
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{create_router_with_openapi, health_router, serve};
//! use core_config::app_info;
//!
//! let router = create_router_with_openapi(api_routes, ApiDoc::openapi())?
//!     .merge(health_router(app_info!()));
//! serve(router, &config.server, Duration::from_secs(30), async {}).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{OPENAPI_JSON_PATH, create_router_with_openapi, serve};
pub use health::{HealthCheckFuture, HealthResponse, health_router, run_health_checks};
pub use shutdown::shutdown_signal;
