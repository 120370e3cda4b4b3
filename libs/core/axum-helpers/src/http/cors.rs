use axum::http::{HeaderValue, Method, header};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Environment variable holding comma-separated allowed origins.
pub const CORS_ALLOWED_ORIGIN_ENV: &str = "CORS_ALLOWED_ORIGIN";

#[derive(Debug, thiserror::Error)]
pub enum CorsError {
    #[error("CORS_ALLOWED_ORIGIN cannot be empty")]
    Empty,

    #[error("Invalid CORS_ALLOWED_ORIGIN value: {0}")]
    InvalidOrigin(String),
}

/// Parse a comma-separated origin list. Blank entries are skipped.
pub fn parse_origins(origins: &str) -> Result<Vec<HeaderValue>, CorsError> {
    let parsed = origins
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<HeaderValue>()
                .map_err(|_| CorsError::InvalidOrigin(s.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if parsed.is_empty() {
        return Err(CorsError::Empty);
    }
    Ok(parsed)
}

/// Creates a CORS layer for the given origins.
///
/// Returns a configured `CorsLayer` with:
/// - Common HTTP methods (GET, POST, PUT, DELETE, PATCH, OPTIONS)
/// - Content-Type, Authorization and Accept headers
/// - 1 hour max age
pub fn create_cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

/// CORS layer from `CORS_ALLOWED_ORIGIN`, or `None` when the variable is unset.
pub fn cors_layer_from_env() -> Result<Option<CorsLayer>, CorsError> {
    match std::env::var(CORS_ALLOWED_ORIGIN_ENV) {
        Ok(origins) => {
            let parsed = parse_origins(&origins)?;
            tracing::info!("CORS configured with allowed origins: {}", origins);
            Ok(Some(create_cors_layer(parsed)))
        }
        Err(_) => Ok(None),
    }
}
