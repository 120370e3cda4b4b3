use super::shutdown::shutdown_signal;
use crate::errors::handlers::{method_not_allowed, not_found};
use crate::http::{CorsError, cors_layer_from_env, security_headers};
use axum::{Router, middleware};
use core_config::server::ServerConfig;
use std::future::Future;
use std::io;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

/// Where the generated OpenAPI document is served.
pub const OPENAPI_JSON_PATH: &str = "/openapi.json";

/// Creates a configured Axum router with common middleware and documentation.
///
/// This function sets up:
/// - OpenAPI documentation (`/openapi.json`, Swagger UI at `/swagger-ui`, ReDoc at `/redoc`)
/// - API routes mounted at the root
/// - Common middleware (tracing, security headers, compression)
/// - CORS, only when `CORS_ALLOWED_ORIGIN` is set
/// - JSON 404 fallback
///
/// The document is taken by value so callers can merge domain docs or set the
/// configured title first. Domain routers should apply their own state before
/// being passed in.
///
/// # Errors
/// Returns an error if `CORS_ALLOWED_ORIGIN` is set but empty or malformed.
///
/// # Example
/// ```ignore
/// let mut doc = ApiDoc::openapi();
/// doc.info.title = config.api_title.clone();
///
/// let api_routes = Router::new()
///     .route("/store", get(list_stores))
///     .with_state(state);
///
/// let router = create_router_with_openapi(api_routes, doc)?;
/// ```
pub fn create_router_with_openapi(
    apis: Router,
    openapi: utoipa::openapi::OpenApi,
) -> Result<Router, CorsError> {
    let mut router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url(OPENAPI_JSON_PATH, openapi.clone()))
        .merge(Redoc::with_url("/redoc", openapi))
        .merge(apis)
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers));

    if let Some(cors) = cors_layer_from_env()? {
        router = router.layer(cors);
    }

    // Compresses responses based on the Accept-Encoding header
    Ok(router.layer(CompressionLayer::new()))
}

/// Serve `router` until SIGINT/SIGTERM, then run `cleanup`.
///
/// In-flight requests finish before `cleanup` starts. `cleanup` is given at
/// most `shutdown_timeout` to complete.
///
/// # Example
/// ```ignore
/// let db = state.db.clone();
/// serve(router, &config.server, Duration::from_secs(30), async move {
///     db.close().await.ok();
/// })
/// .await?;
/// ```
pub async fn serve<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
    match tokio::time::timeout(shutdown_timeout, cleanup).await {
        Ok(()) => info!("Cleanup completed successfully"),
        Err(_) => tracing::warn!(
            "Cleanup exceeded timeout of {:?}, forcing shutdown",
            shutdown_timeout
        ),
    }

    serve_result
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;
    use utoipa::OpenApi;

    #[derive(OpenApi)]
    #[openapi(info(title = "Test API", version = "v1"))]
    struct TestDoc;

    fn router() -> Router {
        temp_env::with_var_unset("CORS_ALLOWED_ORIGIN", || {
            create_router_with_openapi(
                Router::new().route("/ping", get(|| async { "pong" })),
                TestDoc::openapi(),
            )
            .unwrap()
        })
    }

    async fn get_path(router: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_routes_mounted_at_root() {
        let (status, body) = get_path(router(), "/ping").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"pong");
    }

    #[tokio::test]
    async fn test_openapi_json_served() {
        let (status, body) = get_path(router(), OPENAPI_JSON_PATH).await;
        assert_eq!(status, StatusCode::OK);

        let doc: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(doc["info"]["title"], "Test API");
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let (status, body) = get_path(router(), "/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_runtime_document() {
        let mut doc = TestDoc::openapi();
        doc.info.title = "Configured".to_string();
        let router = temp_env::with_var_unset("CORS_ALLOWED_ORIGIN", || {
            create_router_with_openapi(Router::new(), doc).unwrap()
        });

        let (_, body) = get_path(router, OPENAPI_JSON_PATH).await;
        let doc: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(doc["info"]["title"], "Configured");
    }

    #[test]
    fn test_bad_cors_env_fails() {
        temp_env::with_var("CORS_ALLOWED_ORIGIN", Some(" , "), || {
            assert!(create_router_with_openapi(Router::new(), TestDoc::openapi()).is_err());
        });
    }
}
