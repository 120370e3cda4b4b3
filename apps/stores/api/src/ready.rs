//! Readiness check against the database and, when configured, Redis.

use axum::{Router, extract::State, response::IntoResponse, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use database::redis::ConnectionManager;
use sea_orm::DatabaseConnection;

#[derive(Clone)]
pub struct ReadyState {
    pub db: DatabaseConnection,
    /// Only set when the token blocklist lives in Redis
    pub redis: Option<ConnectionManager>,
}

async fn ready_handler(State(state): State<ReadyState>) -> impl IntoResponse {
    let mut checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "database",
        Box::pin(async {
            database::sql::check_health(&state.db)
                .await
                .map_err(|e| format!("Database ping failed: {}", e))
        }),
    )];

    if let Some(redis) = &state.redis {
        let mut conn = redis.clone();
        checks.push((
            "redis",
            Box::pin(async move {
                database::redis::check_health(&mut conn)
                    .await
                    .map_err(|e| format!("Redis ping failed: {}", e))
            }),
        ));
    }

    run_health_checks(checks).await
}

/// Router with `GET /ready`
pub fn ready_router(state: ReadyState) -> Router {
    Router::new()
        .route("/ready", get(ready_handler))
        .with_state(state)
}
