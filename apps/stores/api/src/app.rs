//! Application assembly: storage, auth gate, domain routers, documentation.

use axum::Router;
use axum_helpers::{
    AuthGate, InMemoryBlocklist, JwtAuth, RedisBlocklist, TokenBlocklist,
    create_router_with_openapi, health_router, serve,
};
use database::redis::ConnectionManager;
use database::sql::{self, DatabaseConnection};
use domain_items::{ItemService, SqlItemRepository};
use domain_stores::{SqlStoreRepository, StoreService};
use domain_tags::{SqlTagRepository, TagService};
use domain_users::{SqlUserRepository, UserService};
use eyre::WrapErr;
use migration::Migrator;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::config::{BlocklistBackend, Config};
use crate::openapi::api_doc;
use crate::ready::{ReadyState, ready_router};

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

/// A fully wired application, ready to serve.
pub struct Application {
    config: Config,
    db: DatabaseConnection,
    gate: AuthGate,
    router: Router,
}

/// Connect storage, ensure the schema, and mount every route.
///
/// Safe to call repeatedly against the same database: schema creation is
/// idempotent.
pub async fn build_app(config: Config) -> eyre::Result<Application> {
    let db = sql::connect(&config.database)
        .await
        .wrap_err("Database connection failed")?;
    sql::create_schema::<Migrator>(&db)
        .await
        .wrap_err("Schema creation failed")?;

    let (blocklist, redis): (Arc<dyn TokenBlocklist>, Option<ConnectionManager>) =
        match &config.blocklist {
            BlocklistBackend::Memory => {
                info!("Token blocklist: in-memory");
                (Arc::new(InMemoryBlocklist::new()), None)
            }
            BlocklistBackend::Redis(redis_config) => {
                let conn = database::redis::connect_from_config(redis_config)
                    .await
                    .wrap_err("Redis connection failed")?;
                info!("Token blocklist: redis");
                (Arc::new(RedisBlocklist::new(conn.clone())), Some(conn))
            }
        };
    let gate = AuthGate::new(JwtAuth::new(&config.jwt), blocklist);

    let api_routes = Router::new()
        .merge(domain_stores::handlers::router(StoreService::new(
            SqlStoreRepository::new(db.clone()),
        )))
        .merge(domain_items::handlers::router(
            ItemService::new(SqlItemRepository::new(db.clone())),
            gate.clone(),
        ))
        .merge(domain_tags::handlers::router(TagService::new(
            SqlTagRepository::new(db.clone()),
        )))
        .merge(domain_users::router(
            UserService::new(SqlUserRepository::new(db.clone())),
            gate.clone(),
        ));

    let openapi = api_doc(&config.api_title, &config.api_version);
    let router = create_router_with_openapi(api_routes, openapi)?
        .merge(health_router(config.app))
        .merge(ready_router(ReadyState {
            db: db.clone(),
            redis,
        }));

    info!(
        title = %config.api_title,
        version = %config.api_version,
        "Application assembled"
    );

    Ok(Application {
        config,
        db,
        gate,
        router,
    })
}

impl Application {
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// The gate guarding protected routes; shares its blocklist with them.
    pub fn gate(&self) -> &AuthGate {
        &self.gate
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Serve until SIGINT/SIGTERM, then close the database pool.
    pub async fn serve(self) -> eyre::Result<()> {
        let Self {
            config, db, router, ..
        } = self;

        serve(router, &config.server, SHUTDOWN_TIMEOUT, async move {
            info!("Shutting down: closing database connections");
            match db.close().await {
                Ok(()) => info!("Database connection closed successfully"),
                Err(e) => tracing::error!("Error closing database: {}", e),
            }
        })
        .await
        .wrap_err("Server error")?;

        info!("Stores API shutdown complete");
        Ok(())
    }
}
