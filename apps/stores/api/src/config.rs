use axum_helpers::JwtConfig;
use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_or_default, server::ServerConfig};
use database::redis::RedisConfig;
use database::sql::DatabaseConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

pub const DEFAULT_API_TITLE: &str = "Stores REST API";
pub const DEFAULT_API_VERSION: &str = "v1";

/// Where revoked token ids are kept
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlocklistBackend {
    /// Process memory; lost on restart
    Memory,
    Redis(RedisConfig),
}

impl FromEnv for BlocklistBackend {
    /// `BLOCKLIST_BACKEND` is `memory` (default) or `redis`, the latter
    /// requiring `REDIS_URL`.
    fn from_env() -> Result<Self, ConfigError> {
        let backend = env_or_default("BLOCKLIST_BACKEND", "memory");
        match backend.to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "redis" => Ok(Self::Redis(RedisConfig::from_env()?)),
            other => Err(ConfigError::ParseError {
                key: "BLOCKLIST_BACKEND".to_string(),
                details: format!("expected 'memory' or 'redis', got '{}'", other),
            }),
        }
    }
}

/// Application configuration, composed from the shared config pieces
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub blocklist: BlocklistBackend,
    pub api_title: String,
    pub api_version: String,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_env_with_database(None)
    }

    /// Like [`Config::from_env`], but `database_url` wins over `DATABASE_URL`.
    pub fn from_env_with_database(database_url: Option<&str>) -> eyre::Result<Self> {
        Ok(Self {
            app: app_info!(),
            database: DatabaseConfig::from_env_with_override(database_url)?,
            server: ServerConfig::from_env()?,
            jwt: JwtConfig::from_env()?, // Required - will fail if JWT_SECRET is not set
            blocklist: BlocklistBackend::from_env()?,
            api_title: env_or_default("API_TITLE", DEFAULT_API_TITLE),
            api_version: env_or_default("API_VERSION", DEFAULT_API_VERSION),
            environment: Environment::from_env(),
        })
    }

    /// Defaults for everything but the database and the signing secret.
    pub fn new(database: DatabaseConfig, jwt: JwtConfig) -> Self {
        Self {
            app: app_info!(),
            database,
            server: ServerConfig::default(),
            jwt,
            blocklist: BlocklistBackend::Memory,
            api_title: DEFAULT_API_TITLE.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            environment: Environment::Development,
        }
    }
}
