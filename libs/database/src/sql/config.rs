use sea_orm::ConnectOptions;
use std::time::Duration;
use tracing::log::LevelFilter;

#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_parse_or};

/// Connection string used when neither an override nor `DATABASE_URL` is given.
///
/// A file-backed SQLite database named `data.db` in the working directory,
/// created on first use.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data.db?mode=rwc";

/// Environment variable holding the connection string.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// SQL database configuration
///
/// Holds the connection string and pool settings. The URL decides the backend:
/// `sqlite://...` / `sqlite::memory:` or `postgres://...`.
///
/// # Example
///
/// ```ignore
/// use database::sql::DatabaseConfig;
///
/// // Explicit override wins, then DATABASE_URL, then sqlite://data.db
/// let config = DatabaseConfig::resolve(Some("sqlite::memory:"));
///
/// // From environment variables (requires `config` feature)
/// let config = DatabaseConfig::from_env()?;
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Database connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Enable SQL statement logging
    pub sqlx_logging: bool,
}

impl DatabaseConfig {
    /// Create a config for `url` with default pool settings
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Picks the connection string: `override_url`, else `DATABASE_URL`,
    /// else [`DEFAULT_DATABASE_URL`].
    pub fn resolve_url(override_url: Option<&str>) -> String {
        override_url
            .map(str::to_owned)
            .or_else(|| std::env::var(DATABASE_URL_ENV).ok())
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
    }

    /// Config for the resolved connection string with default pool settings.
    pub fn resolve(override_url: Option<&str>) -> Self {
        Self::new(Self::resolve_url(override_url))
    }

    /// Whether the URL points to a private in-memory SQLite database.
    ///
    /// Every connection to such a database sees its own empty schema.
    pub fn is_in_memory_sqlite(&self) -> bool {
        self.url.starts_with("sqlite:") && self.url.contains(":memory:")
    }

    /// Convert this config into SeaORM ConnectOptions
    pub fn into_connect_options(self) -> ConnectOptions {
        let in_memory = self.is_in_memory_sqlite();
        let mut opt = ConnectOptions::new(&self.url);

        opt.connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .acquire_timeout(Duration::from_secs(self.connect_timeout_secs))
            .sqlx_logging(self.sqlx_logging)
            .sqlx_logging_level(LevelFilter::Debug);

        if in_memory {
            // A single long-lived connection keeps the in-memory schema alive.
            let day = Duration::from_secs(24 * 60 * 60);
            opt.max_connections(1)
                .min_connections(1)
                .idle_timeout(day)
                .max_lifetime(day);
        } else {
            opt.max_connections(self.max_connections)
                .min_connections(self.min_connections);
        }

        opt
    }

    /// Get a reference to the database URL
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 8,
            sqlx_logging: false,
        }
    }
}

#[cfg(feature = "config")]
impl DatabaseConfig {
    /// Like [`FromEnv::from_env`], but `override_url` takes precedence over
    /// `DATABASE_URL`.
    pub fn from_env_with_override(override_url: Option<&str>) -> Result<Self, ConfigError> {
        Ok(Self {
            url: Self::resolve_url(override_url),
            max_connections: env_parse_or("DB_MAX_CONNECTIONS", "10")?,
            min_connections: env_parse_or("DB_MIN_CONNECTIONS", "1")?,
            connect_timeout_secs: env_parse_or("DB_CONNECT_TIMEOUT_SECS", "8")?,
            sqlx_logging: env_parse_or("DB_SQLX_LOGGING", "false")?,
        })
    }
}

/// Load DatabaseConfig from environment variables
///
/// Environment variables:
/// - `DATABASE_URL` (optional, default: `sqlite://data.db?mode=rwc`)
/// - `DB_MAX_CONNECTIONS` (optional, default: 10)
/// - `DB_MIN_CONNECTIONS` (optional, default: 1)
/// - `DB_CONNECT_TIMEOUT_SECS` (optional, default: 8)
/// - `DB_SQLX_LOGGING` (optional, default: false)
#[cfg(feature = "config")]
impl FromEnv for DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with_override(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_falls_back_to_data_db() {
        temp_env::with_var_unset(DATABASE_URL_ENV, || {
            let config = DatabaseConfig::resolve(None);
            assert_eq!(config.url, DEFAULT_DATABASE_URL);
            assert!(config.url.contains("data.db"));
        });
    }

    #[test]
    fn test_resolve_reads_database_url() {
        temp_env::with_var(DATABASE_URL_ENV, Some("postgres://localhost/stores"), || {
            let config = DatabaseConfig::resolve(None);
            assert_eq!(config.url, "postgres://localhost/stores");
        });
    }

    #[test]
    fn test_resolve_override_wins_over_env() {
        temp_env::with_var(DATABASE_URL_ENV, Some("postgres://localhost/stores"), || {
            let config = DatabaseConfig::resolve(Some("sqlite::memory:"));
            assert_eq!(config.url, "sqlite::memory:");
        });
    }

    #[test]
    fn test_resolve_ignores_blank_env() {
        temp_env::with_var(DATABASE_URL_ENV, Some("  "), || {
            assert_eq!(DatabaseConfig::resolve_url(None), DEFAULT_DATABASE_URL);
        });
    }

    #[test]
    fn test_in_memory_detection() {
        assert!(DatabaseConfig::new("sqlite::memory:").is_in_memory_sqlite());
        assert!(!DatabaseConfig::new(DEFAULT_DATABASE_URL).is_in_memory_sqlite());
        assert!(!DatabaseConfig::new("postgres://localhost/db").is_in_memory_sqlite());
    }

    #[test]
    fn test_default_pool_settings() {
        let config = DatabaseConfig::default();
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 1);
        assert_eq!(config.connect_timeout_secs, 8);
        assert!(!config.sqlx_logging);
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_from_env_custom_pool() {
        temp_env::with_vars(
            [
                (DATABASE_URL_ENV, Some("postgres://localhost/stores")),
                ("DB_MAX_CONNECTIONS", Some("50")),
                ("DB_MIN_CONNECTIONS", Some("5")),
                ("DB_CONNECT_TIMEOUT_SECS", Some("15")),
                ("DB_SQLX_LOGGING", Some("true")),
            ],
            || {
                let config = DatabaseConfig::from_env().unwrap();
                assert_eq!(config.url, "postgres://localhost/stores");
                assert_eq!(config.max_connections, 50);
                assert_eq!(config.min_connections, 5);
                assert_eq!(config.connect_timeout_secs, 15);
                assert!(config.sqlx_logging);
            },
        );
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_from_env_invalid_number() {
        temp_env::with_var("DB_MAX_CONNECTIONS", Some("lots"), || {
            let err = DatabaseConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("DB_MAX_CONNECTIONS"));
        });
    }
}
