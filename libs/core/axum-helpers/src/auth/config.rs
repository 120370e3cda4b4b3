//! JWT configuration, loaded through `core_config::FromEnv`.

use core_config::{ConfigError, FromEnv, env_parse_or, env_required};

/// Minimum accepted length of the signing secret.
pub const MIN_SECRET_LEN: usize = 32;

/// Longest accepted token lifetime, ten years.
pub const MAX_TTL_SECS: i64 = 10 * 365 * 24 * 60 * 60;

/// JWT authentication configuration.
///
/// Loaded from environment variables:
/// - `JWT_SECRET` (required) - at least 32 characters
/// - `JWT_ACCESS_TOKEN_TTL_SECS` (optional, default: 900)
/// - `JWT_REFRESH_TOKEN_TTL_SECS` (optional, default: 2592000)
///
/// Lifetimes must lie in `1..=MAX_TTL_SECS`.
///
/// ```ignore
/// use axum_helpers::JwtConfig;
/// use core_config::FromEnv;
///
/// let config = JwtConfig::from_env()?;
/// let config = JwtConfig::new("my-super-secret-key-that-is-at-least-32-chars")?;
/// ```
#[derive(Clone)]
pub struct JwtConfig {
    /// JWT signing secret (minimum 32 characters)
    pub secret: String,
    /// Access token lifetime in seconds
    pub access_ttl_secs: i64,
    /// Refresh token lifetime in seconds
    pub refresh_ttl_secs: i64,
}

impl JwtConfig {
    pub const DEFAULT_ACCESS_TTL_SECS: i64 = 900;
    pub const DEFAULT_REFRESH_TTL_SECS: i64 = 30 * 24 * 60 * 60;

    /// Config with default lifetimes; rejects secrets shorter than 32 characters.
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        validate_secret(&secret)?;

        Ok(Self {
            secret,
            access_ttl_secs: Self::DEFAULT_ACCESS_TTL_SECS,
            refresh_ttl_secs: Self::DEFAULT_REFRESH_TTL_SECS,
        })
    }

    pub fn with_ttls(
        mut self,
        access_ttl_secs: i64,
        refresh_ttl_secs: i64,
    ) -> Result<Self, ConfigError> {
        self.access_ttl_secs = validate_ttl("JWT_ACCESS_TOKEN_TTL_SECS", access_ttl_secs)?;
        self.refresh_ttl_secs = validate_ttl("JWT_REFRESH_TOKEN_TTL_SECS", refresh_ttl_secs)?;
        Ok(self)
    }
}

// Keep the secret out of logs.
impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("access_ttl_secs", &self.access_ttl_secs)
            .field("refresh_ttl_secs", &self.refresh_ttl_secs)
            .finish()
    }
}

fn validate_secret(secret: &str) -> Result<(), ConfigError> {
    if secret.len() < MIN_SECRET_LEN {
        return Err(ConfigError::ParseError {
            key: "JWT_SECRET".to_string(),
            details: format!(
                "must be at least {} characters (got {}). Generate one with: openssl rand -base64 32",
                MIN_SECRET_LEN,
                secret.len()
            ),
        });
    }
    Ok(())
}

fn validate_ttl(key: &str, secs: i64) -> Result<i64, ConfigError> {
    if !(1..=MAX_TTL_SECS).contains(&secs) {
        return Err(ConfigError::ParseError {
            key: key.to_string(),
            details: format!("must be between 1 and {} seconds (got {})", MAX_TTL_SECS, secs),
        });
    }
    Ok(secs)
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret = env_required("JWT_SECRET")?;
        validate_secret(&secret)?;

        Ok(Self {
            secret,
            access_ttl_secs: validate_ttl(
                "JWT_ACCESS_TOKEN_TTL_SECS",
                env_parse_or("JWT_ACCESS_TOKEN_TTL_SECS", "900")?,
            )?,
            refresh_ttl_secs: validate_ttl(
                "JWT_REFRESH_TOKEN_TTL_SECS",
                env_parse_or("JWT_REFRESH_TOKEN_TTL_SECS", "2592000")?,
            )?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "this-is-a-valid-secret-with-32-chars!";

    #[test]
    fn test_jwt_config_new_valid() {
        let config = JwtConfig::new(SECRET).unwrap();
        assert_eq!(config.secret, SECRET);
        assert_eq!(config.access_ttl_secs, 900);
        assert_eq!(config.refresh_ttl_secs, 2_592_000);
    }

    #[test]
    fn test_jwt_config_new_too_short() {
        let err = JwtConfig::new("short").unwrap_err();
        assert!(err.to_string().contains("32 characters"));
    }

    #[test]
    fn test_jwt_config_debug_redacts_secret() {
        let config = JwtConfig::new(SECRET).unwrap();
        assert!(!format!("{:?}", config).contains(SECRET));
    }

    #[test]
    fn test_jwt_config_from_env_valid() {
        temp_env::with_vars(
            [
                ("JWT_SECRET", Some(SECRET)),
                ("JWT_ACCESS_TOKEN_TTL_SECS", Some("60")),
                ("JWT_REFRESH_TOKEN_TTL_SECS", None),
            ],
            || {
                let config = JwtConfig::from_env().unwrap();
                assert_eq!(config.secret, SECRET);
                assert_eq!(config.access_ttl_secs, 60);
                assert_eq!(config.refresh_ttl_secs, 2_592_000);
            },
        );
    }

    #[test]
    fn test_jwt_config_from_env_missing() {
        temp_env::with_var_unset("JWT_SECRET", || {
            let err = JwtConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("JWT_SECRET"));
        });
    }

    #[test]
    fn test_jwt_config_from_env_too_short() {
        temp_env::with_var("JWT_SECRET", Some("short"), || {
            let err = JwtConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("32 characters"));
        });
    }

    #[test]
    fn test_with_ttls_range() {
        let config = JwtConfig::new(SECRET).unwrap().with_ttls(60, 3600).unwrap();
        assert_eq!(config.access_ttl_secs, 60);
        assert_eq!(config.refresh_ttl_secs, 3600);

        assert!(JwtConfig::new(SECRET).unwrap().with_ttls(0, 3600).is_err());
        assert!(JwtConfig::new(SECRET).unwrap().with_ttls(60, -1).is_err());
        assert!(JwtConfig::new(SECRET).unwrap().with_ttls(60, i64::MAX).is_err());
        assert!(JwtConfig::new(SECRET).unwrap().with_ttls(MAX_TTL_SECS, MAX_TTL_SECS).is_ok());
    }

    #[test]
    fn test_jwt_config_from_env_rejects_bad_ttl() {
        for (key, value) in [
            ("JWT_ACCESS_TOKEN_TTL_SECS", "0"),
            ("JWT_ACCESS_TOKEN_TTL_SECS", "-60"),
            ("JWT_REFRESH_TOKEN_TTL_SECS", "9223372036854775807"),
        ] {
            temp_env::with_vars([("JWT_SECRET", Some(SECRET)), (key, Some(value))], || {
                let err = JwtConfig::from_env().unwrap_err();
                assert!(err.to_string().contains(key), "{key}={value}: {err}");
            });
        }
    }
}
