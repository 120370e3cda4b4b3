use super::config::JwtConfig;
use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

/// Which flow a token belongs to. Access routes reject refresh tokens and the
/// other way round.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,      // Subject (user ID)
    pub username: String, // Login name
    pub exp: i64,         // Expiration time
    pub iat: i64,         // Issued at
    pub jti: String,      // JWT ID, the revocation key
    #[serde(rename = "type")]
    pub token_type: TokenType,
}

impl JwtClaims {
    /// Fresh claims valid for `ttl_seconds` from now, with a random `jti`.
    pub fn new(sub: &str, username: &str, token_type: TokenType, ttl_seconds: i64) -> Self {
        let now = Utc::now();
        Self {
            sub: sub.to_string(),
            username: username.to_string(),
            exp: (now + Duration::seconds(ttl_seconds)).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
            token_type,
        }
    }

    /// Seconds until `exp`, or zero when already past it.
    pub fn remaining_ttl_secs(&self) -> u64 {
        (self.exp - Utc::now().timestamp()).max(0) as u64
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token has expired")]
    Expired,

    #[error("invalid token: {0}")]
    Invalid(String),

    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// HS256 token issuer and verifier.
#[derive(Clone)]
pub struct JwtAuth {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
}

impl JwtAuth {
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        tracing::info!(
            access_ttl_secs = config.access_ttl_secs,
            refresh_ttl_secs = config.refresh_ttl_secs,
            "JWT auth initialized"
        );

        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            access_ttl_secs: config.access_ttl_secs,
            refresh_ttl_secs: config.refresh_ttl_secs,
        }
    }

    /// Create access token
    pub fn create_access_token(&self, user_id: &str, username: &str) -> Result<String, AuthError> {
        let claims = JwtClaims::new(user_id, username, TokenType::Access, self.access_ttl_secs);
        self.encode_claims(&claims)
    }

    /// Create refresh token
    pub fn create_refresh_token(&self, user_id: &str, username: &str) -> Result<String, AuthError> {
        let claims = JwtClaims::new(user_id, username, TokenType::Refresh, self.refresh_ttl_secs);
        self.encode_claims(&claims)
    }

    /// Sign arbitrary claims.
    pub fn encode_claims(&self, claims: &JwtClaims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Verify signature and structure, then expiry.
    ///
    /// A token with a bad signature is `Invalid` even when it is also expired.
    pub fn verify_token(&self, token: &str) -> Result<JwtClaims, AuthError> {
        decode::<JwtClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::Invalid(e.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth(secret: &str) -> JwtAuth {
        JwtAuth::new(&JwtConfig::new(secret).unwrap())
    }

    const SECRET: &str = "test-secret-key-that-is-at-least-32-characters";

    #[test]
    fn test_access_token_round_trip() {
        let jwt = auth(SECRET);
        let token = jwt.create_access_token("7", "alice").unwrap();
        let claims = jwt.verify_token(&token).unwrap();

        assert_eq!(claims.sub, "7");
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.token_type, TokenType::Access);
        assert!(claims.exp > claims.iat);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_refresh_token_has_refresh_type() {
        let jwt = auth(SECRET);
        let token = jwt.create_refresh_token("7", "alice").unwrap();
        assert_eq!(jwt.verify_token(&token).unwrap().token_type, TokenType::Refresh);
    }

    #[test]
    fn test_each_token_gets_unique_jti() {
        let jwt = auth(SECRET);
        let a = jwt.verify_token(&jwt.create_access_token("1", "a").unwrap()).unwrap();
        let b = jwt.verify_token(&jwt.create_access_token("1", "a").unwrap()).unwrap();
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn test_expired_token() {
        let jwt = auth(SECRET);
        let claims = JwtClaims::new("1", "a", TokenType::Access, -60);
        let token = jwt.encode_claims(&claims).unwrap();

        assert!(matches!(jwt.verify_token(&token), Err(AuthError::Expired)));
    }

    #[test]
    fn test_wrong_secret_is_invalid_even_when_expired() {
        let other = auth("another-secret-key-that-is-at-least-32-chars");
        let token = other
            .encode_claims(&JwtClaims::new("1", "a", TokenType::Access, -60))
            .unwrap();

        assert!(matches!(auth(SECRET).verify_token(&token), Err(AuthError::Invalid(_))));
    }

    #[test]
    fn test_garbage_is_invalid() {
        assert!(matches!(
            auth(SECRET).verify_token("not.a.jwt"),
            Err(AuthError::Invalid(_))
        ));
    }

    #[test]
    fn test_claims_serialize_type_field() {
        let claims = JwtClaims::new("1", "a", TokenType::Refresh, 60);
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["type"], "refresh");
    }

    #[test]
    fn test_remaining_ttl() {
        assert_eq!(JwtClaims::new("1", "a", TokenType::Access, -5).remaining_ttl_secs(), 0);
        assert!(JwtClaims::new("1", "a", TokenType::Access, 100).remaining_ttl_secs() <= 100);
    }
}
