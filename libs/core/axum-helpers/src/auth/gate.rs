//! Per-request token decision.

use super::blocklist::{BlocklistError, TokenBlocklist};
use super::callbacks::{AuthCallbacks, JsonAuthCallbacks};
use super::jwt::{AuthError, JwtAuth, JwtClaims, TokenType};
use crate::errors::AppError;
use axum::{
    http::{HeaderMap, header::AUTHORIZATION},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Duration;

/// Why a request was not let through.
#[derive(Debug)]
pub enum AuthRejection {
    Missing,
    Invalid(String),
    Expired,
    Revoked(JwtClaims),
    /// The blocklist could not be consulted.
    Unavailable(String),
}

/// Decides, per request, whether a bearer token is missing, invalid, expired,
/// revoked or valid.
///
/// Checks run in that order and the first failure wins, so a revoked token is
/// always rejected once its signature and expiry have been verified.
///
/// ```ignore
/// let gate = AuthGate::new(JwtAuth::new(&config), Arc::new(InMemoryBlocklist::new()));
///
/// let protected = Router::new()
///     .route("/item", get(list_items))
///     .route_layer(axum::middleware::from_fn_with_state(gate.clone(), require_access_token));
/// ```
#[derive(Clone)]
pub struct AuthGate {
    jwt: JwtAuth,
    blocklist: Arc<dyn TokenBlocklist>,
    callbacks: Arc<dyn AuthCallbacks>,
}

impl AuthGate {
    /// Gate with the default JSON rejection bodies.
    pub fn new(jwt: JwtAuth, blocklist: Arc<dyn TokenBlocklist>) -> Self {
        Self::with_callbacks(jwt, blocklist, Arc::new(JsonAuthCallbacks))
    }

    pub fn with_callbacks(
        jwt: JwtAuth,
        blocklist: Arc<dyn TokenBlocklist>,
        callbacks: Arc<dyn AuthCallbacks>,
    ) -> Self {
        Self {
            jwt,
            blocklist,
            callbacks,
        }
    }

    pub fn jwt(&self) -> &JwtAuth {
        &self.jwt
    }

    pub fn blocklist(&self) -> &Arc<dyn TokenBlocklist> {
        &self.blocklist
    }

    /// Run the checks against the `Authorization: Bearer <token>` header.
    pub async fn authenticate(
        &self,
        headers: &HeaderMap,
        expected: TokenType,
    ) -> Result<JwtClaims, AuthRejection> {
        let token = bearer_token(headers)?;

        let claims = self.jwt.verify_token(token).map_err(|e| match e {
            AuthError::Expired => AuthRejection::Expired,
            other => AuthRejection::Invalid(other.to_string()),
        })?;

        if claims.token_type != expected {
            return Err(AuthRejection::Invalid(format!(
                "{} token required, got {}",
                expected, claims.token_type
            )));
        }

        match self.blocklist.contains(&claims.jti).await {
            Ok(true) => Err(AuthRejection::Revoked(claims)),
            Ok(false) => Ok(claims),
            Err(e) => Err(AuthRejection::Unavailable(e.to_string())),
        }
    }

    /// Render a rejection through the installed callbacks.
    pub fn reject(&self, rejection: AuthRejection) -> Response {
        match rejection {
            AuthRejection::Missing => {
                tracing::debug!("No bearer token in Authorization header");
                self.callbacks.on_missing()
            }
            AuthRejection::Invalid(reason) => {
                tracing::debug!(%reason, "Token rejected as invalid");
                self.callbacks.on_invalid(&reason)
            }
            AuthRejection::Expired => {
                tracing::debug!("Token rejected as expired");
                self.callbacks.on_expired()
            }
            AuthRejection::Revoked(claims) => {
                tracing::debug!(jti = %claims.jti, "Token rejected as revoked");
                self.callbacks.on_revoked(&claims)
            }
            AuthRejection::Unavailable(reason) => {
                tracing::error!(%reason, "Token blocklist unavailable");
                AppError::ServiceUnavailable(reason).into_response()
            }
        }
    }

    /// Add the token's `jti` to the blocklist for the rest of its lifetime.
    ///
    /// Returns false when the token was already revoked, including by a
    /// concurrent request that passed [`authenticate`](Self::authenticate)
    /// with the same token.
    pub async fn revoke(&self, claims: &JwtClaims) -> Result<bool, BlocklistError> {
        let ttl = Duration::from_secs(claims.remaining_ttl_secs());
        let newly = self.blocklist.add(&claims.jti, ttl).await?;
        if newly {
            tracing::info!(jti = %claims.jti, sub = %claims.sub, token_type = %claims.token_type, "Token revoked");
        } else {
            tracing::debug!(jti = %claims.jti, "Token was already revoked");
        }
        Ok(newly)
    }
}

/// Token from `Authorization: Bearer <token>`.
///
/// No header, or only other schemes, counts as missing. A Bearer header
/// without exactly one token after the scheme is invalid.
fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthRejection> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    let bearer = value
        .split(',')
        .map(str::trim)
        .find(|part| part.starts_with("Bearer"))
        .ok_or(AuthRejection::Missing)?;

    let mut parts = bearer.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) => Ok(token),
        _ => Err(AuthRejection::Invalid(
            "Bad Authorization header. Expected 'Authorization: Bearer <JWT>'".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::blocklist::InMemoryBlocklist;
    use crate::auth::config::JwtConfig;
    use async_trait::async_trait;
    use axum::http::{HeaderValue, StatusCode};

    const SECRET: &str = "test-secret-key-that-is-at-least-32-characters";

    fn gate_with(blocklist: Arc<dyn TokenBlocklist>) -> AuthGate {
        AuthGate::new(JwtAuth::new(&JwtConfig::new(SECRET).unwrap()), blocklist)
    }

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );
        headers
    }

    struct BrokenBlocklist;

    #[async_trait]
    impl TokenBlocklist for BrokenBlocklist {
        async fn contains(&self, _jti: &str) -> Result<bool, BlocklistError> {
            Err(BlocklistError::Backend("connection refused".into()))
        }

        async fn add(&self, _jti: &str, _ttl: Duration) -> Result<bool, BlocklistError> {
            Err(BlocklistError::Backend("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn test_missing_header() {
        let gate = gate_with(Arc::new(InMemoryBlocklist::new()));
        let result = gate.authenticate(&HeaderMap::new(), TokenType::Access).await;
        assert!(matches!(result, Err(AuthRejection::Missing)));
    }

    #[tokio::test]
    async fn test_non_bearer_scheme_counts_as_missing() {
        let gate = gate_with(Arc::new(InMemoryBlocklist::new()));
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));
        let result = gate.authenticate(&headers, TokenType::Access).await;
        assert!(matches!(result, Err(AuthRejection::Missing)));
    }

    #[tokio::test]
    async fn test_malformed_bearer_header_is_invalid() {
        let gate = gate_with(Arc::new(InMemoryBlocklist::new()));
        let token = gate.jwt().create_access_token("1", "alice").unwrap();

        for value in ["Bearer ", "Bearer", "Bearer a b", "Bearerxyz"] {
            let mut headers = HeaderMap::new();
            headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
            let result = gate.authenticate(&headers, TokenType::Access).await;
            assert!(
                matches!(result, Err(AuthRejection::Invalid(_))),
                "{value:?} should be invalid"
            );
        }

        // Bearer alongside another scheme still works
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Basic dXNlcjpwYXNz, Bearer {token}")).unwrap(),
        );
        assert!(gate.authenticate(&headers, TokenType::Access).await.is_ok());
    }

    #[tokio::test]
    async fn test_valid_access_token() {
        let gate = gate_with(Arc::new(InMemoryBlocklist::new()));
        let token = gate.jwt().create_access_token("1", "alice").unwrap();

        let claims = gate.authenticate(&bearer(&token), TokenType::Access).await.unwrap();
        assert_eq!(claims.username, "alice");
    }

    #[tokio::test]
    async fn test_wrong_token_type_is_invalid() {
        let gate = gate_with(Arc::new(InMemoryBlocklist::new()));
        let refresh = gate.jwt().create_refresh_token("1", "alice").unwrap();

        let result = gate.authenticate(&bearer(&refresh), TokenType::Access).await;
        assert!(matches!(result, Err(AuthRejection::Invalid(_))));
    }

    #[tokio::test]
    async fn test_revoked_token() {
        let blocklist = InMemoryBlocklist::new();
        let gate = gate_with(Arc::new(blocklist.clone()));
        let mut claims = JwtClaims::new("1", "alice", TokenType::Access, 300);
        claims.jti = "abc123".to_string();
        let token = gate.jwt().encode_claims(&claims).unwrap();

        assert!(gate.revoke(&claims).await.unwrap());
        assert!(blocklist.contains("abc123").await.unwrap());

        let result = gate.authenticate(&bearer(&token), TokenType::Access).await;
        assert!(matches!(result, Err(AuthRejection::Revoked(c)) if c.jti == "abc123"));
    }

    #[tokio::test]
    async fn test_second_revoke_reports_already_revoked() {
        let gate = gate_with(Arc::new(InMemoryBlocklist::new()));
        let token = gate.jwt().create_refresh_token("1", "alice").unwrap();

        // Both requests get past the gate before either revokes
        let first = gate.authenticate(&bearer(&token), TokenType::Refresh).await.unwrap();
        let second = gate.authenticate(&bearer(&token), TokenType::Refresh).await.unwrap();

        assert!(gate.revoke(&first).await.unwrap());
        assert!(!gate.revoke(&second).await.unwrap());
    }

    #[tokio::test]
    async fn test_expired_and_revoked_reports_expired() {
        let blocklist = InMemoryBlocklist::new();
        let gate = gate_with(Arc::new(blocklist.clone()));
        let claims = JwtClaims::new("1", "alice", TokenType::Access, -30);
        blocklist.add(&claims.jti, Duration::ZERO).await.unwrap();
        let token = gate.jwt().encode_claims(&claims).unwrap();

        let result = gate.authenticate(&bearer(&token), TokenType::Access).await;
        assert!(matches!(result, Err(AuthRejection::Expired)));
    }

    #[tokio::test]
    async fn test_blocklist_failure_is_unavailable() {
        let gate = gate_with(Arc::new(BrokenBlocklist));
        let token = gate.jwt().create_access_token("1", "alice").unwrap();

        let result = gate.authenticate(&bearer(&token), TokenType::Access).await;
        let rejection = result.unwrap_err();
        assert!(matches!(rejection, AuthRejection::Unavailable(_)));
        assert_eq!(gate.reject(rejection).status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_reject_uses_custom_callbacks() {
        struct Teapot;
        impl AuthCallbacks for Teapot {
            fn on_missing(&self) -> Response {
                StatusCode::IM_A_TEAPOT.into_response()
            }
            fn on_invalid(&self, _reason: &str) -> Response {
                StatusCode::IM_A_TEAPOT.into_response()
            }
            fn on_expired(&self) -> Response {
                StatusCode::IM_A_TEAPOT.into_response()
            }
            fn on_revoked(&self, _claims: &JwtClaims) -> Response {
                StatusCode::IM_A_TEAPOT.into_response()
            }
        }

        let gate = AuthGate::with_callbacks(
            JwtAuth::new(&JwtConfig::new(SECRET).unwrap()),
            Arc::new(InMemoryBlocklist::new()),
            Arc::new(Teapot),
        );
        assert_eq!(gate.reject(AuthRejection::Missing).status(), StatusCode::IM_A_TEAPOT);
    }
}
