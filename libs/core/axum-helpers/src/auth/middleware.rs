use super::callbacks::{AuthCallbacks, JsonAuthCallbacks};
use super::gate::AuthGate;
use super::jwt::{JwtClaims, TokenType};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

async fn require(gate: &AuthGate, expected: TokenType, mut request: Request, next: Next) -> Response {
    match gate.authenticate(request.headers(), expected).await {
        Ok(claims) => {
            tracing::debug!(sub = %claims.sub, jti = %claims.jti, "Token accepted");
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(rejection) => gate.reject(rejection),
    }
}

/// Lets the request through only with a valid, unrevoked access token.
///
/// Inserts [`JwtClaims`] into request extensions on success.
///
/// # Example
///
/// ```ignore
/// let protected = Router::new()
///     .route("/item/{id}", get(get_item))
///     .route_layer(axum::middleware::from_fn_with_state(gate, require_access_token));
/// ```
pub async fn require_access_token(
    State(gate): State<AuthGate>,
    request: Request,
    next: Next,
) -> Response {
    require(&gate, TokenType::Access, request, next).await
}

/// Like [`require_access_token`] but for the refresh flow.
pub async fn require_refresh_token(
    State(gate): State<AuthGate>,
    request: Request,
    next: Next,
) -> Response {
    require(&gate, TokenType::Refresh, request, next).await
}

/// Claims of the token accepted by the auth middleware.
///
/// Rejects with the missing-token response when the route is not behind
/// [`require_access_token`] or [`require_refresh_token`].
#[derive(Debug, Clone)]
pub struct AuthClaims(pub JwtClaims);

impl<S> FromRequestParts<S> for AuthClaims
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<JwtClaims>()
            .cloned()
            .map(AuthClaims)
            .ok_or_else(|| JsonAuthCallbacks.on_missing())
    }
}
