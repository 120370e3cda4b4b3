//! Responses for rejected tokens.

use super::jwt::JwtClaims;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::{ToResponse, ToSchema};

/// Body sent when no access token was presented.
#[derive(Debug, Serialize, Deserialize, ToSchema, ToResponse)]
#[response(description = "Request does not contain an access token")]
pub struct MissingTokenResponse {
    pub description: String,
    pub error: String,
}

/// Body sent for invalid, expired and revoked tokens.
#[derive(Debug, Serialize, Deserialize, ToSchema, ToResponse)]
#[response(description = "Token is invalid, expired or revoked")]
pub struct TokenRejectionResponse {
    pub message: String,
    pub error: String,
}

/// One hook per rejection kind, invoked by [`super::AuthGate`].
///
/// Implement this to change what clients see; the gate decides *which* hook
/// runs.
pub trait AuthCallbacks: Send + Sync {
    /// No bearer credential was presented.
    fn on_missing(&self) -> Response;

    /// The token failed signature or structural checks, or is of the wrong type.
    fn on_invalid(&self, reason: &str) -> Response;

    /// The token is well-formed but past its `exp`.
    fn on_expired(&self) -> Response;

    /// The token's `jti` is in the blocklist.
    fn on_revoked(&self, claims: &JwtClaims) -> Response;
}

/// Default callbacks: 401 with a small JSON body.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonAuthCallbacks;

impl JsonAuthCallbacks {
    fn rejection(message: &str, error: &str) -> Response {
        let body = TokenRejectionResponse {
            message: message.to_string(),
            error: error.to_string(),
        };
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

impl AuthCallbacks for JsonAuthCallbacks {
    fn on_missing(&self) -> Response {
        let body = MissingTokenResponse {
            description: "Request does not contain an access token.".to_string(),
            error: "authorization_required".to_string(),
        };
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }

    fn on_invalid(&self, _reason: &str) -> Response {
        Self::rejection("Signature verification failed.", "invalid_token")
    }

    fn on_expired(&self) -> Response {
        Self::rejection("The token has expired.", "token_expired")
    }

    fn on_revoked(&self, _claims: &JwtClaims) -> Response {
        Self::rejection("The token has been revoked.", "token_revoked")
    }
}
