//! Register, login and the token lifecycle.
//!
//! `/refresh` is single use: the presented refresh token is revoked before
//! the new access token is issued, and a request that loses the revocation
//! race gets `token_revoked`. `/logout` revokes the presented access token.

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::post,
};
use axum_helpers::{
    AuditEvent, AuditOutcome, AuthClaims, AuthGate, AuthRejection, MessageResponse, ValidatedJson,
    auth::{MissingTokenResponse, TokenRejectionResponse},
    errors::responses::{
        BadRequestValidationResponse, ConflictResponse, InternalServerErrorResponse,
        UnauthorizedResponse,
    },
    require_access_token, require_refresh_token,
};
use serde_json::json;
use std::sync::Arc;

use crate::error::{UserError, UserResult};
use crate::handlers::TAG;
use crate::models::{AccessTokenResponse, Credentials, TokenPair};
use crate::repository::UserRepository;
use crate::service::UserService;

/// Handler state: the account service and the gate that issues and revokes tokens
pub struct AuthState<R: UserRepository> {
    pub service: UserService<R>,
    pub gate: AuthGate,
}

impl<R: UserRepository> Clone for AuthState<R> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            gate: self.gate.clone(),
        }
    }
}

pub fn router<R: UserRepository + 'static>(service: UserService<R>, gate: AuthGate) -> Router {
    let state = Arc::new(AuthState {
        service,
        gate: gate.clone(),
    });

    let refresh_routes = Router::new()
        .route("/refresh", post(refresh))
        .route_layer(middleware::from_fn_with_state(
            gate.clone(),
            require_refresh_token,
        ));
    let logout_routes = Router::new()
        .route("/logout", post(logout))
        .route_layer(middleware::from_fn_with_state(gate, require_access_token));

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .merge(refresh_routes)
        .merge(logout_routes)
        .with_state(state)
}

/// Create an account
#[utoipa::path(
    post,
    path = "/register",
    tag = TAG,
    request_body = Credentials,
    responses(
        (status = 201, description = "User created", body = MessageResponse,
            example = json!({"message": "User created successfully."})),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(crate) async fn register<R: UserRepository>(
    State(state): State<Arc<AuthState<R>>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<Credentials>,
) -> UserResult<impl IntoResponse> {
    let user = state.service.register(input).await?;

    AuditEvent::new(
        Some(user.id.to_string()),
        "user.register",
        Some(format!("user:{}", user.id)),
        AuditOutcome::Success,
    )
    .with_request(&headers)
    .with_details(json!({ "username": user.username }))
    .log();

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User created successfully.")),
    ))
}

/// Exchange credentials for an access and a refresh token
#[utoipa::path(
    post,
    path = "/login",
    tag = TAG,
    request_body = Credentials,
    responses(
        (status = 200, description = "Tokens issued", body = TokenPair),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(crate) async fn login<R: UserRepository>(
    State(state): State<Arc<AuthState<R>>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<Credentials>,
) -> UserResult<Json<TokenPair>> {
    let user = match state.service.authenticate(&input).await {
        Ok(user) => user,
        Err(e) => {
            if matches!(e, UserError::InvalidCredentials) {
                AuditEvent::new(None, "user.login", None, AuditOutcome::Denied)
                    .with_request(&headers)
                    .with_details(json!({ "username": input.username }))
                    .log();
            }
            return Err(e);
        }
    };

    let user_id = user.id.to_string();
    let jwt = state.gate.jwt();
    let tokens = TokenPair {
        access_token: jwt.create_access_token(&user_id, &user.username)?,
        refresh_token: jwt.create_refresh_token(&user_id, &user.username)?,
    };

    AuditEvent::new(Some(user_id), "user.login", None, AuditOutcome::Success)
        .with_request(&headers)
        .log();

    Ok(Json(tokens))
}

/// Trade a refresh token for a new access token
///
/// The refresh token is revoked and cannot be used again.
#[utoipa::path(
    post,
    path = "/refresh",
    tag = TAG,
    security(("jwt" = [])),
    responses(
        (status = 200, description = "New access token", body = AccessTokenResponse),
        (status = 401, response = TokenRejectionResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(crate) async fn refresh<R: UserRepository>(
    State(state): State<Arc<AuthState<R>>>,
    AuthClaims(claims): AuthClaims,
    headers: HeaderMap,
) -> UserResult<Response> {
    // Revoke before issuing, so only one of two concurrent refreshes wins
    if !state.gate.revoke(&claims).await? {
        AuditEvent::new(
            Some(claims.sub.clone()),
            "user.refresh",
            None,
            AuditOutcome::Denied,
        )
        .with_request(&headers)
        .log();
        return Ok(state.gate.reject(AuthRejection::Revoked(claims)));
    }

    let access_token = state
        .gate
        .jwt()
        .create_access_token(&claims.sub, &claims.username)?;

    AuditEvent::new(
        Some(claims.sub.clone()),
        "user.refresh",
        None,
        AuditOutcome::Success,
    )
    .with_request(&headers)
    .log();

    Ok(Json(AccessTokenResponse { access_token }).into_response())
}

/// Revoke the presented access token
#[utoipa::path(
    post,
    path = "/logout",
    tag = TAG,
    security(("jwt" = [])),
    responses(
        (status = 200, description = "Logged out", body = MessageResponse,
            example = json!({"message": "Successfully logged out."})),
        (status = 401, response = MissingTokenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(crate) async fn logout<R: UserRepository>(
    State(state): State<Arc<AuthState<R>>>,
    AuthClaims(claims): AuthClaims,
    headers: HeaderMap,
) -> UserResult<Json<MessageResponse>> {
    state.gate.revoke(&claims).await?;

    AuditEvent::new(Some(claims.sub), "user.logout", None, AuditOutcome::Success)
        .with_request(&headers)
        .log();

    Ok(Json(MessageResponse::new("Successfully logged out.")))
}
