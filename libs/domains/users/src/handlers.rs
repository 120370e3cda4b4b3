use axum::{
    Json, Router,
    extract::State,
    http::HeaderMap,
    routing::get,
};
use axum_helpers::{
    AuditEvent, AuditOutcome, IdPath, MessageResponse,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
    auth::{MissingTokenResponse, TokenRejectionResponse},
    BearerSecurity,
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::auth_handlers;
use crate::error::UserResult;
use crate::models::{AccessTokenResponse, Credentials, TokenPair, User};
use crate::repository::UserRepository;
use crate::service::UserService;

pub(crate) const TAG: &str = "Users";

/// OpenAPI documentation for Users API, token flows included
#[derive(OpenApi)]
#[openapi(
    paths(
        get_user,
        delete_user,
        auth_handlers::register,
        auth_handlers::login,
        auth_handlers::refresh,
        auth_handlers::logout
    ),
    components(
        schemas(User, Credentials, TokenPair, AccessTokenResponse, MessageResponse),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            ConflictResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse,
            MissingTokenResponse,
            TokenRejectionResponse
        )
    ),
    modifiers(&BearerSecurity),
    tags(
        (name = TAG, description = "Accounts, login and token lifecycle")
    )
)]
pub struct ApiDoc;

/// Account lookup and removal. Public.
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    Router::new()
        .route("/user/{id}", get(get_user).delete(delete_user))
        .with_state(Arc::new(service))
}

/// Get a user
#[utoipa::path(
    get,
    path = "/user/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    IdPath(id): IdPath,
) -> UserResult<Json<User>> {
    Ok(Json(service.get_user(id).await?))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/user/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse,
            example = json!({"message": "User deleted."})),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    headers: HeaderMap,
    IdPath(id): IdPath,
) -> UserResult<Json<MessageResponse>> {
    service.delete_user(id).await?;

    AuditEvent::new(None, "user.delete", Some(format!("user:{}", id)), AuditOutcome::Success)
        .with_request(&headers)
        .log();

    Ok(Json(MessageResponse::new("User deleted.")))
}
