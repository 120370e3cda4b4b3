use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AuditEvent, AuditOutcome, IdPath, MessageResponse, ValidatedJson,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::StoreResult;
use crate::models::{CreateStore, Store};
use crate::repository::StoreRepository;
use crate::service::StoreService;

const TAG: &str = "Stores";

/// OpenAPI documentation for Stores API
#[derive(OpenApi)]
#[openapi(
    paths(list_stores, create_store, get_store, delete_store),
    components(
        schemas(Store, CreateStore, MessageResponse),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Operations on stores")
    )
)]
pub struct ApiDoc;

/// Create the stores router. All routes are public.
pub fn router<R: StoreRepository + 'static>(service: StoreService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/store", get(list_stores).post(create_store))
        .route("/store/{id}", get(get_store).delete(delete_store))
        .with_state(shared_service)
}

/// List all stores
#[utoipa::path(
    get,
    path = "/store",
    tag = TAG,
    responses(
        (status = 200, description = "List of stores", body = Vec<Store>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_stores<R: StoreRepository>(
    State(service): State<Arc<StoreService<R>>>,
) -> StoreResult<Json<Vec<Store>>> {
    Ok(Json(service.list_stores().await?))
}

/// Create a store
#[utoipa::path(
    post,
    path = "/store",
    tag = TAG,
    request_body = CreateStore,
    responses(
        (status = 201, description = "Store created", body = Store),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_store<R: StoreRepository>(
    State(service): State<Arc<StoreService<R>>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateStore>,
) -> StoreResult<impl IntoResponse> {
    let store = service.create_store(input).await?;

    AuditEvent::new(
        None,
        "store.create",
        Some(format!("store:{}", store.id)),
        AuditOutcome::Success,
    )
    .with_request(&headers)
    .with_details(json!({ "name": store.name }))
    .log();

    Ok((StatusCode::CREATED, Json(store)))
}

/// Get a store with its items and tags
#[utoipa::path(
    get,
    path = "/store/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Store id")
    ),
    responses(
        (status = 200, description = "Store found", body = Store),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_store<R: StoreRepository>(
    State(service): State<Arc<StoreService<R>>>,
    IdPath(id): IdPath,
) -> StoreResult<Json<Store>> {
    Ok(Json(service.get_store(id).await?))
}

/// Delete a store, its items and its tags
#[utoipa::path(
    delete,
    path = "/store/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Store id")
    ),
    responses(
        (status = 200, description = "Store deleted", body = MessageResponse,
            example = json!({"message": "Store deleted."})),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_store<R: StoreRepository>(
    State(service): State<Arc<StoreService<R>>>,
    headers: HeaderMap,
    IdPath(id): IdPath,
) -> StoreResult<Json<MessageResponse>> {
    service.delete_store(id).await?;

    AuditEvent::new(
        None,
        "store.delete",
        Some(format!("store:{}", id)),
        AuditOutcome::Success,
    )
    .with_request(&headers)
    .log();

    Ok(Json(MessageResponse::new("Store deleted.")))
}
