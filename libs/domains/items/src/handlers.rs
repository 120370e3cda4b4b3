use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AuditEvent, AuditOutcome, AuthClaims, AuthGate, BearerSecurity, IdPath, MessageResponse,
    ValidatedJson,
    auth::{MissingTokenResponse, TokenRejectionResponse},
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
    require_access_token,
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ItemResult;
use crate::models::{CreateItem, Item, UpdateItem};
use crate::repository::ItemRepository;
use crate::service::ItemService;

const TAG: &str = "Items";

/// OpenAPI documentation for Items API
#[derive(OpenApi)]
#[openapi(
    paths(list_items, create_item, get_item, put_item, delete_item),
    components(
        schemas(Item, CreateItem, UpdateItem, MessageResponse),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            ConflictResponse,
            InternalServerErrorResponse,
            MissingTokenResponse,
            TokenRejectionResponse
        )
    ),
    modifiers(&BearerSecurity),
    tags(
        (name = TAG, description = "Operations on items. Requires an access token.")
    )
)]
pub struct ApiDoc;

/// Create the items router. Every route requires an access token.
pub fn router<R: ItemRepository + 'static>(service: ItemService<R>, gate: AuthGate) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/item", get(list_items).post(create_item))
        .route(
            "/item/{id}",
            get(get_item).put(put_item).delete(delete_item),
        )
        .route_layer(middleware::from_fn_with_state(gate, require_access_token))
        .with_state(shared_service)
}

/// List all items
#[utoipa::path(
    get,
    path = "/item",
    tag = TAG,
    security(("jwt" = [])),
    responses(
        (status = 200, description = "List of items", body = Vec<Item>),
        (status = 401, response = MissingTokenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_items<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
) -> ItemResult<Json<Vec<Item>>> {
    Ok(Json(service.list_items().await?))
}

/// Create an item in a store
#[utoipa::path(
    post,
    path = "/item",
    tag = TAG,
    security(("jwt" = [])),
    request_body = CreateItem,
    responses(
        (status = 201, description = "Item created", body = Item),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = TokenRejectionResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    AuthClaims(claims): AuthClaims,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateItem>,
) -> ItemResult<impl IntoResponse> {
    let item = service.create_item(input).await?;

    AuditEvent::new(
        Some(claims.sub),
        "item.create",
        Some(format!("item:{}", item.id)),
        AuditOutcome::Success,
    )
    .with_request(&headers)
    .with_details(json!({ "name": item.name, "store_id": item.store.id }))
    .log();

    Ok((StatusCode::CREATED, Json(item)))
}

/// Get an item with its store and tags
#[utoipa::path(
    get,
    path = "/item/{id}",
    tag = TAG,
    security(("jwt" = [])),
    params(
        ("id" = i32, Path, description = "Item id")
    ),
    responses(
        (status = 200, description = "Item found", body = Item),
        (status = 400, response = BadRequestIdResponse),
        (status = 401, response = TokenRejectionResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    IdPath(id): IdPath,
) -> ItemResult<Json<Item>> {
    Ok(Json(service.get_item(id).await?))
}

/// Update an item, or create it under this id
#[utoipa::path(
    put,
    path = "/item/{id}",
    tag = TAG,
    security(("jwt" = [])),
    params(
        ("id" = i32, Path, description = "Item id")
    ),
    request_body = UpdateItem,
    responses(
        (status = 200, description = "Item updated or created", body = Item),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = TokenRejectionResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn put_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    AuthClaims(claims): AuthClaims,
    headers: HeaderMap,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateItem>,
) -> ItemResult<Json<Item>> {
    let (item, created) = service.put_item(id, input).await?;

    let action = if created { "item.create" } else { "item.update" };
    AuditEvent::new(
        Some(claims.sub),
        action,
        Some(format!("item:{}", item.id)),
        AuditOutcome::Success,
    )
    .with_request(&headers)
    .log();

    Ok(Json(item))
}

/// Delete an item
#[utoipa::path(
    delete,
    path = "/item/{id}",
    tag = TAG,
    security(("jwt" = [])),
    params(
        ("id" = i32, Path, description = "Item id")
    ),
    responses(
        (status = 200, description = "Item deleted", body = MessageResponse,
            example = json!({"message": "Item deleted."})),
        (status = 400, response = BadRequestIdResponse),
        (status = 401, response = TokenRejectionResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    AuthClaims(claims): AuthClaims,
    headers: HeaderMap,
    IdPath(id): IdPath,
) -> ItemResult<Json<MessageResponse>> {
    service.delete_item(id).await?;

    AuditEvent::new(
        Some(claims.sub),
        "item.delete",
        Some(format!("item:{}", id)),
        AuditOutcome::Success,
    )
    .with_request(&headers)
    .log();

    Ok(Json(MessageResponse::new("Item deleted.")))
}
