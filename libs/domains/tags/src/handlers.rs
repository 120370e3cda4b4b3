use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    AuditEvent, AuditOutcome, IdPairPath, IdPath, MessageResponse, ValidatedJson,
    errors::responses::{
        BadRequestIdResponse, BadRequestResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::TagResult;
use crate::models::{CreateTag, Tag, UnlinkResponse};
use crate::repository::TagRepository;
use crate::service::TagService;

const TAG: &str = "Tags";

/// OpenAPI documentation for Tags API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_store_tags,
        create_tag,
        get_tag,
        delete_tag,
        link_item,
        unlink_item
    ),
    components(
        schemas(Tag, CreateTag, UnlinkResponse, MessageResponse),
        responses(
            NotFoundResponse,
            BadRequestResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Store tags and their links to items")
    )
)]
pub struct ApiDoc;

/// Create the tags router. All routes are public.
pub fn router<R: TagRepository + 'static>(service: TagService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route(
            "/store/{id}/tag",
            get(list_store_tags).post(create_tag),
        )
        .route("/tag/{id}", get(get_tag).delete(delete_tag))
        .route(
            "/item/{id}/tag/{tag_id}",
            post(link_item).delete(unlink_item),
        )
        .with_state(shared_service)
}

/// List the tags of a store
#[utoipa::path(
    get,
    path = "/store/{id}/tag",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Store id")
    ),
    responses(
        (status = 200, description = "Tags of the store", body = Vec<Tag>),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_store_tags<R: TagRepository>(
    State(service): State<Arc<TagService<R>>>,
    IdPath(store_id): IdPath,
) -> TagResult<Json<Vec<Tag>>> {
    Ok(Json(service.list_store_tags(store_id).await?))
}

/// Create a tag in a store
#[utoipa::path(
    post,
    path = "/store/{id}/tag",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Store id")
    ),
    request_body = CreateTag,
    responses(
        (status = 201, description = "Tag created", body = Tag),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_tag<R: TagRepository>(
    State(service): State<Arc<TagService<R>>>,
    IdPath(store_id): IdPath,
    ValidatedJson(input): ValidatedJson<CreateTag>,
) -> TagResult<impl IntoResponse> {
    let tag = service.create_tag(store_id, input).await?;
    Ok((StatusCode::CREATED, Json(tag)))
}

/// Get a tag with its store and items
#[utoipa::path(
    get,
    path = "/tag/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Tag id")
    ),
    responses(
        (status = 200, description = "Tag found", body = Tag),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_tag<R: TagRepository>(
    State(service): State<Arc<TagService<R>>>,
    IdPath(id): IdPath,
) -> TagResult<Json<Tag>> {
    Ok(Json(service.get_tag(id).await?))
}

/// Delete a tag that no item uses
#[utoipa::path(
    delete,
    path = "/tag/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Tag id")
    ),
    responses(
        (status = 202, description = "Tag deleted", body = MessageResponse,
            example = json!({"message": "Tag deleted."})),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_tag<R: TagRepository>(
    State(service): State<Arc<TagService<R>>>,
    headers: HeaderMap,
    IdPath(id): IdPath,
) -> TagResult<impl IntoResponse> {
    service.delete_tag(id).await?;

    AuditEvent::new(None, "tag.delete", Some(format!("tag:{}", id)), AuditOutcome::Success)
        .with_request(&headers)
        .log();

    Ok((
        StatusCode::ACCEPTED,
        Json(MessageResponse::new("Tag deleted.")),
    ))
}

/// Attach a tag to an item of the same store
#[utoipa::path(
    post,
    path = "/item/{id}/tag/{tag_id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Item id"),
        ("tag_id" = i32, Path, description = "Tag id")
    ),
    responses(
        (status = 201, description = "Tag attached", body = Tag),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn link_item<R: TagRepository>(
    State(service): State<Arc<TagService<R>>>,
    IdPairPath(item_id, tag_id): IdPairPath,
) -> TagResult<impl IntoResponse> {
    let tag = service.link_item(item_id, tag_id).await?;
    Ok((StatusCode::CREATED, Json(tag)))
}

/// Detach a tag from an item
#[utoipa::path(
    delete,
    path = "/item/{id}/tag/{tag_id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Item id"),
        ("tag_id" = i32, Path, description = "Tag id")
    ),
    responses(
        (status = 200, description = "Tag detached", body = UnlinkResponse),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn unlink_item<R: TagRepository>(
    State(service): State<Arc<TagService<R>>>,
    IdPairPath(item_id, tag_id): IdPairPath,
) -> TagResult<Json<UnlinkResponse>> {
    let (item, tag) = service.unlink_item(item_id, tag_id).await?;
    Ok(Json(UnlinkResponse {
        message: "Item removed from tag".to_string(),
        item,
        tag,
    }))
}
