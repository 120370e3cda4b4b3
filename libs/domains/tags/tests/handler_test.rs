//! Handler tests for the tags domain

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_tags::*;
use entity::{item, store};
use http_body_util::BodyExt;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection};
use serde_json::{Value, json};
use test_utils::TestDatabase;
use tower::ServiceExt; // For oneshot()

fn app(db: &TestDatabase) -> Router {
    handlers::router(TagService::new(SqlTagRepository::new(db.connection())))
}

async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn seed_store(db: &DatabaseConnection, name: &str) -> i32 {
    store::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

async fn seed_item(db: &DatabaseConnection, name: &str, store_id: i32) -> i32 {
    item::ActiveModel {
        name: Set(name.to_string()),
        price: Set(5.0),
        store_id: Set(store_id),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

#[tokio::test]
async fn test_create_and_list_store_tags() {
    let db = TestDatabase::new().await;
    let store_id = seed_store(&db.connection(), "Main").await;

    let (status, tag) = send(
        app(&db),
        "POST",
        &format!("/store/{}/tag", store_id),
        Some(json!({"name": "Furniture"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        tag,
        json!({
            "id": 1,
            "name": "Furniture",
            "store": {"id": store_id, "name": "Main"},
            "items": []
        })
    );

    let (status, list) = send(app(&db), "GET", &format!("/store/{}/tag", store_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([tag]));
}

#[tokio::test]
async fn test_unknown_store() {
    let db = TestDatabase::new().await;

    let (status, body) = send(app(&db), "GET", "/store/9/tag", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Store not found.");

    let (status, _) = send(
        app(&db),
        "POST",
        "/store/9/tag",
        Some(json!({"name": "Furniture"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_tag_in_store() {
    let db = TestDatabase::new().await;
    let store_id = seed_store(&db.connection(), "Main").await;
    let uri = format!("/store/{}/tag", store_id);

    send(app(&db), "POST", &uri, Some(json!({"name": "Furniture"}))).await;
    let (status, body) = send(app(&db), "POST", &uri, Some(json!({"name": "Furniture"}))).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["message"],
        "A tag with that name already exists in that store."
    );
}

#[tokio::test]
async fn test_link_get_unlink() {
    let db = TestDatabase::new().await;
    let store_id = seed_store(&db.connection(), "Main").await;
    let item_id = seed_item(&db.connection(), "Chair", store_id).await;
    send(
        app(&db),
        "POST",
        &format!("/store/{}/tag", store_id),
        Some(json!({"name": "Furniture"})),
    )
    .await;

    let uri = format!("/item/{}/tag/1", item_id);
    let (status, tag) = send(app(&db), "POST", &uri, None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        tag["items"],
        json!([{"id": item_id, "name": "Chair", "price": 5.0}])
    );

    // Linking again changes nothing
    let (status, again) = send(app(&db), "POST", &uri, None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(again, tag);

    let (status, _) = send(app(&db), "GET", "/tag/1", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(app(&db), "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Item removed from tag");
    assert_eq!(body["item"]["id"], item_id);
    assert_eq!(body["tag"]["items"], json!([]));

    let (status, _) = send(app(&db), "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_link_across_stores() {
    let db = TestDatabase::new().await;
    let main = seed_store(&db.connection(), "Main").await;
    let other = seed_store(&db.connection(), "Other").await;
    let item_id = seed_item(&db.connection(), "Chair", main).await;
    send(
        app(&db),
        "POST",
        &format!("/store/{}/tag", other),
        Some(json!({"name": "Furniture"})),
    )
    .await;

    let (status, body) = send(
        app(&db),
        "POST",
        &format!("/item/{}/tag/1", item_id),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Item and tag must belong to the same store.");
}

#[tokio::test]
async fn test_delete_tag() {
    let db = TestDatabase::new().await;
    let store_id = seed_store(&db.connection(), "Main").await;
    let item_id = seed_item(&db.connection(), "Chair", store_id).await;
    send(
        app(&db),
        "POST",
        &format!("/store/{}/tag", store_id),
        Some(json!({"name": "Furniture"})),
    )
    .await;
    send(app(&db), "POST", &format!("/item/{}/tag/1", item_id), None).await;

    let (status, body) = send(app(&db), "DELETE", "/tag/1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Could not delete tag. Make sure tag is not associated with any items, then try again."
    );

    send(app(&db), "DELETE", &format!("/item/{}/tag/1", item_id), None).await;

    let (status, body) = send(app(&db), "DELETE", "/tag/1", None).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body, json!({"message": "Tag deleted."}));

    let (status, _) = send(app(&db), "GET", "/tag/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_id() {
    let db = TestDatabase::new().await;

    let (status, body) = send(app(&db), "POST", "/item/abc/tag/1", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_ID");
}
