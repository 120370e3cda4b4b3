//! Repository tests against a real PostgreSQL container

use domain_items::*;
use entity::store;
use sea_orm::{ActiveModelTrait, ActiveValue::Set};
use test_utils::TestPostgres;

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_explicit_id_advances_sequence() {
    let pg = TestPostgres::new().await;
    let db = pg.connection();
    let store = store::ActiveModel {
        name: Set("Main".to_string()),
        ..Default::default()
    }
    .insert(&db)
    .await
    .unwrap();
    let repo = SqlItemRepository::new(db);

    let placed = repo
        .create(
            Some(7),
            CreateItem {
                name: "Chair".to_string(),
                price: 15.99,
                store_id: store.id,
            },
        )
        .await
        .unwrap();
    assert_eq!(placed.id, 7);

    let next = repo
        .create(
            None,
            CreateItem {
                name: "Table".to_string(),
                price: 40.0,
                store_id: store.id,
            },
        )
        .await
        .unwrap();
    assert_eq!(next.id, 8);
}
