use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};

async fn memory_db() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1);
    Database::connect(opt).await.unwrap()
}

async fn table_names(db: &DatabaseConnection) -> Vec<String> {
    let rows = db
        .query_all_raw(Statement::from_string(
            db.get_database_backend(),
            "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
        ))
        .await
        .unwrap();

    rows.iter()
        .map(|row| row.try_get::<String>("", "name").unwrap())
        .collect()
}

#[tokio::test]
async fn test_up_creates_all_tables() {
    let db = memory_db().await;
    Migrator::up(&db, None).await.unwrap();

    let tables = table_names(&db).await;
    for expected in ["items", "items_tags", "stores", "tags", "users"] {
        assert!(tables.contains(&expected.to_string()), "missing {expected}");
    }
}

#[tokio::test]
async fn test_up_twice_is_a_no_op() {
    let db = memory_db().await;
    Migrator::up(&db, None).await.unwrap();
    let before = table_names(&db).await;

    Migrator::up(&db, None).await.unwrap();
    let after = table_names(&db).await;

    assert_eq!(before, after);
}

#[tokio::test]
async fn test_down_drops_tables() {
    let db = memory_db().await;
    Migrator::up(&db, None).await.unwrap();
    Migrator::down(&db, None).await.unwrap();

    let tables = table_names(&db).await;
    assert!(!tables.contains(&"stores".to_string()));
    assert!(!tables.contains(&"users".to_string()));
}
