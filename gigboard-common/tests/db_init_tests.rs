//! Tests for database initialization

use gigboard_common::db::init::init_database;
use gigboard_common::Error;

#[tokio::test]
async fn test_database_creation_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("nested").join("gigboard.db");
    assert!(!db_path.exists());

    let result = init_database(&db_path).await;
    assert!(result.is_ok(), "Database initialization failed: {:?}", result.err());
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_database_opens_existing() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("gigboard.db");

    let pool1 = init_database(&db_path).await.unwrap();
    sqlx::query("INSERT INTO genres (name) VALUES ('Jazz')")
        .execute(&pool1)
        .await
        .unwrap();
    pool1.close().await;

    let pool2 = init_database(&db_path).await;
    assert!(pool2.is_ok(), "Failed to open existing database: {:?}", pool2.err());

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM genres")
        .fetch_one(&pool2.unwrap())
        .await
        .unwrap();
    assert_eq!(count, 1, "Existing rows must survive a reopen");
}

#[tokio::test]
async fn test_all_tables_created() {
    let dir = tempfile::tempdir().unwrap();
    let pool = init_database(&dir.path().join("gigboard.db")).await.unwrap();

    for table in ["genres", "venues", "artists", "shows", "venue_genres", "artist_genres"] {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?)",
        )
        .bind(table)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert!(exists, "Table {} should exist", table);
    }
}

#[tokio::test]
async fn test_foreign_keys_enforced() {
    let dir = tempfile::tempdir().unwrap();
    let pool = init_database(&dir.path().join("gigboard.db")).await.unwrap();

    let result = sqlx::query(
        "INSERT INTO shows (artist_id, venue_id, start_time) VALUES ('nobody', 'nowhere', '2035-04-01T20:00:00+00:00')",
    )
    .execute(&pool)
    .await;
    assert!(result.is_err(), "Show with unknown owners must be rejected");

    let mapped = Error::from_write(result.unwrap_err(), "show");
    assert!(matches!(mapped, Error::InvalidInput(_)), "got {:?}", mapped);
}

#[tokio::test]
async fn test_duplicate_genre_name_maps_to_conflict() {
    let dir = tempfile::tempdir().unwrap();
    let pool = init_database(&dir.path().join("gigboard.db")).await.unwrap();

    sqlx::query("INSERT INTO genres (name) VALUES ('Jazz')")
        .execute(&pool)
        .await
        .unwrap();
    let err = sqlx::query("INSERT INTO genres (name) VALUES ('Jazz')")
        .execute(&pool)
        .await
        .unwrap_err();

    assert!(matches!(Error::from_write(err, "genre Jazz"), Error::Conflict(_)));
}
