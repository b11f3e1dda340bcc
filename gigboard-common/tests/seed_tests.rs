//! Tests for reference and sample data seeding

use chrono::{DateTime, TimeZone, Utc};
use gigboard_common::db::init::init_database;
use gigboard_common::db::owners;
use gigboard_common::seed::{seed_database, SeedReport, REFERENCE_GENRES};
use gigboard_common::{views, GenreMap, OwnerKind};
use sqlx::SqlitePool;
use tempfile::TempDir;

async fn fresh_pool() -> (TempDir, SqlitePool) {
    let dir = tempfile::tempdir().unwrap();
    let pool = init_database(&dir.path().join("gigboard.db")).await.unwrap();
    (dir, pool)
}

fn new_year_2025() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
}

async fn count(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_genres_only_without_samples() {
    let (_dir, pool) = fresh_pool().await;

    let report = seed_database(&pool, false).await.unwrap();
    assert_eq!(
        report,
        SeedReport {
            genres_added: 20,
            ..SeedReport::default()
        }
    );

    let map = GenreMap::load(&pool).await.unwrap();
    assert_eq!(map.len(), REFERENCE_GENRES.len());
    assert!(map.id_for("Rock n Roll").is_some());
    assert_eq!(count(&pool, "venues").await, 0);
    assert_eq!(count(&pool, "shows").await, 0);
}

#[tokio::test]
async fn test_seed_is_idempotent() {
    let (_dir, pool) = fresh_pool().await;

    let first = seed_database(&pool, true).await.unwrap();
    assert_eq!(
        first,
        SeedReport {
            genres_added: 20,
            venues_added: 3,
            artists_added: 3,
            shows_added: 5,
        }
    );

    let second = seed_database(&pool, true).await.unwrap();
    assert_eq!(second, SeedReport::default());

    assert_eq!(count(&pool, "genres").await, 20);
    assert_eq!(count(&pool, "venues").await, 3);
    assert_eq!(count(&pool, "artists").await, 3);
    assert_eq!(count(&pool, "shows").await, 5);
    assert_eq!(count(&pool, "venue_genres").await, 12);
    assert_eq!(count(&pool, "artist_genres").await, 4);
}

#[tokio::test]
async fn test_sample_shows_classified_around_2025() {
    let (_dir, pool) = fresh_pool().await;
    seed_database(&pool, true).await.unwrap();
    let map = GenreMap::load(&pool).await.unwrap();
    let now = new_year_2025();

    let hop_id = owners::find_id_by_name(&pool, OwnerKind::Venue, "The Musical Hop")
        .await
        .unwrap()
        .unwrap();
    let hop = views::venue_page(&pool, &map, &hop_id, now).await.unwrap().unwrap();
    assert_eq!(hop.past_shows_count, 1);
    assert_eq!(hop.upcoming_shows_count, 0);
    assert_eq!(hop.past_shows[0].artist_name, "Guns N Petals");
    assert_eq!(hop.past_shows[0].start_time, "2019-05-21T21:30:00Z");
    assert_eq!(hop.genres, vec!["Classical", "Folk", "Jazz", "Reggae", "Swing"]);

    let sax_id = owners::find_id_by_name(&pool, OwnerKind::Artist, "The Wild Sax Band")
        .await
        .unwrap()
        .unwrap();
    let sax = views::artist_page(&pool, &map, &sax_id, now).await.unwrap().unwrap();
    assert_eq!(sax.past_shows_count, 0);
    assert_eq!(sax.upcoming_shows_count, 3);
    let starts: Vec<&str> = sax.upcoming_shows.iter().map(|s| s.start_time.as_str()).collect();
    assert_eq!(
        starts,
        vec!["2035-04-01T20:00:00Z", "2035-04-08T20:00:00Z", "2035-04-15T20:00:00Z"]
    );
}

#[tokio::test]
async fn test_sample_venue_areas() {
    let (_dir, pool) = fresh_pool().await;
    seed_database(&pool, true).await.unwrap();

    let areas = views::venue_areas(&pool, new_year_2025()).await.unwrap();
    assert_eq!(areas.len(), 2);

    assert_eq!(areas[0].city.as_deref(), Some("San Francisco"));
    assert_eq!(areas[0].state.as_deref(), Some("CA"));
    let names: Vec<&str> = areas[0].venues.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["Park Square Live Music & Coffee", "The Musical Hop"]);
    assert_eq!(areas[0].venues[0].num_upcoming_shows, 3);
    assert_eq!(areas[0].venues[1].num_upcoming_shows, 0);

    assert_eq!(areas[1].city.as_deref(), Some("New York"));
    assert_eq!(areas[1].venues.len(), 1);
}

#[tokio::test]
async fn test_sample_show_listing_is_chronological() {
    let (_dir, pool) = fresh_pool().await;
    seed_database(&pool, true).await.unwrap();

    let listing = views::show_listing(&pool).await.unwrap();
    assert_eq!(listing.len(), 5);
    assert_eq!(listing[0].artist_name, "Guns N Petals");
    assert_eq!(listing[0].venue_name, "The Musical Hop");
    assert_eq!(listing[1].artist_name, "Matt Quevedo");
    assert!(listing
        .windows(2)
        .all(|pair| pair[0].start_time <= pair[1].start_time));
}
