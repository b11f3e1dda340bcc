//! Venue database operations

use sqlx::{SqliteConnection, SqliteExecutor, SqlitePool};
use tracing::info;

use super::genres::{self, GenreMap};
use super::models::{OwnerKind, Venue, VenueDraft};
use super::unit_of_work::UnitOfWork;
use crate::{uuid_utils, Error, Result};

const VENUE_COLUMNS: &str = "id, name, city, state, address, phone, image_link, facebook_link, \
                             website, seeking_talent, seeking_description";

/// Create a venue and its genre links in one unit of work
pub async fn create_venue(pool: &SqlitePool, genre_map: &GenreMap, draft: &VenueDraft) -> Result<Venue> {
    let venue = draft.to_venue(uuid_utils::generate())?;
    let genre_ids = genre_map.resolve_ids(&draft.genres)?;

    let mut work = UnitOfWork::begin(pool, "create venue").await?;
    let outcome = insert_with_genres(work.conn(), &venue, &genre_ids).await;
    work.finish(outcome).await?;

    info!("Venue {} was successfully listed ({})", venue.name, venue.id);
    Ok(venue)
}

/// Replace a venue's fields and genre links in one unit of work
pub async fn update_venue(
    pool: &SqlitePool,
    genre_map: &GenreMap,
    venue_id: &str,
    draft: &VenueDraft,
) -> Result<Venue> {
    let venue = draft.to_venue(venue_id.to_string())?;
    let genre_ids = genre_map.resolve_ids(&draft.genres)?;

    let mut work = UnitOfWork::begin(pool, "update venue").await?;
    let outcome = update_with_genres(work.conn(), &venue, &genre_ids).await;
    work.finish(outcome).await?;

    info!("Venue {} was successfully updated", venue.id);
    Ok(venue)
}

pub async fn get_venue<'e, E: SqliteExecutor<'e>>(executor: E, venue_id: &str) -> Result<Option<Venue>> {
    let venue = sqlx::query_as::<_, Venue>(&format!(
        "SELECT {} FROM venues WHERE id = ?",
        VENUE_COLUMNS
    ))
    .bind(venue_id)
    .fetch_optional(executor)
    .await?;
    Ok(venue)
}

/// Every venue, ordered by state, city, then name
///
/// State and city sort exactly (binary), so each distinct area is contiguous.
pub async fn list_venues<'e, E: SqliteExecutor<'e>>(executor: E) -> Result<Vec<Venue>> {
    let venues = sqlx::query_as::<_, Venue>(&format!(
        "SELECT {} FROM venues
         ORDER BY state, city, name COLLATE NOCASE, id",
        VENUE_COLUMNS
    ))
    .fetch_all(executor)
    .await?;
    Ok(venues)
}

pub async fn venue_genre_ids<'e, E: SqliteExecutor<'e>>(executor: E, venue_id: &str) -> Result<Vec<i64>> {
    genres::owner_genre_ids(executor, OwnerKind::Venue, venue_id).await
}

pub(crate) async fn insert_with_genres(
    conn: &mut SqliteConnection,
    venue: &Venue,
    genre_ids: &[i64],
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO venues (
            id, name, city, state, address, phone, image_link, facebook_link,
            website, seeking_talent, seeking_description
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&venue.id)
    .bind(&venue.name)
    .bind(&venue.city)
    .bind(&venue.state)
    .bind(&venue.address)
    .bind(&venue.phone)
    .bind(&venue.image_link)
    .bind(&venue.facebook_link)
    .bind(&venue.website)
    .bind(venue.seeking_talent)
    .bind(&venue.seeking_description)
    .execute(&mut *conn)
    .await
    .map_err(|e| Error::from_write(e, format!("venue {}", venue.id)))?;

    genres::replace_owner_genres(conn, OwnerKind::Venue, &venue.id, genre_ids).await
}

async fn update_with_genres(conn: &mut SqliteConnection, venue: &Venue, genre_ids: &[i64]) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE venues SET
            name = ?, city = ?, state = ?, address = ?, phone = ?, image_link = ?,
            facebook_link = ?, website = ?, seeking_talent = ?, seeking_description = ?,
            updated_at = CURRENT_TIMESTAMP
        WHERE id = ?
        "#,
    )
    .bind(&venue.name)
    .bind(&venue.city)
    .bind(&venue.state)
    .bind(&venue.address)
    .bind(&venue.phone)
    .bind(&venue.image_link)
    .bind(&venue.facebook_link)
    .bind(&venue.website)
    .bind(venue.seeking_talent)
    .bind(&venue.seeking_description)
    .bind(&venue.id)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("venue {}", venue.id)));
    }

    genres::replace_owner_genres(conn, OwnerKind::Venue, &venue.id, genre_ids).await
}
