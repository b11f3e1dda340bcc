//! Artist database operations

use sqlx::{SqliteConnection, SqliteExecutor, SqlitePool};
use tracing::info;

use super::genres::{self, GenreMap};
use super::models::{Artist, ArtistDraft, OwnerKind};
use super::unit_of_work::UnitOfWork;
use crate::{uuid_utils, Error, Result};

const ARTIST_COLUMNS: &str = "id, name, city, state, phone, image_link, facebook_link, website, \
                              seeking_venue, seeking_description";

/// Create an artist and its genre links in one unit of work
pub async fn create_artist(pool: &SqlitePool, genre_map: &GenreMap, draft: &ArtistDraft) -> Result<Artist> {
    let artist = draft.to_artist(uuid_utils::generate())?;
    let genre_ids = genre_map.resolve_ids(&draft.genres)?;

    let mut work = UnitOfWork::begin(pool, "create artist").await?;
    let outcome = insert_with_genres(work.conn(), &artist, &genre_ids).await;
    work.finish(outcome).await?;

    info!("Artist {} was successfully listed ({})", artist.name, artist.id);
    Ok(artist)
}

pub async fn update_artist(
    pool: &SqlitePool,
    genre_map: &GenreMap,
    artist_id: &str,
    draft: &ArtistDraft,
) -> Result<Artist> {
    let artist = draft.to_artist(artist_id.to_string())?;
    let genre_ids = genre_map.resolve_ids(&draft.genres)?;

    let mut work = UnitOfWork::begin(pool, "update artist").await?;
    let outcome = update_with_genres(work.conn(), &artist, &genre_ids).await;
    work.finish(outcome).await?;

    info!("Artist {} was successfully updated", artist.id);
    Ok(artist)
}

pub async fn get_artist<'e, E: SqliteExecutor<'e>>(executor: E, artist_id: &str) -> Result<Option<Artist>> {
    let artist = sqlx::query_as::<_, Artist>(&format!(
        "SELECT {} FROM artists WHERE id = ?",
        ARTIST_COLUMNS
    ))
    .bind(artist_id)
    .fetch_optional(executor)
    .await?;
    Ok(artist)
}

pub async fn artist_genre_ids<'e, E: SqliteExecutor<'e>>(executor: E, artist_id: &str) -> Result<Vec<i64>> {
    genres::owner_genre_ids(executor, OwnerKind::Artist, artist_id).await
}

pub(crate) async fn insert_with_genres(
    conn: &mut SqliteConnection,
    artist: &Artist,
    genre_ids: &[i64],
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO artists (
            id, name, city, state, phone, image_link, facebook_link, website,
            seeking_venue, seeking_description
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&artist.id)
    .bind(&artist.name)
    .bind(&artist.city)
    .bind(&artist.state)
    .bind(&artist.phone)
    .bind(&artist.image_link)
    .bind(&artist.facebook_link)
    .bind(&artist.website)
    .bind(artist.seeking_venue)
    .bind(&artist.seeking_description)
    .execute(&mut *conn)
    .await
    .map_err(|e| Error::from_write(e, format!("artist {}", artist.id)))?;

    genres::replace_owner_genres(conn, OwnerKind::Artist, &artist.id, genre_ids).await
}

async fn update_with_genres(conn: &mut SqliteConnection, artist: &Artist, genre_ids: &[i64]) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE artists SET
            name = ?, city = ?, state = ?, phone = ?, image_link = ?, facebook_link = ?,
            website = ?, seeking_venue = ?, seeking_description = ?,
            updated_at = CURRENT_TIMESTAMP
        WHERE id = ?
        "#,
    )
    .bind(&artist.name)
    .bind(&artist.city)
    .bind(&artist.state)
    .bind(&artist.phone)
    .bind(&artist.image_link)
    .bind(&artist.facebook_link)
    .bind(&artist.website)
    .bind(artist.seeking_venue)
    .bind(&artist.seeking_description)
    .bind(&artist.id)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("artist {}", artist.id)));
    }

    genres::replace_owner_genres(conn, OwnerKind::Artist, &artist.id, genre_ids).await
}
