//! Show database operations
//!
//! Shows have no update path: the (artist, venue, start_time) key is fixed
//! once written, and rows only disappear through owner deletion.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqliteConnection, SqliteExecutor, SqlitePool};
use tracing::info;

use super::models::{OwnerKind, Show, ShowDraft};
use super::owners::owner_exists;
use super::unit_of_work::UnitOfWork;
use crate::{time, Error, Result};

/// Show joined with its artist and venue
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ShowRow {
    pub venue_id: String,
    pub venue_name: String,
    pub artist_id: String,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// Create a show after checking both owners exist
pub async fn create_show(pool: &SqlitePool, draft: &ShowDraft) -> Result<Show> {
    let show = Show {
        artist_id: draft.artist_id.trim().to_string(),
        venue_id: draft.venue_id.trim().to_string(),
        start_time: time::parse_start_time(&draft.start_time)?,
    };

    let mut work = UnitOfWork::begin(pool, "create show").await?;
    let outcome = insert_checked(work.conn(), &show).await;
    work.finish(outcome).await?;

    info!(
        "Show listed: artist {} at venue {} on {}",
        show.artist_id,
        show.venue_id,
        time::to_iso8601(&show.start_time)
    );
    Ok(show)
}

pub(crate) async fn insert_show(conn: &mut SqliteConnection, show: &Show) -> Result<()> {
    sqlx::query("INSERT INTO shows (artist_id, venue_id, start_time) VALUES (?, ?, ?)")
        .bind(&show.artist_id)
        .bind(&show.venue_id)
        .bind(show.start_time)
        .execute(conn)
        .await
        .map_err(|e| {
            Error::from_write(
                e,
                format!(
                    "show for artist {} at venue {} on {}",
                    show.artist_id,
                    show.venue_id,
                    time::to_iso8601(&show.start_time)
                ),
            )
        })?;
    Ok(())
}

async fn insert_checked(conn: &mut SqliteConnection, show: &Show) -> Result<()> {
    for (kind, id) in [(OwnerKind::Artist, &show.artist_id), (OwnerKind::Venue, &show.venue_id)] {
        if !owner_exists(&mut *conn, kind, id).await? {
            return Err(Error::InvalidInput(format!("Unknown {} id: {}", kind, id)));
        }
    }
    insert_show(conn, show).await
}

/// Every show joined with artist and venue
///
/// Ordered by start time, then venue name, then artist name.
pub async fn list_show_rows<'e, E: SqliteExecutor<'e>>(executor: E) -> Result<Vec<ShowRow>> {
    let rows = sqlx::query_as::<_, ShowRow>(
        r#"
        SELECT v.id AS venue_id, v.name AS venue_name,
               a.id AS artist_id, a.name AS artist_name, a.image_link AS artist_image_link,
               s.start_time AS start_time
        FROM shows s
        JOIN artists a ON a.id = s.artist_id
        JOIN venues v ON v.id = s.venue_id
        ORDER BY s.start_time, v.name COLLATE NOCASE, a.name COLLATE NOCASE
        "#,
    )
    .fetch_all(executor)
    .await?;
    Ok(rows)
}

pub async fn count_shows<'e, E: SqliteExecutor<'e>>(executor: E) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shows")
        .fetch_one(executor)
        .await?;
    Ok(count)
}

/// Number of stored shows for one owner, regardless of time
pub async fn count_owner_shows<'e, E: SqliteExecutor<'e>>(
    executor: E,
    kind: OwnerKind,
    owner_id: &str,
) -> Result<i64> {
    let count: i64 = sqlx::query_scalar(&format!(
        "SELECT COUNT(*) FROM shows WHERE {} = ?",
        kind.show_column()
    ))
    .bind(owner_id)
    .fetch_one(executor)
    .await?;
    Ok(count)
}
