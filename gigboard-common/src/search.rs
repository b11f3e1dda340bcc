//! Name search over venues or artists

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::db::models::OwnerKind;
use crate::db::owners;
use crate::schedule;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub id: String,
    pub name: String,
    pub num_upcoming_shows: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<SearchHit>,
}

/// Case-insensitive substring match on name
///
/// The query is trimmed; an empty query matches everything. Results are
/// ordered by name (ignoring case), then id.
pub async fn search(
    pool: &SqlitePool,
    kind: OwnerKind,
    query: &str,
    now: DateTime<Utc>,
) -> Result<SearchResults> {
    let matches = owners::find_by_name(pool, kind, query.trim()).await?;

    let mut data = Vec::with_capacity(matches.len());
    for entry in matches {
        let schedule = schedule::classify_owner(pool, kind, &entry.id, now).await?;
        data.push(SearchHit {
            id: entry.id,
            name: entry.name,
            num_upcoming_shows: schedule.upcoming_count(),
        });
    }

    Ok(SearchResults {
        count: data.len(),
        data,
    })
}
