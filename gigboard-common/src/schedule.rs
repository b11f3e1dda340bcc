//! Show scheduling: past/upcoming classification
//!
//! A show is past when its start time is strictly before `now` and upcoming
//! when strictly after. A show starting exactly at `now` is in neither
//! partition. Callers capture `now` once per request and pass it in, so
//! every owner classified within a request shares one boundary.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqliteExecutor};

use crate::db::models::OwnerKind;
use crate::Result;

/// One show seen from an owner: who is on the other side, and when
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ShowOccurrence {
    pub counterpart_id: String,
    pub counterpart_name: String,
    pub counterpart_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// An owner's shows split around a single instant
///
/// Counts are read off the sequences, so they always agree with them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    past: Vec<ShowOccurrence>,
    upcoming: Vec<ShowOccurrence>,
}

impl Schedule {
    /// Partition occurrences around `now`, keeping their relative order
    pub fn partition(occurrences: impl IntoIterator<Item = ShowOccurrence>, now: DateTime<Utc>) -> Self {
        let mut schedule = Self::default();
        for occurrence in occurrences {
            if occurrence.start_time < now {
                schedule.past.push(occurrence);
            } else if occurrence.start_time > now {
                schedule.upcoming.push(occurrence);
            }
        }
        schedule
    }

    pub fn past(&self) -> &[ShowOccurrence] {
        &self.past
    }

    pub fn upcoming(&self) -> &[ShowOccurrence] {
        &self.upcoming
    }

    pub fn past_count(&self) -> usize {
        self.past.len()
    }

    pub fn upcoming_count(&self) -> usize {
        self.upcoming.len()
    }

    pub fn into_parts(self) -> (Vec<ShowOccurrence>, Vec<ShowOccurrence>) {
        (self.past, self.upcoming)
    }
}

/// Load an owner's shows joined with the counterpart, by start time
///
/// An unknown owner id simply has no rows.
pub async fn load_occurrences<'e, E: SqliteExecutor<'e>>(
    executor: E,
    kind: OwnerKind,
    owner_id: &str,
) -> Result<Vec<ShowOccurrence>> {
    let counterpart = kind.counterpart();
    let sql = format!(
        "SELECT c.id AS counterpart_id, c.name AS counterpart_name,
                c.image_link AS counterpart_image_link, s.start_time AS start_time
         FROM shows s
         JOIN {table} c ON c.id = s.{join_column}
         WHERE s.{owner_column} = ?
         ORDER BY s.start_time, c.name COLLATE NOCASE",
        table = counterpart.table(),
        join_column = counterpart.show_column(),
        owner_column = kind.show_column(),
    );

    let occurrences = sqlx::query_as::<_, ShowOccurrence>(&sql)
        .bind(owner_id)
        .fetch_all(executor)
        .await?;
    Ok(occurrences)
}

/// Classify one owner's shows around `now`
pub async fn classify_owner<'e, E: SqliteExecutor<'e>>(
    executor: E,
    kind: OwnerKind,
    owner_id: &str,
    now: DateTime<Utc>,
) -> Result<Schedule> {
    let occurrences = load_occurrences(executor, kind, owner_id).await?;
    Ok(Schedule::partition(occurrences, now))
}
