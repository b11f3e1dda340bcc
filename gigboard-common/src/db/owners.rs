//! Queries shared by venues and artists, parameterized by [`OwnerKind`]

use sqlx::{SqliteExecutor, SqlitePool};
use tracing::info;

use super::models::{NamedEntry, OwnerKind};
use super::unit_of_work::UnitOfWork;
use crate::{Error, Result};

pub async fn count_owners<'e, E: SqliteExecutor<'e>>(executor: E, kind: OwnerKind) -> Result<i64> {
    let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", kind.table()))
        .fetch_one(executor)
        .await?;
    Ok(count)
}

pub async fn owner_exists<'e, E: SqliteExecutor<'e>>(
    executor: E,
    kind: OwnerKind,
    owner_id: &str,
) -> Result<bool> {
    let exists: bool = sqlx::query_scalar(&format!(
        "SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?)",
        kind.table()
    ))
    .bind(owner_id)
    .fetch_one(executor)
    .await?;
    Ok(exists)
}

/// Every owner of a kind as `{id, name}`, ordered by name
pub async fn list_entries<'e, E: SqliteExecutor<'e>>(
    executor: E,
    kind: OwnerKind,
) -> Result<Vec<NamedEntry>> {
    let entries = sqlx::query_as::<_, NamedEntry>(&format!(
        "SELECT id, name FROM {} ORDER BY name COLLATE NOCASE, id",
        kind.table()
    ))
    .fetch_all(executor)
    .await?;
    Ok(entries)
}

/// Owners whose name contains `query`, ignoring case
///
/// Folding uses Unicode lowercase mappings, so "über" finds "Ölbar Über".
/// The query is matched as a plain substring: an empty query matches every
/// row and no character is special. Order is the same as [`list_entries`].
pub async fn find_by_name<'e, E: SqliteExecutor<'e>>(
    executor: E,
    kind: OwnerKind,
    query: &str,
) -> Result<Vec<NamedEntry>> {
    let needle = query.to_lowercase();
    let entries = list_entries(executor, kind).await?;
    Ok(entries
        .into_iter()
        .filter(|entry| entry.name.to_lowercase().contains(&needle))
        .collect())
}

/// Id of the first-created owner with exactly this name
pub async fn find_id_by_name<'e, E: SqliteExecutor<'e>>(
    executor: E,
    kind: OwnerKind,
    name: &str,
) -> Result<Option<String>> {
    let id: Option<String> = sqlx::query_scalar(&format!(
        "SELECT id FROM {} WHERE name = ? ORDER BY created_at, id LIMIT 1",
        kind.table()
    ))
    .bind(name)
    .fetch_optional(executor)
    .await?;
    Ok(id)
}

/// Delete an owner; shows and genre links go with it (ON DELETE CASCADE)
pub async fn delete_owner(pool: &SqlitePool, kind: OwnerKind, owner_id: &str) -> Result<()> {
    let mut work = UnitOfWork::begin(pool, "delete owner").await?;
    let outcome = sqlx::query(&format!("DELETE FROM {} WHERE id = ?", kind.table()))
        .bind(owner_id)
        .execute(work.conn())
        .await
        .map_err(Error::from);
    let deleted = work.finish(outcome).await?.rows_affected();

    if deleted == 0 {
        return Err(Error::NotFound(format!("{} {}", kind, owner_id)));
    }
    info!("Deleted {} {}", kind, owner_id);
    Ok(())
}
