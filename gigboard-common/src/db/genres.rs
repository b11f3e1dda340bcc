//! Genre reference set and owner genre links

use std::collections::BTreeMap;

use sqlx::{SqliteConnection, SqliteExecutor};

use super::models::{Genre, OwnerKind};
use crate::{Error, Result};

/// Genre id → name lookup
///
/// Built once from the store after seeding and passed explicitly to the
/// view assembly code. The mapping is expected to be total over every genre
/// id referenced by a link row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenreMap {
    names: BTreeMap<i64, String>,
}

impl GenreMap {
    pub fn from_genres(genres: impl IntoIterator<Item = Genre>) -> Self {
        Self {
            names: genres.into_iter().map(|g| (g.id, g.name)).collect(),
        }
    }

    /// Snapshot the current reference set
    pub async fn load<'e, E: SqliteExecutor<'e>>(executor: E) -> Result<Self> {
        Ok(Self::from_genres(list_genres(executor).await?))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Name for a genre id; a missing id is a data-integrity error
    pub fn name(&self, id: i64) -> Result<&str> {
        self.names
            .get(&id)
            .map(String::as_str)
            .ok_or_else(|| Error::Integrity(format!("genre id {} is not in the reference set", id)))
    }

    /// Resolve stored genre ids to names, preserving order
    pub fn resolve_names(&self, ids: &[i64]) -> Result<Vec<String>> {
        ids.iter()
            .map(|id| self.name(*id).map(str::to_string))
            .collect()
    }

    pub fn id_for(&self, name: &str) -> Option<i64> {
        self.names
            .iter()
            .find(|(_, n)| n.as_str() == name)
            .map(|(id, _)| *id)
    }

    /// Resolve submitted genre names to ids, dropping repeats
    ///
    /// Unknown names are rejected as invalid input.
    pub fn resolve_ids(&self, names: &[String]) -> Result<Vec<i64>> {
        let mut ids = Vec::with_capacity(names.len());
        for name in names {
            let id = self
                .id_for(name.trim())
                .ok_or_else(|| Error::InvalidInput(format!("Unknown genre: {}", name)))?;
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        Ok(ids)
    }

    /// Genre names in id order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.values().map(String::as_str)
    }
}

pub async fn list_genres<'e, E: SqliteExecutor<'e>>(executor: E) -> Result<Vec<Genre>> {
    let genres = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres ORDER BY id")
        .fetch_all(executor)
        .await?;
    Ok(genres)
}

/// Insert a genre unless one with that name exists; returns true if inserted
pub async fn ensure_genre(conn: &mut SqliteConnection, name: &str) -> Result<bool> {
    let result = sqlx::query("INSERT INTO genres (name) VALUES (?) ON CONFLICT(name) DO NOTHING")
        .bind(name)
        .execute(conn)
        .await?;
    Ok(result.rows_affected() == 1)
}

/// Genre ids linked to an owner, in id order
pub async fn owner_genre_ids<'e, E: SqliteExecutor<'e>>(
    executor: E,
    kind: OwnerKind,
    owner_id: &str,
) -> Result<Vec<i64>> {
    let (table, owner_column) = kind.genre_link();
    let ids = sqlx::query_scalar::<_, i64>(&format!(
        "SELECT genre_id FROM {} WHERE {} = ? ORDER BY genre_id",
        table, owner_column
    ))
    .bind(owner_id)
    .fetch_all(executor)
    .await?;
    Ok(ids)
}

/// Replace an owner's genre links with `genre_ids`
///
/// Run inside the owner's unit of work so the links never outlive a failed
/// write of the owner row.
pub async fn replace_owner_genres(
    conn: &mut SqliteConnection,
    kind: OwnerKind,
    owner_id: &str,
    genre_ids: &[i64],
) -> Result<()> {
    let (table, owner_column) = kind.genre_link();

    sqlx::query(&format!("DELETE FROM {} WHERE {} = ?", table, owner_column))
        .bind(owner_id)
        .execute(&mut *conn)
        .await?;

    let insert = format!("INSERT INTO {} ({}, genre_id) VALUES (?, ?)", table, owner_column);
    for genre_id in genre_ids {
        sqlx::query(&insert)
            .bind(owner_id)
            .bind(*genre_id)
            .execute(&mut *conn)
            .await
            .map_err(|e| Error::from_write(e, format!("genre {} for {} {}", genre_id, kind, owner_id)))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_map() -> GenreMap {
        GenreMap::from_genres(vec![
            Genre { id: 1, name: "Jazz".to_string() },
            Genre { id: 2, name: "Rock n Roll".to_string() },
            Genre { id: 5, name: "Folk".to_string() },
        ])
    }

    #[test]
    fn test_resolve_names_in_given_order() {
        let map = sample_map();
        assert_eq!(
            map.resolve_names(&[5, 1]).unwrap(),
            vec!["Folk".to_string(), "Jazz".to_string()]
        );
    }

    #[test]
    fn test_missing_id_is_integrity_error() {
        let map = sample_map();
        let err = map.resolve_names(&[1, 99]).unwrap_err();
        assert!(matches!(err, Error::Integrity(_)), "got {:?}", err);
    }

    #[test]
    fn test_resolve_ids_rejects_unknown_and_dedupes() {
        let map = sample_map();
        assert_eq!(
            map.resolve_ids(&["Jazz".to_string(), " Jazz".to_string(), "Folk".to_string()])
                .unwrap(),
            vec![1, 5]
        );
        assert!(matches!(
            map.resolve_ids(&["Polka".to_string()]),
            Err(Error::InvalidInput(_))
        ));
    }
}
