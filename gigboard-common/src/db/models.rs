//! Database models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

use crate::{Error, Result};

/// Image used when a venue is listed without one
pub const DEFAULT_VENUE_IMAGE: &str = "https://images.unsplash.com/photo-1543900694-133f37abaaa5?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=400&q=60";

/// Image used when an artist is listed without one
pub const DEFAULT_ARTIST_IMAGE: &str = "https://images.unsplash.com/photo-1549213783-8284d0336c4f?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=300&q=80";

pub const DEFAULT_WEBSITE: &str = "www.example.com";

/// The two entity kinds that take part in shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OwnerKind {
    Artist,
    Venue,
}

impl OwnerKind {
    /// The kind on the other side of a show
    pub fn counterpart(self) -> Self {
        match self {
            OwnerKind::Artist => OwnerKind::Venue,
            OwnerKind::Venue => OwnerKind::Artist,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OwnerKind::Artist => "artist",
            OwnerKind::Venue => "venue",
        }
    }

    pub(crate) fn table(self) -> &'static str {
        match self {
            OwnerKind::Artist => "artists",
            OwnerKind::Venue => "venues",
        }
    }

    /// Column in `shows` holding this kind's id
    pub(crate) fn show_column(self) -> &'static str {
        match self {
            OwnerKind::Artist => "artist_id",
            OwnerKind::Venue => "venue_id",
        }
    }

    /// Join table linking this kind to genres, and its owner column
    pub(crate) fn genre_link(self) -> (&'static str, &'static str) {
        match self {
            OwnerKind::Artist => ("artist_genres", "artist_id"),
            OwnerKind::Venue => ("venue_genres", "venue_id"),
        }
    }
}

impl fmt::Display for OwnerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Venue {
    pub id: String,
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// A show is identified by the (artist_id, venue_id, start_time) triple
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Show {
    pub artist_id: String,
    pub venue_id: String,
    pub start_time: DateTime<Utc>,
}

/// `{id, name}` projection used by select-list lookups and listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct NamedEntry {
    pub id: String,
    pub name: String,
}

/// Submitted venue fields (create and edit)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VenueDraft {
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    #[serde(default)]
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    /// Genre names; each must exist in the reference set
    #[serde(default)]
    pub genres: Vec<String>,
}

impl VenueDraft {
    /// Build the stored record, applying defaults for blank optional fields
    pub(crate) fn to_venue(&self, id: String) -> Result<Venue> {
        Ok(Venue {
            id,
            name: required_name(&self.name, OwnerKind::Venue)?,
            city: clean(&self.city),
            state: clean(&self.state),
            address: clean(&self.address),
            phone: clean(&self.phone),
            image_link: clean(&self.image_link).or_else(|| Some(DEFAULT_VENUE_IMAGE.to_string())),
            facebook_link: clean(&self.facebook_link),
            website: clean(&self.website).or_else(|| Some(DEFAULT_WEBSITE.to_string())),
            seeking_talent: self.seeking_talent,
            seeking_description: clean(&self.seeking_description),
        })
    }
}

/// Submitted artist fields (create and edit)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtistDraft {
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    #[serde(default)]
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
}

impl ArtistDraft {
    pub(crate) fn to_artist(&self, id: String) -> Result<Artist> {
        Ok(Artist {
            id,
            name: required_name(&self.name, OwnerKind::Artist)?,
            city: clean(&self.city),
            state: clean(&self.state),
            phone: clean(&self.phone),
            image_link: clean(&self.image_link).or_else(|| Some(DEFAULT_ARTIST_IMAGE.to_string())),
            facebook_link: clean(&self.facebook_link),
            website: clean(&self.website).or_else(|| Some(DEFAULT_WEBSITE.to_string())),
            seeking_venue: self.seeking_venue,
            seeking_description: clean(&self.seeking_description),
        })
    }
}

/// Submitted show fields; `start_time` is parsed by [`crate::time::parse_start_time`]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShowDraft {
    pub artist_id: String,
    pub venue_id: String,
    pub start_time: String,
}

fn required_name(name: &str, kind: OwnerKind) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput(format!("{} name is required", kind.label())));
    }
    Ok(trimmed.to_string())
}

/// Trim, and treat blank as absent
fn clean(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counterpart_is_symmetric() {
        assert_eq!(OwnerKind::Artist.counterpart(), OwnerKind::Venue);
        assert_eq!(OwnerKind::Venue.counterpart(), OwnerKind::Artist);
        assert_eq!(OwnerKind::Venue.to_string(), "venue");
    }

    #[test]
    fn test_venue_draft_applies_defaults() {
        let draft = VenueDraft {
            name: "  The Musical Hop ".to_string(),
            city: Some("San Francisco".to_string()),
            phone: Some("   ".to_string()),
            ..Default::default()
        };

        let venue = draft.to_venue("v1".to_string()).unwrap();
        assert_eq!(venue.name, "The Musical Hop");
        assert_eq!(venue.phone, None);
        assert_eq!(venue.image_link.as_deref(), Some(DEFAULT_VENUE_IMAGE));
        assert_eq!(venue.website.as_deref(), Some(DEFAULT_WEBSITE));
        assert!(!venue.seeking_talent);
    }

    #[test]
    fn test_blank_name_rejected() {
        let draft = ArtistDraft::default();
        assert!(matches!(
            draft.to_artist("a1".to_string()),
            Err(Error::InvalidInput(_))
        ));
    }
}
