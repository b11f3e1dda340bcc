//! View assembly
//!
//! Builds the flat records the presentation layer renders: venue and artist
//! pages, edit records, the venue and artist listings, and the show listing.
//! The `assemble_*` functions are pure; the async wrappers load rows and
//! delegate to them.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::db::genres::GenreMap;
use crate::db::models::{Artist, NamedEntry, OwnerKind, Venue};
use crate::db::shows::ShowRow;
use crate::db::{artists, owners, shows, venues};
use crate::schedule::{self, Schedule, ShowOccurrence};
use crate::{time, Result};

/// A show on a venue page: the performing artist
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueShow {
    pub artist_id: String,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

impl From<ShowOccurrence> for VenueShow {
    fn from(o: ShowOccurrence) -> Self {
        Self {
            artist_id: o.counterpart_id,
            artist_name: o.counterpart_name,
            artist_image_link: o.counterpart_image_link,
            start_time: time::to_iso8601(&o.start_time),
        }
    }
}

/// A show on an artist page: the hosting venue
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistShow {
    pub venue_id: String,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: String,
}

impl From<ShowOccurrence> for ArtistShow {
    fn from(o: ShowOccurrence) -> Self {
        Self {
            venue_id: o.counterpart_id,
            venue_name: o.counterpart_name,
            venue_image_link: o.counterpart_image_link,
            start_time: time::to_iso8601(&o.start_time),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenuePage {
    pub id: String,
    pub name: String,
    pub genres: Vec<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<VenueShow>,
    pub upcoming_shows: Vec<VenueShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistPage {
    pub id: String,
    pub name: String,
    pub genres: Vec<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<ArtistShow>,
    pub upcoming_shows: Vec<ArtistShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// Venue fields plus genre names, for pre-filling an edit form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueEdit {
    #[serde(flatten)]
    pub venue: Venue,
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistEdit {
    #[serde(flatten)]
    pub artist: Artist,
    pub genres: Vec<String>,
}

/// One row of the global show listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowListing {
    pub venue_id: String,
    pub venue_name: String,
    pub artist_id: String,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

impl From<ShowRow> for ShowListing {
    fn from(row: ShowRow) -> Self {
        Self {
            venue_id: row.venue_id,
            venue_name: row.venue_name,
            artist_id: row.artist_id,
            artist_name: row.artist_name,
            artist_image_link: row.artist_image_link,
            start_time: time::to_iso8601(&row.start_time),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueSummary {
    pub id: String,
    pub name: String,
    pub num_upcoming_shows: usize,
}

/// Venues sharing a city and state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueArea {
    pub city: Option<String>,
    pub state: Option<String>,
    pub venues: Vec<VenueSummary>,
}

pub fn assemble_venue_page(
    venue: Venue,
    genre_ids: &[i64],
    genre_map: &GenreMap,
    schedule: Schedule,
) -> Result<VenuePage> {
    let genres = genre_map.resolve_names(genre_ids)?;
    let past_shows_count = schedule.past_count();
    let upcoming_shows_count = schedule.upcoming_count();
    let (past, upcoming) = schedule.into_parts();

    Ok(VenuePage {
        id: venue.id,
        name: venue.name,
        genres,
        address: venue.address,
        city: venue.city,
        state: venue.state,
        phone: venue.phone,
        website: venue.website,
        facebook_link: venue.facebook_link,
        seeking_talent: venue.seeking_talent,
        seeking_description: venue.seeking_description,
        image_link: venue.image_link,
        past_shows: past.into_iter().map(VenueShow::from).collect(),
        upcoming_shows: upcoming.into_iter().map(VenueShow::from).collect(),
        past_shows_count,
        upcoming_shows_count,
    })
}

pub fn assemble_artist_page(
    artist: Artist,
    genre_ids: &[i64],
    genre_map: &GenreMap,
    schedule: Schedule,
) -> Result<ArtistPage> {
    let genres = genre_map.resolve_names(genre_ids)?;
    let past_shows_count = schedule.past_count();
    let upcoming_shows_count = schedule.upcoming_count();
    let (past, upcoming) = schedule.into_parts();

    Ok(ArtistPage {
        id: artist.id,
        name: artist.name,
        genres,
        city: artist.city,
        state: artist.state,
        phone: artist.phone,
        website: artist.website,
        facebook_link: artist.facebook_link,
        seeking_venue: artist.seeking_venue,
        seeking_description: artist.seeking_description,
        image_link: artist.image_link,
        past_shows: past.into_iter().map(ArtistShow::from).collect(),
        upcoming_shows: upcoming.into_iter().map(ArtistShow::from).collect(),
        past_shows_count,
        upcoming_shows_count,
    })
}

/// Group venues by exact (city, state), keeping first-seen area order
///
/// Venues inside an area keep their incoming order. Grouping does not rely
/// on equal areas being adjacent.
pub fn group_by_area(venues: Vec<(Venue, usize)>) -> Vec<VenueArea> {
    let mut areas: Vec<VenueArea> = Vec::new();
    let mut index: HashMap<(Option<String>, Option<String>), usize> = HashMap::new();

    for (venue, num_upcoming_shows) in venues {
        let summary = VenueSummary {
            id: venue.id,
            name: venue.name,
            num_upcoming_shows,
        };
        let key = (venue.city, venue.state);
        match index.get(&key) {
            Some(&position) => areas[position].venues.push(summary),
            None => {
                index.insert(key.clone(), areas.len());
                areas.push(VenueArea {
                    city: key.0,
                    state: key.1,
                    venues: vec![summary],
                });
            }
        }
    }
    areas
}

/// Venue page, or `None` if the venue does not exist
pub async fn venue_page(
    pool: &SqlitePool,
    genre_map: &GenreMap,
    venue_id: &str,
    now: DateTime<Utc>,
) -> Result<Option<VenuePage>> {
    let Some(venue) = venues::get_venue(pool, venue_id).await? else {
        return Ok(None);
    };
    let genre_ids = venues::venue_genre_ids(pool, venue_id).await?;
    let schedule = schedule::classify_owner(pool, OwnerKind::Venue, venue_id, now).await?;

    assemble_venue_page(venue, &genre_ids, genre_map, schedule).map(Some)
}

/// Artist page, or `None` if the artist does not exist
pub async fn artist_page(
    pool: &SqlitePool,
    genre_map: &GenreMap,
    artist_id: &str,
    now: DateTime<Utc>,
) -> Result<Option<ArtistPage>> {
    let Some(artist) = artists::get_artist(pool, artist_id).await? else {
        return Ok(None);
    };
    let genre_ids = artists::artist_genre_ids(pool, artist_id).await?;
    let schedule = schedule::classify_owner(pool, OwnerKind::Artist, artist_id, now).await?;

    assemble_artist_page(artist, &genre_ids, genre_map, schedule).map(Some)
}

pub async fn venue_edit(pool: &SqlitePool, genre_map: &GenreMap, venue_id: &str) -> Result<Option<VenueEdit>> {
    let Some(venue) = venues::get_venue(pool, venue_id).await? else {
        return Ok(None);
    };
    let genre_ids = venues::venue_genre_ids(pool, venue_id).await?;
    let genres = genre_map.resolve_names(&genre_ids)?;
    Ok(Some(VenueEdit { venue, genres }))
}

pub async fn artist_edit(pool: &SqlitePool, genre_map: &GenreMap, artist_id: &str) -> Result<Option<ArtistEdit>> {
    let Some(artist) = artists::get_artist(pool, artist_id).await? else {
        return Ok(None);
    };
    let genre_ids = artists::artist_genre_ids(pool, artist_id).await?;
    let genres = genre_map.resolve_names(&genre_ids)?;
    Ok(Some(ArtistEdit { artist, genres }))
}

/// Every show, joined with its artist and venue
pub async fn show_listing(pool: &SqlitePool) -> Result<Vec<ShowListing>> {
    let rows = shows::list_show_rows(pool).await?;
    Ok(rows.into_iter().map(ShowListing::from).collect())
}

/// Venues grouped by area, each with its upcoming show count
pub async fn venue_areas(pool: &SqlitePool, now: DateTime<Utc>) -> Result<Vec<VenueArea>> {
    let all = venues::list_venues(pool).await?;
    let mut counted = Vec::with_capacity(all.len());
    for venue in all {
        let schedule = schedule::classify_owner(pool, OwnerKind::Venue, &venue.id, now).await?;
        counted.push((venue, schedule.upcoming_count()));
    }
    Ok(group_by_area(counted))
}

/// Every artist as `{id, name}`, ordered by name
pub async fn artist_listing(pool: &SqlitePool) -> Result<Vec<NamedEntry>> {
    owners::list_entries(pool, OwnerKind::Artist).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::Genre;
    use crate::Error;
    use chrono::TimeZone;

    fn genre_map() -> GenreMap {
        GenreMap::from_genres(vec![
            Genre { id: 1, name: "Jazz".to_string() },
            Genre { id: 2, name: "Classical".to_string() },
        ])
    }

    fn artist() -> Artist {
        Artist {
            id: "a-1".to_string(),
            name: "The Wild Sax Band".to_string(),
            city: Some("San Francisco".to_string()),
            state: Some("CA".to_string()),
            phone: Some("432-325-5432".to_string()),
            image_link: None,
            facebook_link: None,
            website: None,
            seeking_venue: false,
            seeking_description: None,
        }
    }

    fn venue(id: &str, name: &str, city: &str, state: &str) -> Venue {
        Venue {
            id: id.to_string(),
            name: name.to_string(),
            city: Some(city.to_string()),
            state: Some(state.to_string()),
            address: None,
            phone: None,
            image_link: None,
            facebook_link: None,
            website: None,
            seeking_talent: false,
            seeking_description: None,
        }
    }

    fn occurrence(venue: &str, y: i32, mo: u32, d: u32) -> ShowOccurrence {
        ShowOccurrence {
            counterpart_id: format!("v-{}", venue),
            counterpart_name: venue.to_string(),
            counterpart_image_link: Some("https://img.example.com/v.png".to_string()),
            start_time: Utc.with_ymd_and_hms(y, mo, d, 20, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_artist_page_with_two_past_and_one_upcoming() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let schedule = Schedule::partition(
            vec![
                occurrence("Park Square", 2019, 6, 15),
                occurrence("The Musical Hop", 2019, 5, 21),
                occurrence("Park Square", 2035, 4, 1),
            ],
            now,
        );

        let page = assemble_artist_page(artist(), &[2, 1], &genre_map(), schedule).unwrap();

        assert_eq!(page.past_shows_count, 2);
        assert_eq!(page.upcoming_shows_count, 1);
        assert_eq!(page.past_shows.len(), 2);
        assert_eq!(page.upcoming_shows.len(), 1);
        assert_eq!(page.genres, vec!["Classical".to_string(), "Jazz".to_string()]);
        assert_eq!(page.upcoming_shows[0].venue_name, "Park Square");
        assert_eq!(page.upcoming_shows[0].start_time, "2035-04-01T20:00:00Z");
    }

    #[test]
    fn test_page_with_unknown_genre_fails_loudly() {
        let err = assemble_artist_page(artist(), &[1, 42], &genre_map(), Schedule::default())
            .unwrap_err();
        assert!(matches!(err, Error::Integrity(_)), "got {:?}", err);
    }

    #[test]
    fn test_venue_page_serializes_artist_fields() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let schedule = Schedule::partition(vec![occurrence("Guns N Petals", 2019, 5, 21)], now);
        let page = assemble_venue_page(
            venue("v-1", "The Musical Hop", "San Francisco", "CA"),
            &[1],
            &genre_map(),
            schedule,
        )
        .unwrap();

        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["past_shows_count"], 1);
        assert_eq!(json["upcoming_shows_count"], 0);
        assert_eq!(json["past_shows"][0]["artist_name"], "Guns N Petals");
        assert_eq!(json["past_shows"][0]["start_time"], "2019-05-21T20:00:00Z");
        assert_eq!(json["genres"][0], "Jazz");
    }

    #[test]
    fn test_group_by_area_merges_adjacent_city_state() {
        let areas = group_by_area(vec![
            (venue("1", "The Musical Hop", "San Francisco", "CA"), 0),
            (venue("3", "Park Square Live Music & Coffee", "San Francisco", "CA"), 3),
            (venue("2", "The Dueling Pianos Bar", "New York", "NY"), 0),
        ]);

        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].city.as_deref(), Some("San Francisco"));
        assert_eq!(areas[0].venues.len(), 2);
        assert_eq!(areas[0].venues[1].num_upcoming_shows, 3);
        assert_eq!(areas[1].state.as_deref(), Some("NY"));
    }

    #[test]
    fn test_group_by_area_has_one_entry_per_exact_area() {
        let areas = group_by_area(vec![
            (venue("1", "Alpha", "San Francisco", "CA"), 0),
            (venue("2", "Beta", "san francisco", "CA"), 1),
            (venue("3", "Gamma", "San Francisco", "CA"), 2),
        ]);

        assert_eq!(areas.len(), 2);
        let names: Vec<&str> = areas[0].venues.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Gamma"]);
        assert_eq!(areas[1].city.as_deref(), Some("san francisco"));
        assert_eq!(areas[1].venues[0].name, "Beta");
    }

    #[test]
    fn test_edit_record_flattens_fields() {
        let edit = ArtistEdit {
            artist: artist(),
            genres: vec!["Jazz".to_string()],
        };
        let json = serde_json::to_value(&edit).unwrap();
        assert_eq!(json["name"], "The Wild Sax Band");
        assert_eq!(json["genres"][0], "Jazz");
    }
}
