//! Reference and sample data seeding
//!
//! Genres are inserted per name when missing. Sample venues, artists and
//! shows are inserted only into an empty collection, so running the seed
//! again against a populated database changes nothing.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::{info, warn};

use crate::db::genres::{self, GenreMap};
use crate::db::models::{ArtistDraft, OwnerKind, Show, VenueDraft};
use crate::db::unit_of_work::UnitOfWork;
use crate::db::{artists, owners, shows, venues};
use crate::{time, uuid_utils, Result};

/// The closed genre reference set
pub const REFERENCE_GENRES: [&str; 20] = [
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Swing",
    "Other",
];

/// What a seed run inserted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub genres_added: usize,
    pub venues_added: usize,
    pub artists_added: usize,
    pub shows_added: usize,
}

struct SampleVenue {
    name: &'static str,
    genres: &'static [&'static str],
    address: &'static str,
    city: &'static str,
    state: &'static str,
    phone: &'static str,
    website: &'static str,
    facebook_link: &'static str,
    seeking_talent: bool,
    seeking_description: Option<&'static str>,
    image_link: &'static str,
}

impl SampleVenue {
    fn draft(&self) -> VenueDraft {
        VenueDraft {
            name: self.name.to_string(),
            city: Some(self.city.to_string()),
            state: Some(self.state.to_string()),
            address: Some(self.address.to_string()),
            phone: Some(self.phone.to_string()),
            image_link: Some(self.image_link.to_string()),
            facebook_link: Some(self.facebook_link.to_string()),
            website: Some(self.website.to_string()),
            seeking_talent: self.seeking_talent,
            seeking_description: self.seeking_description.map(str::to_string),
            genres: self.genres.iter().map(|g| g.to_string()).collect(),
        }
    }
}

struct SampleArtist {
    name: &'static str,
    genres: &'static [&'static str],
    city: &'static str,
    state: &'static str,
    phone: &'static str,
    website: Option<&'static str>,
    facebook_link: Option<&'static str>,
    seeking_venue: bool,
    seeking_description: Option<&'static str>,
    image_link: &'static str,
}

impl SampleArtist {
    fn draft(&self) -> ArtistDraft {
        ArtistDraft {
            name: self.name.to_string(),
            city: Some(self.city.to_string()),
            state: Some(self.state.to_string()),
            phone: Some(self.phone.to_string()),
            image_link: Some(self.image_link.to_string()),
            facebook_link: self.facebook_link.map(str::to_string),
            website: self.website.map(str::to_string),
            seeking_venue: self.seeking_venue,
            seeking_description: self.seeking_description.map(str::to_string),
            genres: self.genres.iter().map(|g| g.to_string()).collect(),
        }
    }
}

struct SampleShow {
    artist: &'static str,
    venue: &'static str,
    start_time: &'static str,
}

const SAMPLE_VENUES: [SampleVenue; 3] = [
    SampleVenue {
        name: "The Musical Hop",
        genres: &["Jazz", "Reggae", "Swing", "Classical", "Folk"],
        address: "1015 Folsom Street",
        city: "San Francisco",
        state: "CA",
        phone: "123-123-1234",
        website: "https://www.themusicalhop.com",
        facebook_link: "https://www.facebook.com/TheMusicalHop",
        seeking_talent: true,
        seeking_description: Some(
            "We are on the lookout for a local artist to play every two weeks. Please call us.",
        ),
        image_link: "https://images.unsplash.com/photo-1543900694-133f37abaaa5?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=400&q=60",
    },
    SampleVenue {
        name: "The Dueling Pianos Bar",
        genres: &["Classical", "R&B", "Hip-Hop"],
        address: "335 Delancey Street",
        city: "New York",
        state: "NY",
        phone: "914-003-1132",
        website: "https://www.theduelingpianos.com",
        facebook_link: "https://www.facebook.com/theduelingpianos",
        seeking_talent: false,
        seeking_description: None,
        image_link: "https://images.unsplash.com/photo-1497032205916-ac775f0649ae?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=750&q=80",
    },
    SampleVenue {
        name: "Park Square Live Music & Coffee",
        genres: &["Rock n Roll", "Jazz", "Classical", "Folk"],
        address: "34 Whiskey Moore Ave",
        city: "San Francisco",
        state: "CA",
        phone: "415-000-1234",
        website: "https://www.parksquarelivemusicandcoffee.com",
        facebook_link: "https://www.facebook.com/ParkSquareLiveMusicAndCoffee",
        seeking_talent: false,
        seeking_description: None,
        image_link: "https://images.unsplash.com/photo-1485686531765-ba63b07845a7?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=747&q=80",
    },
];

const SAMPLE_ARTISTS: [SampleArtist; 3] = [
    SampleArtist {
        name: "Guns N Petals",
        genres: &["Rock n Roll"],
        city: "San Francisco",
        state: "CA",
        phone: "326-123-5000",
        website: Some("https://www.gunsnpetalsband.com"),
        facebook_link: Some("https://www.facebook.com/GunsNPetals"),
        seeking_venue: true,
        seeking_description: Some("Looking for shows to perform at in the San Francisco Bay Area!"),
        image_link: "https://images.unsplash.com/photo-1549213783-8284d0336c4f?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=300&q=80",
    },
    SampleArtist {
        name: "Matt Quevedo",
        genres: &["Jazz"],
        city: "New York",
        state: "NY",
        phone: "300-400-5000",
        website: None,
        facebook_link: Some("https://www.facebook.com/mattquevedo923251523"),
        seeking_venue: false,
        seeking_description: None,
        image_link: "https://images.unsplash.com/photo-1495223153807-b916f75de8c5?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=334&q=80",
    },
    SampleArtist {
        name: "The Wild Sax Band",
        genres: &["Jazz", "Classical"],
        city: "San Francisco",
        state: "CA",
        phone: "432-325-5432",
        website: None,
        facebook_link: None,
        seeking_venue: false,
        seeking_description: None,
        image_link: "https://images.unsplash.com/photo-1558369981-f9ca78462e61?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=794&q=80",
    },
];

const SAMPLE_SHOWS: [SampleShow; 5] = [
    SampleShow {
        artist: "Guns N Petals",
        venue: "The Musical Hop",
        start_time: "2019-05-21T21:30:00Z",
    },
    SampleShow {
        artist: "Matt Quevedo",
        venue: "Park Square Live Music & Coffee",
        start_time: "2019-06-15T23:00:00Z",
    },
    SampleShow {
        artist: "The Wild Sax Band",
        venue: "Park Square Live Music & Coffee",
        start_time: "2035-04-01T20:00:00Z",
    },
    SampleShow {
        artist: "The Wild Sax Band",
        venue: "Park Square Live Music & Coffee",
        start_time: "2035-04-08T20:00:00Z",
    },
    SampleShow {
        artist: "The Wild Sax Band",
        venue: "Park Square Live Music & Coffee",
        start_time: "2035-04-15T20:00:00Z",
    },
];

/// Seed the reference genres and, when `include_samples`, the sample dataset
///
/// Runs as one unit of work: either everything listed in the report is
/// written, or nothing is.
pub async fn seed_database(pool: &SqlitePool, include_samples: bool) -> Result<SeedReport> {
    let mut work = UnitOfWork::begin(pool, "seed database").await?;
    let outcome = seed_with(work.conn(), include_samples).await;
    let report = work.finish(outcome).await?;

    info!(
        "Seeding complete: {} genres, {} venues, {} artists, {} shows added",
        report.genres_added, report.venues_added, report.artists_added, report.shows_added
    );
    Ok(report)
}

async fn seed_with(conn: &mut SqliteConnection, include_samples: bool) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    for name in REFERENCE_GENRES {
        if genres::ensure_genre(conn, name).await? {
            report.genres_added += 1;
        }
    }

    if !include_samples {
        return Ok(report);
    }

    let genre_map = GenreMap::load(&mut *conn).await?;

    if owners::count_owners(&mut *conn, OwnerKind::Venue).await? == 0 {
        for sample in &SAMPLE_VENUES {
            let draft = sample.draft();
            let venue = draft.to_venue(uuid_utils::generate())?;
            let genre_ids = genre_map.resolve_ids(&draft.genres)?;
            venues::insert_with_genres(conn, &venue, &genre_ids).await?;
            report.venues_added += 1;
        }
    }

    if owners::count_owners(&mut *conn, OwnerKind::Artist).await? == 0 {
        for sample in &SAMPLE_ARTISTS {
            let draft = sample.draft();
            let artist = draft.to_artist(uuid_utils::generate())?;
            let genre_ids = genre_map.resolve_ids(&draft.genres)?;
            artists::insert_with_genres(conn, &artist, &genre_ids).await?;
            report.artists_added += 1;
        }
    }

    if shows::count_shows(&mut *conn).await? == 0 {
        for sample in &SAMPLE_SHOWS {
            let artist_id = owners::find_id_by_name(&mut *conn, OwnerKind::Artist, sample.artist).await?;
            let venue_id = owners::find_id_by_name(&mut *conn, OwnerKind::Venue, sample.venue).await?;

            let (Some(artist_id), Some(venue_id)) = (artist_id, venue_id) else {
                warn!(
                    "Skipping sample show {} at {}: owner not found",
                    sample.artist, sample.venue
                );
                continue;
            };

            let show = Show {
                artist_id,
                venue_id,
                start_time: time::parse_start_time(sample.start_time)?,
            };
            shows::insert_show(conn, &show).await?;
            report.shows_added += 1;
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_genres_are_unique() {
        let mut names: Vec<&str> = REFERENCE_GENRES.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), REFERENCE_GENRES.len());
    }

    #[test]
    fn test_sample_data_uses_reference_genres_and_owners() {
        for genre in SAMPLE_VENUES
            .iter()
            .flat_map(|v| v.genres.iter())
            .chain(SAMPLE_ARTISTS.iter().flat_map(|a| a.genres.iter()))
        {
            assert!(REFERENCE_GENRES.contains(genre), "{} is not a reference genre", genre);
        }

        for show in &SAMPLE_SHOWS {
            assert!(SAMPLE_ARTISTS.iter().any(|a| a.name == show.artist));
            assert!(SAMPLE_VENUES.iter().any(|v| v.name == show.venue));
            assert!(time::parse_start_time(show.start_time).is_ok());
        }
    }
}
