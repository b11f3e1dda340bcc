//! HTTP API handlers for gigboard-web

pub mod artists;
pub mod health;
pub mod shows;
pub mod venues;

use serde::{Deserialize, Serialize};

pub use artists::artist_routes;
pub use health::health_routes;
pub use shows::show_routes;
pub use venues::venue_routes;

/// Form body for `POST /venues/search` and `POST /artists/search`
#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search_term: String,
}

/// Response to a successful create, update or delete
#[derive(Debug, Serialize)]
pub struct MutationResponse {
    pub id: String,
    pub message: String,
}
