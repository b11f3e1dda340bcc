//! gigboard-web library - HTTP surface for the Gigboard booking directory

use std::sync::Arc;

use axum::Router;
use gigboard_common::GenreMap;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    /// Genre reference set, loaded once after seeding
    pub genres: Arc<GenreMap>,
}

impl AppState {
    pub fn new(db: SqlitePool, genres: GenreMap) -> Self {
        Self {
            db,
            genres: Arc::new(genres),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::health_routes())
        .merge(api::venue_routes())
        .merge(api::artist_routes())
        .merge(api::show_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
