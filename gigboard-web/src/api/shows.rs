//! Show endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use gigboard_common::db::models::ShowDraft;
use gigboard_common::db::shows;
use gigboard_common::time;
use gigboard_common::views::{self, ShowListing};
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Response to a listed show
#[derive(Debug, Serialize)]
pub struct ShowCreated {
    pub artist_id: String,
    pub venue_id: String,
    pub start_time: String,
    pub message: String,
}

/// GET /shows
pub async fn list_shows(State(state): State<AppState>) -> ApiResult<Json<Vec<ShowListing>>> {
    let listing = views::show_listing(&state.db).await?;
    Ok(Json(listing))
}

/// POST /shows/create
///
/// Both owners must exist; the same artist, venue and start time may only be
/// listed once.
pub async fn create_show(
    State(state): State<AppState>,
    payload: Result<Json<ShowDraft>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ShowCreated>)> {
    let Json(draft) = payload?;
    let show = shows::create_show(&state.db, &draft)
        .await
        .map_err(|e| ApiError::from_common(e, "Show could not be listed."))?;

    Ok((
        StatusCode::CREATED,
        Json(ShowCreated {
            start_time: time::to_iso8601(&show.start_time),
            artist_id: show.artist_id,
            venue_id: show.venue_id,
            message: "Show was successfully listed!".to_string(),
        }),
    ))
}

/// Build show routes
pub fn show_routes() -> Router<AppState> {
    Router::new()
        .route("/shows", get(list_shows))
        .route("/shows/create", post(create_show))
}
