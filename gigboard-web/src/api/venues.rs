//! Venue endpoints

use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection},
        Path, State,
    },
    http::StatusCode,
    routing::{get, post},
    Form, Json, Router,
};
use gigboard_common::db::models::{NamedEntry, VenueDraft};
use gigboard_common::db::{owners, venues};
use gigboard_common::search::{self, SearchResults};
use gigboard_common::views::{self, VenueArea, VenueEdit, VenuePage};
use gigboard_common::{time, OwnerKind};

use super::{MutationResponse, SearchForm};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// GET /venues
///
/// Venues grouped by city and state, each with its upcoming show count.
pub async fn list_venues(State(state): State<AppState>) -> ApiResult<Json<Vec<VenueArea>>> {
    let areas = views::venue_areas(&state.db, time::now()).await?;
    Ok(Json(areas))
}

/// GET /venues/all
pub async fn all_venues(State(state): State<AppState>) -> ApiResult<Json<Vec<NamedEntry>>> {
    let entries = owners::list_entries(&state.db, OwnerKind::Venue).await?;
    Ok(Json(entries))
}

/// POST /venues/search
pub async fn search_venues(
    State(state): State<AppState>,
    payload: Result<Form<SearchForm>, FormRejection>,
) -> ApiResult<Json<SearchResults>> {
    let Form(form) = payload?;
    let results = search::search(&state.db, OwnerKind::Venue, &form.search_term, time::now()).await?;
    Ok(Json(results))
}

/// GET /venues/:id
pub async fn show_venue(
    State(state): State<AppState>,
    Path(venue_id): Path<String>,
) -> ApiResult<Json<VenuePage>> {
    views::venue_page(&state.db, &state.genres, &venue_id, time::now())
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("venue {}", venue_id)))
}

/// POST /venues/create
pub async fn create_venue(
    State(state): State<AppState>,
    payload: Result<Json<VenueDraft>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<MutationResponse>)> {
    let Json(draft) = payload?;
    let venue = venues::create_venue(&state.db, &state.genres, &draft)
        .await
        .map_err(|e| ApiError::from_common(e, &format!("Venue {} could not be listed.", draft.name)))?;

    Ok((
        StatusCode::CREATED,
        Json(MutationResponse {
            message: format!("Venue {} was successfully listed!", venue.name),
            id: venue.id,
        }),
    ))
}

/// GET /venues/:id/edit
pub async fn edit_venue_form(
    State(state): State<AppState>,
    Path(venue_id): Path<String>,
) -> ApiResult<Json<VenueEdit>> {
    views::venue_edit(&state.db, &state.genres, &venue_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("venue {}", venue_id)))
}

/// POST /venues/:id/edit
pub async fn update_venue(
    State(state): State<AppState>,
    Path(venue_id): Path<String>,
    payload: Result<Json<VenueDraft>, JsonRejection>,
) -> ApiResult<Json<MutationResponse>> {
    let Json(draft) = payload?;
    let venue = venues::update_venue(&state.db, &state.genres, &venue_id, &draft)
        .await
        .map_err(|e| ApiError::from_common(e, &format!("Venue {} could not be updated.", draft.name)))?;

    Ok(Json(MutationResponse {
        message: format!("Venue {} was successfully updated!", venue.name),
        id: venue.id,
    }))
}

/// DELETE /venues/:id
///
/// Shows and genre links of the venue are removed with it.
pub async fn delete_venue(
    State(state): State<AppState>,
    Path(venue_id): Path<String>,
) -> ApiResult<Json<MutationResponse>> {
    owners::delete_owner(&state.db, OwnerKind::Venue, &venue_id)
        .await
        .map_err(|e| ApiError::from_common(e, "Venue could not be deleted."))?;

    Ok(Json(MutationResponse {
        message: "Venue was successfully deleted!".to_string(),
        id: venue_id,
    }))
}

/// Build venue routes
pub fn venue_routes() -> Router<AppState> {
    Router::new()
        .route("/venues", get(list_venues))
        .route("/venues/all", get(all_venues))
        .route("/venues/search", post(search_venues))
        .route("/venues/create", post(create_venue))
        .route("/venues/:id", get(show_venue).delete(delete_venue))
        .route("/venues/:id/edit", get(edit_venue_form).post(update_venue))
}
