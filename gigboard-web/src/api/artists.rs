//! Artist endpoints

use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection},
        Path, State,
    },
    http::StatusCode,
    routing::{get, post},
    Form, Json, Router,
};
use gigboard_common::db::models::{ArtistDraft, NamedEntry};
use gigboard_common::db::{artists, owners};
use gigboard_common::search::{self, SearchResults};
use gigboard_common::views::{self, ArtistEdit, ArtistPage};
use gigboard_common::{time, OwnerKind};

use super::{MutationResponse, SearchForm};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// GET /artists
pub async fn list_artists(State(state): State<AppState>) -> ApiResult<Json<Vec<NamedEntry>>> {
    let artists = views::artist_listing(&state.db).await?;
    Ok(Json(artists))
}

/// GET /artists/all
pub async fn all_artists(State(state): State<AppState>) -> ApiResult<Json<Vec<NamedEntry>>> {
    let entries = owners::list_entries(&state.db, OwnerKind::Artist).await?;
    Ok(Json(entries))
}

/// POST /artists/search
pub async fn search_artists(
    State(state): State<AppState>,
    payload: Result<Form<SearchForm>, FormRejection>,
) -> ApiResult<Json<SearchResults>> {
    let Form(form) = payload?;
    let results = search::search(&state.db, OwnerKind::Artist, &form.search_term, time::now()).await?;
    Ok(Json(results))
}

/// GET /artists/:id
pub async fn show_artist(
    State(state): State<AppState>,
    Path(artist_id): Path<String>,
) -> ApiResult<Json<ArtistPage>> {
    views::artist_page(&state.db, &state.genres, &artist_id, time::now())
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("artist {}", artist_id)))
}

/// POST /artists/create
pub async fn create_artist(
    State(state): State<AppState>,
    payload: Result<Json<ArtistDraft>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<MutationResponse>)> {
    let Json(draft) = payload?;
    let artist = artists::create_artist(&state.db, &state.genres, &draft)
        .await
        .map_err(|e| ApiError::from_common(e, &format!("Artist {} could not be listed.", draft.name)))?;

    Ok((
        StatusCode::CREATED,
        Json(MutationResponse {
            message: format!("Artist {} was successfully listed!", artist.name),
            id: artist.id,
        }),
    ))
}

/// GET /artists/:id/edit
pub async fn edit_artist_form(
    State(state): State<AppState>,
    Path(artist_id): Path<String>,
) -> ApiResult<Json<ArtistEdit>> {
    views::artist_edit(&state.db, &state.genres, &artist_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("artist {}", artist_id)))
}

/// POST /artists/:id/edit
pub async fn update_artist(
    State(state): State<AppState>,
    Path(artist_id): Path<String>,
    payload: Result<Json<ArtistDraft>, JsonRejection>,
) -> ApiResult<Json<MutationResponse>> {
    let Json(draft) = payload?;
    let artist = artists::update_artist(&state.db, &state.genres, &artist_id, &draft)
        .await
        .map_err(|e| ApiError::from_common(e, &format!("Artist {} could not be updated.", draft.name)))?;

    Ok(Json(MutationResponse {
        message: format!("Artist {} was successfully updated!", artist.name),
        id: artist.id,
    }))
}

/// DELETE /artists/:id
///
/// Shows and genre links of the artist are removed with it.
pub async fn delete_artist(
    State(state): State<AppState>,
    Path(artist_id): Path<String>,
) -> ApiResult<Json<MutationResponse>> {
    owners::delete_owner(&state.db, OwnerKind::Artist, &artist_id)
        .await
        .map_err(|e| ApiError::from_common(e, "Artist could not be deleted."))?;

    Ok(Json(MutationResponse {
        message: "Artist was successfully deleted!".to_string(),
        id: artist_id,
    }))
}

/// Build artist routes
pub fn artist_routes() -> Router<AppState> {
    Router::new()
        .route("/artists", get(list_artists))
        .route("/artists/all", get(all_artists))
        .route("/artists/search", post(search_artists))
        .route("/artists/create", post(create_artist))
        .route("/artists/:id", get(show_artist).delete(delete_artist))
        .route("/artists/:id/edit", get(edit_artist_form).post(update_artist))
}
