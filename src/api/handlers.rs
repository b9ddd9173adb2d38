use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::{
    api::AppState,
    discovery::Outcome,
    error::Result,
    types::{ArtistTopTracksResponse, GenresResponse, RandomTracksResponse},
};

#[derive(Debug, Default, Deserialize)]
pub struct TopTracksParams {
    pub genre: Option<String>,
}

pub async fn genres(State(state): State<AppState>) -> Result<Json<GenresResponse>> {
    let genres = state.discovery.genres().await?;
    Ok(Json(GenresResponse {
        success: true,
        genres,
    }))
}

pub async fn artists_top_tracks(
    State(state): State<AppState>,
    Query(params): Query<TopTracksParams>,
) -> Result<Outcome<ArtistTopTracksResponse>> {
    state.discovery.discover(params.genre.as_deref()).await
}

pub async fn random_tracks(State(state): State<AppState>) -> Result<Outcome<RandomTracksResponse>> {
    state.discovery.random_tracks().await
}
