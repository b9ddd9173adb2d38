//! Artist discovery and track enrichment pipeline.
//!
//! Every operation starts from scratch: the credentials are checked, a new
//! token is requested and a catalog client is built around it. Steps run in
//! sequence except for the per-track enrichment, which fans out and joins
//! before the response is assembled.
//!
//! ```text
//! credentials → token → artist search → top tracks → previews (fan-out) → response
//! ```

use std::sync::Arc;

use futures::future::join_all;
use reqwest::Client;
use tracing::{debug, warn};

use crate::{
    config::Config,
    error::Result,
    spotify::{self, CatalogClient, EmbedPreviewLookup, PreviewLookup},
    types::{
        ArtistSummary, ArtistTopTracksResponse, RandomTrack, RandomTracksResponse, TopTrack, Track,
    },
    utils,
};

/// Page size of the random track search.
pub const RANDOM_TRACKS_LIMIT: u32 = 10;

/// Result of a lookup that may legitimately find nothing.
#[derive(Debug, Clone)]
pub enum Outcome<T> {
    Found(T),
    NotFound { message: String },
}

impl<T> Outcome<T> {
    fn not_found(message: impl Into<String>) -> Self {
        Outcome::NotFound {
            message: message.into(),
        }
    }
}

/// The pipeline, shared by the HTTP handlers and the CLI commands.
#[derive(Clone)]
pub struct Discovery {
    config: Arc<Config>,
    http: Client,
    previews: Arc<dyn PreviewLookup>,
}

impl Discovery {
    pub fn new(config: Config, http: Client, previews: Arc<dyn PreviewLookup>) -> Self {
        Discovery {
            config: Arc::new(config),
            http,
            previews,
        }
    }

    /// Builds the pipeline with the embed-page preview lookup.
    pub fn from_config(config: Config) -> Self {
        let http = Client::new();
        let previews = Arc::new(EmbedPreviewLookup::new(http.clone(), config.embed_url.clone()));
        Self::new(config, http, previews)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    async fn catalog(&self) -> Result<CatalogClient> {
        let credentials = self.config.credentials()?;
        let token =
            spotify::client_credentials_token(&self.http, &self.config.token_url, &credentials)
                .await?;

        Ok(
            CatalogClient::new(self.http.clone(), self.config.api_url.clone(), token)
                .with_market(self.config.market.clone()),
        )
    }

    /// Lists the catalog's genre seeds.
    pub async fn genres(&self) -> Result<Vec<String>> {
        let catalog = self.catalog().await?;
        catalog.list_genres().await
    }

    /// Picks one artist (by genre, or at random when `genre` is blank or
    /// absent) and returns its top tracks with preview URLs.
    ///
    /// An empty artist search is `Outcome::NotFound`, not an error. Preview
    /// lookups are best-effort, so once the top tracks are known the
    /// pipeline cannot fail.
    pub async fn discover(&self, genre: Option<&str>) -> Result<Outcome<ArtistTopTracksResponse>> {
        let genre = utils::normalize_genre(genre);
        let catalog = self.catalog().await?;

        let artists = catalog.search_artists(genre).await?;
        let Some(artist) = artists.into_iter().next() else {
            return Ok(Outcome::not_found(match genre {
                Some(g) => format!("no artists found for genre {g}"),
                None => "no artists found".to_string(),
            }));
        };
        debug!("Resolved artist {} ({})", artist.name, artist.id);

        let tracks = catalog.get_top_tracks(&artist.id).await?;
        let top_tracks = self.enrich(&catalog, &tracks).await;

        Ok(Outcome::Found(ArtistTopTracksResponse {
            success: true,
            artist: ArtistSummary::from(&artist),
            top_tracks,
            filtered_by_genre: genre.is_some(),
            genre: genre.map(str::to_string),
        }))
    }

    async fn enrich(&self, catalog: &CatalogClient, tracks: &[Track]) -> Vec<TopTrack> {
        let previews = join_all(
            tracks
                .iter()
                .map(|t| spotify::resolve_previews(self.previews.as_ref(), catalog, &t.name)),
        )
        .await;

        tracks
            .iter()
            .zip(previews)
            .map(|(track, urls)| TopTrack::new(track, urls))
            .collect()
    }

    /// Random track search: a 1-3 character query at a random offset,
    /// each hit annotated with its first artist's genres.
    pub async fn random_tracks(&self) -> Result<Outcome<RandomTracksResponse>> {
        let catalog = self.catalog().await?;

        let query = utils::random_track_query();
        let offset = utils::random_track_offset();
        debug!("Random track search q={:?} offset={}", query, offset);

        let tracks = catalog
            .search_tracks(&query, offset, RANDOM_TRACKS_LIMIT)
            .await?;
        if tracks.is_empty() {
            return Ok(Outcome::not_found("no tracks found"));
        }

        let genres = join_all(tracks.iter().map(|t| artist_genres(&catalog, t))).await;

        Ok(Outcome::Found(RandomTracksResponse {
            success: true,
            tracks: tracks
                .iter()
                .zip(genres)
                .map(|(track, genres)| RandomTrack::new(track, &genres))
                .collect(),
        }))
    }
}

async fn artist_genres(catalog: &CatalogClient, track: &Track) -> Vec<String> {
    let Some(artist) = track.artists.first() else {
        return Vec::new();
    };

    match catalog.get_artist(&artist.id).await {
        Ok(artist) => artist.genres,
        Err(e) => {
            warn!("Cannot fetch genres of artist {}: {}", artist.id, e);
            Vec::new()
        }
    }
}
