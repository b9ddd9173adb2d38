use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    config::DEFAULT_MARKET,
    error::{Error, Result},
    spotify::AccessToken,
    types::{
        ApiErrorResponse, Artist, ArtistSearchResponse, GenreSeedsResponse, TopTracksResponse,
        Track, TrackSearchResponse,
    },
    utils,
};

/// Maximum number of top tracks kept per artist.
pub const TOP_TRACKS_LIMIT: usize = 5;

/// Page size of artist searches.
pub const ARTIST_SEARCH_LIMIT: u32 = 1;

/// Authenticated client for the catalog endpoints used by the pipeline.
///
/// Built per request around a freshly issued [`AccessToken`]. The underlying
/// `reqwest::Client` is cheap to clone and may be shared.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    api_url: String,
    token: AccessToken,
    market: String,
}

impl CatalogClient {
    pub fn new(http: Client, api_url: impl Into<String>, token: AccessToken) -> Self {
        CatalogClient {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token,
            market: DEFAULT_MARKET.to_string(),
        }
    }

    /// Overrides the market used for top tracks.
    pub fn with_market(mut self, market: impl Into<String>) -> Self {
        self.market = market.into();
        self
    }

    /// Retrieves the taxonomy of genre seeds.
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<String>)` - genre identifiers in upstream order
    /// - `Err(Error::Upstream)` - transport failure, non-2xx status or an
    ///   unexpected body
    pub async fn list_genres(&self) -> Result<Vec<String>> {
        let res: GenreSeedsResponse = self
            .get("/recommendations/available-genre-seeds", &[])
            .await?;
        Ok(res.genres)
    }

    /// Searches for one artist, by genre or at random.
    ///
    /// With a genre, the first query is the exact phrase `genre:"<genre>"` at
    /// a random offset in `[0, 50)`. When that yields nothing, exactly one
    /// fallback query with the bare genre text is issued at a fresh random
    /// offset in the same range, and its items are returned as-is.
    ///
    /// Without a genre, a single random lowercase letter is used as the query
    /// at a random offset in `[0, 1000)`. The letter is only a broad filter
    /// over the catalog's relevance ranking, not a semantic search.
    ///
    /// # Arguments
    ///
    /// * `genre` - Genre to filter by, or `None` for a random artist
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<Artist>)` - at most one artist; empty means "no match"
    /// - `Err(Error::Upstream)` - transport failure or non-2xx status
    pub async fn search_artists(&self, genre: Option<&str>) -> Result<Vec<Artist>> {
        match genre {
            Some(genre) => {
                let exact = format!("genre:\"{genre}\"");
                let offset = utils::random_offset(utils::GENRE_SEARCH_OFFSET_MAX);
                let artists = self.search_artist_page(&exact, offset).await?;
                if !artists.is_empty() {
                    return Ok(artists);
                }

                debug!("No exact match for genre {:?}, retrying as plain text", genre);
                let offset = utils::random_offset(utils::GENRE_SEARCH_OFFSET_MAX);
                self.search_artist_page(genre, offset).await
            }
            None => {
                let probe = utils::random_probe_letter().to_string();
                let offset = utils::random_offset(utils::RANDOM_ARTIST_OFFSET_MAX);
                self.search_artist_page(&probe, offset).await
            }
        }
    }

    async fn search_artist_page(&self, query: &str, offset: u32) -> Result<Vec<Artist>> {
        let res: ArtistSearchResponse = self
            .get(
                "/search",
                &[
                    ("q", query.to_string()),
                    ("type", "artist".to_string()),
                    ("limit", ARTIST_SEARCH_LIMIT.to_string()),
                    ("offset", offset.to_string()),
                ],
            )
            .await?;
        Ok(res.artists.items)
    }

    /// Fetches an artist's top tracks, keeping the first five in upstream order.
    ///
    /// # Arguments
    ///
    /// * `artist_id` - Catalog id of the artist
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<Track>)` - up to five tracks for the configured market
    /// - `Err(Error::Upstream)` - transport failure or non-2xx status
    pub async fn get_top_tracks(&self, artist_id: &str) -> Result<Vec<Track>> {
        let res: TopTracksResponse = self
            .get(
                &format!("/artists/{artist_id}/top-tracks"),
                &[("market", self.market.clone())],
            )
            .await?;

        let mut tracks = res.tracks;
        tracks.truncate(TOP_TRACKS_LIMIT);
        Ok(tracks)
    }

    /// Free-text track search, one page only.
    ///
    /// # Arguments
    ///
    /// * `query` - Search text, sent as the `q` parameter
    /// * `offset` - Index of the first result
    /// * `limit` - Page size
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<Track>)` - the page's tracks, possibly empty
    /// - `Err(Error::Upstream)` - transport failure or non-2xx status
    pub async fn search_tracks(&self, query: &str, offset: u32, limit: u32) -> Result<Vec<Track>> {
        let res: TrackSearchResponse = self
            .get(
                "/search",
                &[
                    ("q", query.to_string()),
                    ("type", "track".to_string()),
                    ("limit", limit.to_string()),
                    ("offset", offset.to_string()),
                ],
            )
            .await?;
        Ok(res.tracks.items)
    }

    /// Fetches a single artist, including its genres.
    ///
    /// # Arguments
    ///
    /// * `artist_id` - Catalog id of the artist
    ///
    /// # Returns
    ///
    /// - `Ok(Artist)` - the full artist object
    /// - `Err(Error::Upstream)` - transport failure, non-2xx status or an
    ///   unexpected body
    pub async fn get_artist(&self, artist_id: &str) -> Result<Artist> {
        self.get(&format!("/artists/{artist_id}"), &[]).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = format!("{}{}", self.api_url, path);
        debug!("GET {} {:?}", url, query);

        let response = self
            .http
            .get(&url)
            .bearer_auth(self.token.as_str())
            .query(query)
            .send()
            .await
            .map_err(|e| Error::Upstream(format!("GET {path} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorResponse>(&body)
                .map(|b| b.error.message)
                .unwrap_or_else(|_| {
                    status
                        .canonical_reason()
                        .unwrap_or("unknown error")
                        .to_string()
                });
            return Err(Error::Upstream(format!(
                "GET {path} returned {}: {message}",
                status.as_u16()
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| Error::Upstream(format!("GET {path} returned an unexpected body: {e}")))
    }
}
