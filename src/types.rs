use serde::{Deserialize, Serialize};
use tabled::Tabled;

// ---------------------------------------------------------------------------
// Upstream payloads
// ---------------------------------------------------------------------------

/// Body of a successful client-credentials exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub width: Option<u32>,
}

/// Full artist object from search results and `/artists/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub popularity: u32,
    #[serde(default)]
    pub images: Vec<Image>,
}

impl Artist {
    pub fn image_url(&self) -> Option<String> {
        self.images.first().map(|i| i.url.clone())
    }
}

/// Artist reference embedded in a track; carries no genres or images.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Album {
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub release_date: Option<String>,
}

/// Track object from top-tracks and track search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub popularity: u32,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    #[serde(default)]
    pub album: Album,
    #[serde(default)]
    pub preview_url: Option<String>,
}

impl Track {
    pub fn album_image_url(&self) -> Option<String> {
        self.album.images.first().map(|i| i.url.clone())
    }
}

/// One page of search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistSearchResponse {
    pub artists: Page<Artist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackSearchResponse {
    pub tracks: Page<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopTracksResponse {
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenreSeedsResponse {
    pub genres: Vec<String>,
}

/// `{"error": {"status": 401, "message": "..."}}` as returned by the Web API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
}

// ---------------------------------------------------------------------------
// Response bodies
// ---------------------------------------------------------------------------

/// Artist part of the `/api/artists-top-tracks` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistSummary {
    pub id: String,
    pub name: String,
    pub genres: Vec<String>,
    pub popularity: u32,
    pub image: Option<String>,
}

impl From<&Artist> for ArtistSummary {
    fn from(artist: &Artist) -> Self {
        ArtistSummary {
            id: artist.id.clone(),
            name: artist.name.clone(),
            genres: artist.genres.clone(),
            popularity: artist.popularity,
            image: artist.image_url(),
        }
    }
}

/// One top track with the preview URLs found for its name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopTrack {
    pub track_id: String,
    pub track_name: String,
    pub preview_urls: Vec<String>,
    pub duration_ms: u64,
    pub popularity: u32,
    pub album_image: Option<String>,
}

impl TopTrack {
    pub fn new(track: &Track, preview_urls: Vec<String>) -> Self {
        TopTrack {
            track_id: track.id.clone(),
            track_name: track.name.clone(),
            preview_urls,
            duration_ms: track.duration_ms,
            popularity: track.popularity,
            album_image: track.album_image_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistTopTracksResponse {
    pub success: bool,
    pub artist: ArtistSummary,
    pub top_tracks: Vec<TopTrack>,
    pub filtered_by_genre: bool,
    pub genre: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenresResponse {
    pub success: bool,
    pub genres: Vec<String>,
}

pub const UNKNOWN: &str = "Unknown";

/// A random track annotated with its first artist's genres.
///
/// Missing release dates and empty genre lists are reported as `"Unknown"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomTrack {
    pub track_id: String,
    pub track_name: String,
    pub artist_id: Option<String>,
    pub artist_name: Option<String>,
    pub preview_url: Option<String>,
    pub release_date: String,
    pub genres: String,
    pub album_image: Option<String>,
}

impl RandomTrack {
    pub fn new(track: &Track, genres: &[String]) -> Self {
        let artist = track.artists.first();
        RandomTrack {
            track_id: track.id.clone(),
            track_name: track.name.clone(),
            artist_id: artist.map(|a| a.id.clone()),
            artist_name: artist.map(|a| a.name.clone()),
            preview_url: track.preview_url.clone(),
            release_date: track
                .album
                .release_date
                .clone()
                .unwrap_or_else(|| UNKNOWN.to_string()),
            genres: if genres.is_empty() {
                UNKNOWN.to_string()
            } else {
                genres.join(", ")
            },
            album_image: track.album_image_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomTracksResponse {
    pub success: bool,
    pub tracks: Vec<RandomTrack>,
}

// ---------------------------------------------------------------------------
// CLI tables
// ---------------------------------------------------------------------------

#[derive(Tabled)]
pub struct TopTrackTableRow {
    pub name: String,
    pub duration: String,
    pub popularity: u32,
    pub previews: usize,
}

#[derive(Tabled)]
pub struct RandomTrackTableRow {
    pub name: String,
    pub artist: String,
    pub released: String,
    pub genres: String,
}
