//! # API Module
//!
//! HTTP endpoints of the previewfm proxy.
//!
//! ## Endpoints
//!
//! - `GET /` - liveness text
//! - `GET /health` - status and version as JSON
//! - `GET /api/genres` - genre seeds known to the catalog
//! - `GET /api/artists-top-tracks?genre=<g>` - one artist (filtered by genre
//!   or random) with its top five tracks and their preview URLs
//! - `GET /api/random-tracks` - a page of random tracks with artist genres
//!
//! ## Status codes
//!
//! | outcome | status | body |
//! |---|---|---|
//! | success | 200 | `{success: true, ...}` |
//! | nothing matched | 404 | `{success: false, message}` |
//! | missing credentials | 500 | `{error}` |
//! | token or catalog failure | 500 | `{success: false, error}` |
//!
//! Errors are logged here, once, when they are turned into responses.

mod error;
mod handlers;
mod health;

pub use handlers::{TopTracksParams, artists_top_tracks, genres, random_tracks};
pub use health::{health, root};

use crate::discovery::Discovery;

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub discovery: Discovery,
}

impl AppState {
    pub fn new(discovery: Discovery) -> Self {
        AppState { discovery }
    }
}
