//! # Spotify Integration Module
//!
//! Thin, typed access to the Spotify Web API and the public embed pages used
//! for preview discovery.
//!
//! ## Architecture
//!
//! ```text
//! Discovery pipeline
//!          ↓
//! Spotify Integration Layer
//!     ├── Token provider (client-credentials grant)
//!     ├── Catalog client (genres, artist search, top tracks, track search)
//!     └── Preview resolver (name-keyed lookup, best-effort)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! ## Core Modules
//!
//! - [`auth`] exchanges the configured client id/secret for a bearer token.
//!   A fresh token is requested for every pipeline run; nothing is cached.
//! - [`catalog`] wraps the authenticated Web API calls. Zero search results
//!   are a normal, empty answer. Transport failures and non-2xx statuses
//!   become [`Error::Upstream`](crate::error::Error::Upstream).
//! - [`previews`] resolves preview clip URLs for a track *name*. Lookups are
//!   keyed on free text only, so a different recording with the same title
//!   can be matched. Lookup failures never escape this module.
//!
//! ## Non-goals
//!
//! There is no retry, rate-limit handling, timeout policy or pagination past
//! the first page. A hung upstream call hangs the request that issued it.

pub mod auth;
pub mod catalog;
pub mod previews;

pub use auth::{AccessToken, client_credentials_token};
pub use catalog::CatalogClient;
pub use previews::{EmbedPreviewLookup, PreviewLookup, resolve_previews};
