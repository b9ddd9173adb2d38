use std::sync::LazyLock;

use async_trait::async_trait;
use futures::future::join_all;
use regex::Regex;
use reqwest::Client;
use tracing::{debug, warn};

use crate::{
    error::{Error, Result},
    spotify::CatalogClient,
};

/// Number of catalog hits whose embed pages are inspected per lookup.
pub const DEFAULT_LOOKUP_LIMIT: u32 = 5;

static PREVIEW_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"https://p\.scdn\.co/mp3-preview/[^"'\s\\<>]+"#).expect("valid preview regex")
});

/// Source of preview URLs for a track name.
///
/// Implementations receive the request's catalog client so they can reuse
/// its token.
#[async_trait]
pub trait PreviewLookup: Send + Sync {
    async fn lookup(&self, catalog: &CatalogClient, track_name: &str) -> Result<Vec<String>>;
}

/// Resolves previews for one track, degrading any failure to an empty list.
pub async fn resolve_previews(
    lookup: &dyn PreviewLookup,
    catalog: &CatalogClient,
    track_name: &str,
) -> Vec<String> {
    match lookup.lookup(catalog, track_name).await {
        Ok(urls) => urls,
        Err(e) => {
            warn!("Preview lookup for {:?} failed: {}", track_name, e);
            Vec::new()
        }
    }
}

/// Finds preview clips by searching the catalog for the track name and
/// scraping the public embed page of each hit.
#[derive(Debug, Clone)]
pub struct EmbedPreviewLookup {
    http: Client,
    embed_url: String,
    limit: u32,
}

impl EmbedPreviewLookup {
    pub fn new(http: Client, embed_url: impl Into<String>) -> Self {
        EmbedPreviewLookup {
            http,
            embed_url: embed_url.into().trim_end_matches('/').to_string(),
            limit: DEFAULT_LOOKUP_LIMIT,
        }
    }

    async fn embed_page(&self, track_id: &str) -> Result<String> {
        let url = format!("{}/track/{}", self.embed_url, track_id);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| Error::Preview(e.to_string()))?;

        response.text().await.map_err(|e| Error::Preview(e.to_string()))
    }
}

#[async_trait]
impl PreviewLookup for EmbedPreviewLookup {
    async fn lookup(&self, catalog: &CatalogClient, track_name: &str) -> Result<Vec<String>> {
        let hits = catalog
            .search_tracks(track_name, 0, self.limit)
            .await
            .map_err(|e| Error::Preview(e.to_string()))?;

        let pages = join_all(hits.iter().map(|t| self.embed_page(&t.id))).await;

        let mut urls = Vec::new();
        for (hit, page) in hits.iter().zip(pages) {
            match page {
                Ok(html) => {
                    for url in extract_preview_urls(&html) {
                        if !urls.contains(&url) {
                            urls.push(url);
                        }
                    }
                }
                Err(e) => debug!("Skipping embed page of {}: {}", hit.id, e),
            }
        }

        Ok(urls)
    }
}

/// Extracts every distinct preview clip URL from an HTML document, in order
/// of first appearance.
pub fn extract_preview_urls(html: &str) -> Vec<String> {
    let mut urls: Vec<String> = Vec::new();
    for m in PREVIEW_URL.find_iter(html) {
        let url = m.as_str().to_string();
        if !urls.contains(&url) {
            urls.push(url);
        }
    }
    urls
}
