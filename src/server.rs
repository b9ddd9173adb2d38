use axum::{Router, routing::get};
use std::{net::SocketAddr, str::FromStr};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::{
    api::{self, AppState},
    discovery::Discovery,
    error::{Error, Result},
};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::root))
        .route("/health", get(api::health))
        .route("/api/genres", get(api::genres))
        .route("/api/artists-top-tracks", get(api::artists_top_tracks))
        .route("/api/random-tracks", get(api::random_tracks))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn start_api_server(discovery: Discovery) -> Result<()> {
    let addr = SocketAddr::from_str(&discovery.config().server_address).map_err(|e| {
        Error::Config(format!(
            "invalid server address {:?}: {}",
            discovery.config().server_address,
            e
        ))
    })?;

    if discovery.config().credentials().is_err() {
        warn!("Spotify credentials are not configured; API calls will answer 500");
    }

    let app = build_router(AppState::new(discovery));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::Server(e.to_string()))
}
