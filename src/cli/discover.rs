use tabled::Table;

use crate::{
    discovery::{Discovery, Outcome},
    fatal, info, success,
    types::TopTrackTableRow,
    utils, warning,
};

/// Runs the discovery pipeline once and prints the artist with a table of
/// its top tracks, followed by every preview URL found.
pub async fn discover(discovery: &Discovery, genre: Option<String>) {
    let pb = super::spinner("Discovering an artist...");
    let result = discovery.discover(genre.as_deref()).await;
    pb.finish_and_clear();

    let response = match result {
        Ok(Outcome::Found(response)) => response,
        Ok(Outcome::NotFound { message }) => {
            warning!("{}", message);
            return;
        }
        Err(e) => fatal!("Discovery failed: {}", e),
    };

    let artist = &response.artist;
    info!(
        "{} (popularity {}) - {}",
        artist.name,
        artist.popularity,
        if artist.genres.is_empty() {
            "no genres".to_string()
        } else {
            artist.genres.join(", ")
        }
    );

    let rows: Vec<TopTrackTableRow> = response
        .top_tracks
        .iter()
        .map(|t| TopTrackTableRow {
            name: t.track_name.clone(),
            duration: utils::format_duration(t.duration_ms),
            popularity: t.popularity,
            previews: t.preview_urls.len(),
        })
        .collect();
    println!("{}", Table::new(rows));

    for track in &response.top_tracks {
        for url in &track.preview_urls {
            println!("{}: {}", track.track_name, url);
        }
    }

    success!("Found {} top tracks", response.top_tracks.len());
}
