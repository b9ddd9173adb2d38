use tabled::Table;

use crate::{
    discovery::{Discovery, Outcome},
    fatal, success,
    types::{RandomTrackTableRow, UNKNOWN},
    warning,
};

/// Prints a table of random tracks.
pub async fn tracks(discovery: &Discovery) {
    let pb = super::spinner("Searching random tracks...");
    let result = discovery.random_tracks().await;
    pb.finish_and_clear();

    let response = match result {
        Ok(Outcome::Found(response)) => response,
        Ok(Outcome::NotFound { message }) => {
            warning!("{}", message);
            return;
        }
        Err(e) => fatal!("Random track search failed: {}", e),
    };

    let rows: Vec<RandomTrackTableRow> = response
        .tracks
        .iter()
        .map(|t| RandomTrackTableRow {
            name: t.track_name.clone(),
            artist: t.artist_name.clone().unwrap_or_else(|| UNKNOWN.to_string()),
            released: t.release_date.clone(),
            genres: t.genres.clone(),
        })
        .collect();
    println!("{}", Table::new(rows));

    success!("Found {} tracks", response.tracks.len());
}
