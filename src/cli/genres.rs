use crate::{discovery::Discovery, fatal, success};

/// Prints every genre seed known to the catalog, one per line.
pub async fn genres(discovery: &Discovery) {
    let pb = super::spinner("Fetching genre seeds...");
    let result = discovery.genres().await;
    pb.finish_and_clear();

    match result {
        Ok(genres) => {
            for genre in &genres {
                println!("{}", genre);
            }
            success!("{} genres available", genres.len());
        }
        Err(e) => fatal!("Failed to fetch genres: {}", e),
    }
}
