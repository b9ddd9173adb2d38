use rand::Rng;

/// Upper bound (exclusive) of the random offset used for genre searches.
pub const GENRE_SEARCH_OFFSET_MAX: u32 = 50;

/// Upper bound (exclusive) of the random offset used for the random artist probe.
pub const RANDOM_ARTIST_OFFSET_MAX: u32 = 1000;

/// Upper bound (inclusive) of the random offset used for random track searches.
pub const RANDOM_TRACK_OFFSET_MAX: u32 = 1000;

const PROBE_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const TRACK_QUERY_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Picks one lowercase ASCII letter uniformly at random.
pub fn random_probe_letter() -> char {
    let mut rng = rand::rng();
    PROBE_ALPHABET[rng.random_range(0..PROBE_ALPHABET.len())] as char
}

/// Returns a uniformly random offset in `[0, max)`.
pub fn random_offset(max: u32) -> u32 {
    rand::rng().random_range(0..max)
}

/// Builds a 1 to 3 character query drawn from `[a-z0-9]`.
pub fn random_track_query() -> String {
    let mut rng = rand::rng();
    let len = rng.random_range(1..=3);
    (0..len)
        .map(|_| TRACK_QUERY_ALPHABET[rng.random_range(0..TRACK_QUERY_ALPHABET.len())] as char)
        .collect()
}

/// Returns a uniformly random offset in `[0, RANDOM_TRACK_OFFSET_MAX]`.
pub fn random_track_offset() -> u32 {
    rand::rng().random_range(0..=RANDOM_TRACK_OFFSET_MAX)
}

/// Formats milliseconds as `m:ss`.
pub fn format_duration(ms: u64) -> String {
    let secs = ms / 1000;
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Treats a blank genre parameter as no genre at all.
pub fn normalize_genre(genre: Option<&str>) -> Option<&str> {
    genre.map(str::trim).filter(|g| !g.is_empty())
}
