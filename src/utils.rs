use rand::{Rng, distr::Alphanumeric};

/// Separator Billboard uses between the lead artist and guests.
pub const FEATURING: &str = "Featuring";

/// Placeholder for a chart field that was not present in the page.
pub const NOT_FOUND: &str = "Couldn't be found";

/// Returns the artist credit up to the first "Featuring", trimmed.
pub fn primary_artist(artist: &str) -> String {
    artist
        .split(FEATURING)
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Random value for the OAuth `state` parameter.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Follow-up message posted once a playlist has been built.
pub fn followup_content(date: &str, playlist_url: &str) -> String {
    format!(
        "Playlist created for the date: {}. Here is the link: {}",
        date, playlist_url
    )
}

/// Primary search query: both fields matched by the catalog.
pub fn track_query(title: &str, primary_artist: &str) -> String {
    format!("track:{} artist:{}", title, primary_artist)
}

/// Fallback search query: free text over the title and full artist credit.
pub fn free_text_query(title: &str, artist: &str) -> String {
    format!("{} {}", title, artist)
}
