use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;

use crate::{
    config::{ChartSettings, SpotifySettings},
    error, job, success,
};

/// Builds the playlist for `date` without going through Discord.
pub async fn playlist(date: String) {
    let spotify_settings = match SpotifySettings::from_env() {
        Ok(settings) => settings,
        Err(e) => error!("Cannot load Spotify settings. Err: {}", e),
    };

    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Creating playlist for {}...", date));
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let result = job::create_chart_playlist(
        &ChartSettings::from_env(),
        &spotify_settings,
        Client::new(),
        &date,
    )
    .await;
    pb.finish_and_clear();

    match result {
        Ok(session) => success!("Playlist for {}: {}", date, session.playlist_url),
        Err(e) => error!("Failed to create playlist for {}. Err: {}", date, e),
    }
}
