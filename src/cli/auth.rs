use reqwest::Client;

use crate::{config::SpotifySettings, error, spotify};

pub async fn auth() {
    let settings = match SpotifySettings::from_env() {
        Ok(settings) => settings,
        Err(e) => error!("Cannot load Spotify settings. Err: {}", e),
    };

    if let Err(e) = spotify::auth::authorize(Client::new(), settings).await {
        error!("{}", e);
    }
}
