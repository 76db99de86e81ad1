//! # Spotify Integration Module
//!
//! This module provides the slice of the Spotify Web API the bot needs: OAuth
//! token handling, track search and playlist mutation. It is the integration
//! layer between a parsed chart and the playlist the user receives.
//!
//! ## Architecture
//!
//! ```text
//! Background job (job.rs) / CLI
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (authorization code, refresh, token cache)
//!     ├── Search (chart entry → track URI)
//!     └── Playlist Operations (create, add tracks)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! - [`auth`] - [`Credentials`], the per-job access token holder, plus the
//!   interactive authorization flow behind `hot100bot auth`
//! - [`search`] - [`resolve_tracks`], matching chart entries to track URIs with
//!   a field query first and a free-text query as fallback
//! - [`playlist`] - [`build_playlist`], creating a private playlist and adding
//!   every resolved track one by one
//!
//! ## API Coverage
//!
//! - `GET /me` - Current user, owner of the created playlist
//! - `GET /search` - Track search
//! - `POST /users/{user_id}/playlists` - Create new playlists
//! - `POST /playlists/{playlist_id}/tracks` - Add tracks to playlists
//! - `POST /api/token` - Token exchange and refresh operations
//!
//! ## Error Handling
//!
//! Non-success responses are turned into errors with `error_for_status` and
//! propagated with `?`. Nothing is retried: every request is a single attempt,
//! and the callers decide whether an error ends the job or only skips one
//! track.

pub mod auth;
pub mod playlist;
pub mod search;

pub use auth::Credentials;
pub use playlist::build_playlist;
pub use search::resolve_tracks;

use reqwest::Client;

use crate::{Res, types::User};

/// Spotify Web API client bound to one access token.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    access_token: String,
}

impl SpotifyClient {
    pub fn new(http: Client, api_url: &str, access_token: impl Into<String>) -> Self {
        Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        }
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Returns the user the access token belongs to.
    pub async fn current_user(&self) -> Res<User> {
        let user = self
            .http
            .get(self.url("me"))
            .bearer_auth(&self.access_token)
            .send()
            .await?
            .error_for_status()?
            .json::<User>()
            .await?;
        Ok(user)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path)
    }
}
