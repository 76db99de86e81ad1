//! Configuration management for the Hot 100 bot.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. Values are grouped into sections so that every CLI
//! command only requires the variables it actually uses:
//!
//! - [`ChartSettings`] - where the chart pages are fetched from
//! - [`SpotifySettings`] - OAuth credentials, endpoints and the token cache
//! - [`DiscordSettings`] - bot credentials, verification key and API endpoint
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf};

use crate::Res;

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8080";
pub const DEFAULT_CHART_URL: &str = "https://www.billboard.com/charts/hot-100";
pub const DEFAULT_DISCORD_API_URL: &str = "https://discord.com/api/v10";
pub const DEFAULT_COMMAND_NAME: &str = "spotify";
pub const DEFAULT_SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_REDIRECT_URI: &str = "http://127.0.0.1:8888/callback";
pub const DEFAULT_SPOTIFY_SCOPE: &str = "playlist-modify-private";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/hot100bot/.env`
/// - macOS: `~/Library/Application Support/hot100bot/.env`
/// - Windows: `%LOCALAPPDATA%/hot100bot/.env`
///
/// A missing file is not an error, since a deployment may provide every
/// variable through the process environment instead.
///
/// # Errors
///
/// This function will return an error if:
/// - The parent directory cannot be created
/// - The `.env` file exists but cannot be read or parsed
pub async fn load_env() -> Res<()> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if path.is_file() {
        dotenv::from_path(&path)?;
    }
    Ok(())
}

/// Returns the platform-specific directory holding the `.env` file and caches.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("hot100bot");
    path
}

/// Returns the address the interaction webhook server binds to.
pub fn server_addr() -> String {
    optional("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Settings for fetching chart pages.
#[derive(Debug, Clone)]
pub struct ChartSettings {
    /// Chart page base URL, the chart date is appended as the last path segment.
    pub chart_url: String,
}

impl ChartSettings {
    pub fn from_env() -> Self {
        Self {
            chart_url: optional("BILLBOARD_CHART_URL", DEFAULT_CHART_URL),
        }
    }
}

/// Settings for the Spotify accounts service and Web API.
#[derive(Debug, Clone)]
pub struct SpotifySettings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    /// Authorization code used for the first exchange when no token is cached.
    pub auth_code: Option<String>,
    /// File where obtained and refreshed tokens are kept between runs.
    pub token_cache: PathBuf,
}

impl SpotifySettings {
    /// Reads the Spotify section from the environment.
    ///
    /// # Errors
    ///
    /// Fails if `SPOTIFY_CLIENT_ID` or `SPOTIFY_CLIENT_SECRET` are not set.
    pub fn from_env() -> Res<Self> {
        Ok(Self {
            client_id: required("SPOTIFY_CLIENT_ID")?,
            client_secret: required("SPOTIFY_CLIENT_SECRET")?,
            redirect_uri: optional("SPOTIFY_REDIRECT_URI", DEFAULT_SPOTIFY_REDIRECT_URI),
            scope: optional("SPOTIFY_SCOPE", DEFAULT_SPOTIFY_SCOPE),
            auth_url: optional("SPOTIFY_AUTH_URL", DEFAULT_SPOTIFY_AUTH_URL),
            token_url: optional("SPOTIFY_TOKEN_URL", DEFAULT_SPOTIFY_TOKEN_URL),
            api_url: optional("SPOTIFY_API_URL", DEFAULT_SPOTIFY_API_URL),
            auth_code: env::var("SPOTIFY_AUTH_CODE").ok().filter(|c| !c.is_empty()),
            token_cache: env::var("SPOTIFY_TOKEN_CACHE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| data_dir().join("cache/token.json")),
        })
    }
}

/// Settings for the Discord application.
#[derive(Debug, Clone)]
pub struct DiscordSettings {
    pub bot_token: String,
    pub application_id: String,
    /// Hex encoded Ed25519 public key of the application.
    pub public_key: String,
    pub api_url: String,
    /// Name of the slash command that triggers a playlist job.
    pub command_name: String,
}

impl DiscordSettings {
    /// Reads the Discord section from the environment.
    ///
    /// # Errors
    ///
    /// Fails if `BOT_TOKEN`, `APPLICATION_ID` or `DISCORD_PUBLIC_KEY` are not set.
    pub fn from_env() -> Res<Self> {
        Ok(Self {
            bot_token: required("BOT_TOKEN")?,
            application_id: required("APPLICATION_ID")?,
            public_key: required("DISCORD_PUBLIC_KEY")?,
            api_url: optional("DISCORD_API_URL", DEFAULT_DISCORD_API_URL),
            command_name: optional("DISCORD_COMMAND_NAME", DEFAULT_COMMAND_NAME),
        })
    }
}

/// Everything a background playlist job needs.
#[derive(Debug, Clone)]
pub struct Settings {
    pub chart: ChartSettings,
    pub spotify: SpotifySettings,
    pub discord: DiscordSettings,
}

impl Settings {
    pub fn from_env() -> Res<Self> {
        Ok(Self {
            chart: ChartSettings::from_env(),
            spotify: SpotifySettings::from_env()?,
            discord: DiscordSettings::from_env()?,
        })
    }
}

fn required(key: &str) -> Res<String> {
    match env::var(key) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(format!("{} must be set", key).into()),
    }
}

fn optional(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}
