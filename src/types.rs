use std::collections::HashMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_repr::{Deserialize_repr, Serialize_repr};
use tabled::Tabled;

use crate::utils;

/// One row of a chart page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartEntry {
    /// Position on the chart, starting at 1.
    pub rank: u32,
    pub title: String,
    /// Artist credit as printed on the chart, including any "Featuring" part.
    pub artist: String,
    /// Artist credit cut before "Featuring".
    pub primary_artist: String,
}

impl ChartEntry {
    pub fn new(rank: u32, title: impl Into<String>, artist: impl Into<String>) -> Self {
        let artist = artist.into();
        Self {
            rank,
            title: title.into(),
            primary_artist: utils::primary_artist(&artist),
            artist,
        }
    }
}

#[derive(Tabled)]
pub struct ChartTableRow {
    pub rank: u32,
    pub title: String,
    pub artist: String,
}

impl From<&ChartEntry> for ChartTableRow {
    fn from(entry: &ChartEntry) -> Self {
        Self {
            rank: entry.rank,
            title: entry.title.clone(),
            artist: entry.artist.clone(),
        }
    }
}

/// A chart entry together with the catalog track it was matched to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTrack {
    pub entry: ChartEntry,
    /// `None` when neither search strategy found a track.
    pub uri: Option<String>,
}

/// The playlist created by one job run.
#[derive(Debug, Clone)]
pub struct PlaylistSession {
    pub access_token: String,
    pub playlist_id: String,
    pub playlist_url: String,
    pub owner_user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

impl Token {
    /// Tokens are treated as expired four minutes ahead of time.
    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now >= (self.obtained_at + self.expires_in).saturating_sub(240)
    }
}

/// State shared between the `auth` command and the OAuth callback handler.
#[derive(Debug, Clone)]
pub struct PendingAuth {
    /// Random value sent with the authorization request and echoed back.
    pub state: String,
    pub token: Option<Token>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: String,
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub tracks: Tracks,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tracks {
    pub items: Vec<Track>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Track {
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub name: String,
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExternalUrls {
    pub spotify: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

/// Interaction types sent by Discord to the webhook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Ping,
    ApplicationCommand,
}

impl TryFrom<u8> for CommandType {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Ping),
            2 => Ok(Self::ApplicationCommand),
            other => Err(other),
        }
    }
}

/// Interaction payload, reduced to the fields the bot reads.
#[derive(Debug, Clone, Deserialize)]
pub struct Interaction {
    #[serde(rename = "type", default)]
    pub kind: u8,
    pub token: Option<String>,
    pub data: Option<CommandData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommandData {
    pub name: String,
    #[serde(default)]
    pub options: Vec<CommandOption>,
}

impl CommandData {
    pub fn option_map(&self) -> HashMap<String, Value> {
        self.options
            .iter()
            .map(|o| (o.name.clone(), o.value.clone()))
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommandOption {
    pub name: String,
    #[serde(default)]
    pub value: Value,
}

/// A webhook call after the JSON body and both signature headers were read.
#[derive(Debug, Clone)]
pub struct CommandRequest {
    pub raw_body: Vec<u8>,
    /// Hex encoded Ed25519 signature.
    pub signature: String,
    pub timestamp: String,
    pub interaction: Interaction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: InteractionCallbackType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum InteractionCallbackType {
    Pong = 1,
    DeferredChannelMessageWithSource = 5,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowupMessage {
    pub content: String,
}
