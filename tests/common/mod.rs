#![allow(dead_code)]

use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use axum::{
    Form, Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse},
    routing::{get, patch, post},
};
use hot100bot::{
    config::{ChartSettings, DiscordSettings, Settings, SpotifySettings},
    types::{AddTrackToPlaylistRequest, CreatePlaylistRequest, FollowupMessage, Token},
};
use serde_json::json;

pub const PLAYLIST_URL: &str = "https://open.spotify.com/playlist/pl-1";

/// Serves `app` on an ephemeral local port and returns its base URL.
pub async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// A token cache path unique to one test, cleared before use.
pub fn temp_token_cache(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "hot100bot-test-{}-{}/token.json",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);
    path
}

pub fn valid_token() -> Token {
    Token {
        access_token: "cached-access".to_string(),
        refresh_token: "cached-refresh".to_string(),
        scope: "playlist-modify-private".to_string(),
        expires_in: 3600,
        obtained_at: chrono::Utc::now().timestamp() as u64,
    }
}

pub fn expired_token() -> Token {
    Token {
        obtained_at: chrono::Utc::now().timestamp() as u64 - 7200,
        ..valid_token()
    }
}

pub fn spotify_settings(base: &str, token_cache: PathBuf, auth_code: Option<&str>) -> SpotifySettings {
    SpotifySettings {
        client_id: "client-id".to_string(),
        client_secret: "client-secret".to_string(),
        redirect_uri: "http://127.0.0.1:8888/callback".to_string(),
        scope: "playlist-modify-private".to_string(),
        auth_url: format!("{}/authorize", base),
        token_url: format!("{}/api/token", base),
        api_url: format!("{}/v1", base),
        auth_code: auth_code.map(str::to_string),
        token_cache,
    }
}

pub fn settings(chart: &str, spotify: SpotifySettings, discord: &str) -> Settings {
    Settings {
        chart: ChartSettings {
            chart_url: format!("{}/charts/hot-100", chart),
        },
        spotify,
        discord: DiscordSettings {
            bot_token: "bot-token".to_string(),
            application_id: "app-1".to_string(),
            public_key: String::new(),
            api_url: format!("{}/api/v10", discord),
            command_name: "spotify".to_string(),
        },
    }
}

/// Builds a chart page. `None` leaves the element out of the row.
pub fn chart_html(rows: &[(Option<&str>, Option<&str>)]) -> String {
    let rows: String = rows
        .iter()
        .map(|(title, artist)| {
            let title = title
                .map(|t| format!(r#"<h3 id="title-of-a-story" class="c-title">  {}  </h3>"#, t))
                .unwrap_or_default();
            let artist = artist
                .map(|a| format!(r#"<span class="c-label a-font-primary-s">{}</span>"#, a))
                .unwrap_or_default();
            format!(
                r#"<div class="o-chart-results-list-row-container"><ul><li>{}{}</li></ul></div>"#,
                title, artist
            )
        })
        .collect();
    format!("<html><body><div class=\"chart-results\">{}</div></body></html>", rows)
}

/// Serves `html` for every chart date and records the requested dates.
#[derive(Default)]
pub struct FakeChart {
    pub html: String,
    pub requested: Mutex<Vec<String>>,
}

pub fn chart_router(chart: Arc<FakeChart>) -> Router {
    Router::new()
        .route("/charts/hot-100/{date}", get(chart_page))
        .with_state(chart)
}

async fn chart_page(State(chart): State<Arc<FakeChart>>, Path(date): Path<String>) -> Html<String> {
    chart.requested.lock().unwrap().push(date);
    Html(chart.html.clone())
}

/// In-memory stand-in for the Spotify accounts service and Web API.
#[derive(Default)]
pub struct FakeSpotify {
    /// Search query to track URI.
    pub hits: HashMap<String, String>,
    /// URIs whose addition is answered with 400.
    pub failing_uris: Vec<String>,
    pub token_fails: bool,
    pub token_requests: Mutex<Vec<HashMap<String, String>>>,
    pub searches: Mutex<Vec<String>>,
    pub created: Mutex<Vec<(String, CreatePlaylistRequest)>>,
    pub add_attempts: Mutex<Vec<String>>,
}

pub fn spotify_router(spotify: Arc<FakeSpotify>) -> Router {
    Router::new()
        .route("/api/token", post(token))
        .route("/v1/me", get(me))
        .route("/v1/search", get(search))
        .route("/v1/users/{user_id}/playlists", post(create_playlist))
        .route("/v1/playlists/{playlist_id}/tracks", post(add_tracks))
        .with_state(spotify)
}

async fn token(
    State(spotify): State<Arc<FakeSpotify>>,
    Form(form): Form<HashMap<String, String>>,
) -> impl IntoResponse {
    spotify.token_requests.lock().unwrap().push(form);
    if spotify.token_fails {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "invalid_grant"})));
    }
    (
        StatusCode::OK,
        Json(json!({
            "access_token": "fresh-access",
            "token_type": "Bearer",
            "scope": "playlist-modify-private",
            "expires_in": 3600
        })),
    )
}

async fn me() -> Json<serde_json::Value> {
    Json(json!({ "id": "owner-1" }))
}

async fn search(
    State(spotify): State<Arc<FakeSpotify>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<serde_json::Value> {
    let query = params.get("q").cloned().unwrap_or_default();
    spotify.searches.lock().unwrap().push(query.clone());
    let items: Vec<serde_json::Value> = spotify
        .hits
        .get(&query)
        .map(|uri| vec![json!({ "id": uri, "name": query, "uri": uri })])
        .unwrap_or_default();
    Json(json!({ "tracks": { "items": items } }))
}

async fn create_playlist(
    State(spotify): State<Arc<FakeSpotify>>,
    Path(user_id): Path<String>,
    Json(body): Json<CreatePlaylistRequest>,
) -> Json<serde_json::Value> {
    let name = body.name.clone();
    spotify.created.lock().unwrap().push((user_id, body));
    Json(json!({
        "id": "pl-1",
        "name": name,
        "external_urls": { "spotify": PLAYLIST_URL }
    }))
}

async fn add_tracks(
    State(spotify): State<Arc<FakeSpotify>>,
    Path(_playlist_id): Path<String>,
    Json(body): Json<AddTrackToPlaylistRequest>,
) -> impl IntoResponse {
    let uri = body.uris.first().cloned().unwrap_or_default();
    spotify.add_attempts.lock().unwrap().push(uri.clone());
    if spotify.failing_uris.contains(&uri) {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "invalid uri"})));
    }
    (StatusCode::CREATED, Json(json!({ "snapshot_id": "snap" })))
}

/// Records follow-up edits as (interaction token, authorization, content).
#[derive(Default)]
pub struct FakeDiscord {
    pub patches: Mutex<Vec<(String, String, String)>>,
}

pub fn discord_router(discord: Arc<FakeDiscord>) -> Router {
    Router::new()
        .route(
            "/api/v10/webhooks/{application_id}/{token}/messages/@original",
            patch(edit_original),
        )
        .with_state(discord)
}

async fn edit_original(
    State(discord): State<Arc<FakeDiscord>>,
    Path((_application_id, token)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<FollowupMessage>,
) -> Json<serde_json::Value> {
    let authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    discord
        .patches
        .lock()
        .unwrap()
        .push((token, authorization, body.content.clone()));
    Json(json!({ "id": "message-1", "content": body.content }))
}
