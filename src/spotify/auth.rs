use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::{Client, Url};

use crate::{
    Res,
    api::CallbackState,
    config::SpotifySettings,
    failure, info,
    management::TokenManager,
    server, success,
    types::{PendingAuth, Token, TokenResponse},
    utils, warning,
};

/// Access token holder for a single job run.
///
/// Starts from whatever token the cache file held when the job began and is
/// dropped with the job, so concurrent jobs never share credentials in memory.
///
/// [`access_token`](Self::access_token) decides between three paths:
/// - no token: full authorization-code exchange with `SPOTIFY_AUTH_CODE`
/// - expired token: refresh-token exchange
/// - valid token: returned as is
///
/// Any failure is returned to the caller, there is no retry.
#[derive(Debug)]
pub struct Credentials {
    http: Client,
    settings: SpotifySettings,
    cached: Option<Token>,
}

impl Credentials {
    pub fn new(http: Client, settings: SpotifySettings, cached: Option<Token>) -> Self {
        Self {
            http,
            settings,
            cached,
        }
    }

    /// Seeds the holder from the token cache file.
    ///
    /// A missing cache file means no token yet. An unreadable or corrupt one is
    /// an error, so it is not mistaken for a deployment that was never
    /// authorized.
    pub async fn from_cache(http: Client, settings: SpotifySettings) -> Res<Self> {
        let cached = TokenManager::load_if_present(&settings.token_cache)
            .await
            .map_err(|e| {
                format!(
                    "Cannot read token cache {}: {}",
                    settings.token_cache.display(),
                    e
                )
            })?
            .map(TokenManager::into_token);
        Ok(Self::new(http, settings, cached))
    }

    pub fn token(&self) -> Option<&Token> {
        self.cached.as_ref()
    }

    /// Returns a live access token, exchanging or refreshing when needed.
    pub async fn access_token(&mut self) -> Res<String> {
        let token = match self.cached.take() {
            Some(token) if !token.is_expired() => {
                let access_token = token.access_token.clone();
                self.cached = Some(token);
                return Ok(access_token);
            }
            Some(token) => {
                info!("Refreshing expired Spotify token");
                refresh_token(&self.http, &self.settings, &token.refresh_token).await?
            }
            None => {
                let code = self.settings.auth_code.as_deref().ok_or(
                    "No cached Spotify token and SPOTIFY_AUTH_CODE is not set. Run hot100bot auth.",
                )?;
                info!("Exchanging authorization code for a Spotify token");
                exchange_code(&self.http, &self.settings, code).await?
            }
        };

        if let Err(e) = TokenManager::new(token.clone())
            .persist(&self.settings.token_cache)
            .await
        {
            warning!("Failed to save token to cache: {}", e);
        }

        let access_token = token.access_token.clone();
        self.cached = Some(token);
        Ok(access_token)
    }
}

/// Exchanges an authorization code for an access and refresh token.
///
/// The client authenticates with its id and secret via HTTP basic auth, the
/// `redirect_uri` must match the one used for the authorization request.
pub async fn exchange_code(http: &Client, settings: &SpotifySettings, code: &str) -> Res<Token> {
    let response = http
        .post(&settings.token_url)
        .basic_auth(&settings.client_id, Some(&settings.client_secret))
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", settings.redirect_uri.as_str()),
        ])
        .send()
        .await?
        .error_for_status()?
        .json::<TokenResponse>()
        .await?;

    Ok(into_token(response, None))
}

/// Refreshes an expired access token using a refresh token.
///
/// Spotify may or may not rotate the refresh token. When the response carries
/// none, the one passed in stays valid and is kept.
pub async fn refresh_token(
    http: &Client,
    settings: &SpotifySettings,
    refresh_token: &str,
) -> Res<Token> {
    let response = http
        .post(&settings.token_url)
        .basic_auth(&settings.client_id, Some(&settings.client_secret))
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .send()
        .await?
        .error_for_status()?
        .json::<TokenResponse>()
        .await?;

    Ok(into_token(response, Some(refresh_token)))
}

fn into_token(response: TokenResponse, previous_refresh_token: Option<&str>) -> Token {
    Token {
        access_token: response.access_token,
        refresh_token: response
            .refresh_token
            .or_else(|| previous_refresh_token.map(str::to_string))
            .unwrap_or_default(),
        scope: response.scope,
        expires_in: response.expires_in.unwrap_or(3600),
        obtained_at: Utc::now().timestamp() as u64,
    }
}

/// Builds the URL the user opens to grant the bot access to their account.
pub fn authorization_url(settings: &SpotifySettings, state: &str) -> Res<Url> {
    let url = Url::parse_with_params(
        &settings.auth_url,
        &[
            ("client_id", settings.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", settings.redirect_uri.as_str()),
            ("scope", settings.scope.as_str()),
            ("state", state),
        ],
    )?;
    Ok(url)
}

/// Runs the interactive authorization-code flow and caches the token.
///
/// 1. Generates a random `state` value
/// 2. Starts a local server on the host and port of the redirect URI
/// 3. Opens the authorization URL in the default browser
/// 4. Waits for the callback handler to exchange the code
/// 5. Persists the token to the token cache
///
/// Jobs started by the interaction webhook pick the cached token up, so this
/// only needs to run once per deployment.
pub async fn authorize(http: Client, settings: SpotifySettings) -> Res<Token> {
    let state = utils::generate_state();
    let callback_addr = callback_addr(&settings.redirect_uri)?;
    let callback_path = callback_path(&settings.redirect_uri)?;
    let auth_url = authorization_url(&settings, &state)?;

    let shared_state = Arc::new(CallbackState::new(http, settings.clone()));
    {
        let mut lock = shared_state.pending.lock().await;
        *lock = Some(PendingAuth { state, token: None });
    }

    let server_state = Arc::clone(&shared_state);
    tokio::spawn(async move {
        if let Err(e) =
            server::start_callback_server(&callback_addr, &callback_path, server_state).await
        {
            failure!("Callback server stopped: {}", e);
        }
    });

    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let token = wait_for_token(&shared_state)
        .await
        .ok_or("Authentication failed or timed out.")?;

    TokenManager::new(token.clone())
        .persist(&settings.token_cache)
        .await?;
    success!(
        "Authentication successful, token saved to {}",
        settings.token_cache.display()
    );
    Ok(token)
}

/// `host:port` of the redirect URI, where the callback server listens.
pub fn callback_addr(redirect_uri: &str) -> Res<String> {
    let url = Url::parse(redirect_uri)?;
    let host = url.host_str().ok_or("Redirect URI has no host")?;
    let port = url
        .port_or_known_default()
        .ok_or("Redirect URI has no port")?;
    Ok(format!("{}:{}", host, port))
}

/// Path of the redirect URI, which the callback server routes.
///
/// Only plain paths are accepted. Route parameters or wildcards would make the
/// callback match more than the single redirect target, and `/health` is taken.
pub fn callback_path(redirect_uri: &str) -> Res<String> {
    let url = Url::parse(redirect_uri)?;
    let path = url.path();
    if !path.starts_with('/') || path.contains(['{', '}', '*']) || path == "/health" {
        return Err(format!("Unsupported redirect URI path {}", path).into());
    }
    Ok(path.to_string())
}

/// Polls the shared state for the token for at most 60 seconds.
async fn wait_for_token(shared_state: &CallbackState) -> Option<Token> {
    use std::time::Instant;

    let max_wait = Duration::from_secs(60);
    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.pending.lock().await;
        if let Some(pending) = lock.as_ref() {
            if let Some(token) = &pending.token {
                return Some(token.clone());
            }
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}
