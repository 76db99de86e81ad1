use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use reqwest::Client;
use tokio::sync::Mutex;

use crate::{config::SpotifySettings, spotify::auth::exchange_code, types::PendingAuth, warning};

/// State shared between the `auth` command and the callback handler.
#[derive(Debug)]
pub struct CallbackState {
    pub http: Client,
    pub settings: SpotifySettings,
    pub pending: Mutex<Option<PendingAuth>>,
}

impl CallbackState {
    pub fn new(http: Client, settings: SpotifySettings) -> Self {
        Self {
            http,
            settings,
            pending: Mutex::new(None),
        }
    }
}

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<Arc<CallbackState>>,
) -> Html<&'static str> {
    if let Some(error) = params.get("error") {
        warning!("Authorization was denied: {}", error);
        return Html("<h4>Authorization denied.</h4>");
    }

    let Some(code) = params.get("code") else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    let mut pending = shared_state.pending.lock().await;
    let Some(pending_auth) = pending.as_mut() else {
        return Html("<h4>No authorization in progress.</h4>");
    };

    if params.get("state") != Some(&pending_auth.state) {
        warning!("Callback state does not match the authorization request");
        return Html("<h4>State mismatch.</h4>");
    }

    match exchange_code(&shared_state.http, &shared_state.settings, code).await {
        Ok(token) => {
            pending_auth.token = Some(token);
            Html("<h2>Authentication successful.</h2><p>Close browser window.</p>")
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            Html("<h4>Login failed.</h4>")
        }
    }
}
