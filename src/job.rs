//! Background playlist jobs.
//!
//! The interaction webhook must answer within Discord's response window, so the
//! actual work runs in a spawned task. A job is a straight pipeline where every
//! stage takes the previous stage's output:
//!
//! ```text
//! date ─► ChartDate ─► Vec<ChartEntry> ─► access token ─► Vec<ResolvedTrack>
//!      ─► PlaylistSession ─► follow-up message
//! ```
//!
//! Every job owns its HTTP clients, credentials and intermediate values, so
//! concurrent jobs share nothing mutable. When one of the stages fails, the
//! job reports the failure once and sends no follow-up, which leaves the
//! requester with the deferred "thinking" message.

use std::sync::Arc;

use reqwest::Client;
use tokio::sync::oneshot;

use crate::{
    Res,
    billboard::{ChartClient, ChartDate},
    config::{ChartSettings, Settings, SpotifySettings},
    discord::Followup,
    failure, info,
    spotify::{self, Credentials, SpotifyClient},
    success,
    types::PlaylistSession,
    utils,
};

/// What the gateway hands over to a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistRequest {
    /// Chart date as typed by the user, `day.month.year`.
    pub date: String,
    /// Token that allows editing the deferred response.
    pub interaction_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    Completed {
        playlist_url: String,
        /// Whether the follow-up message was accepted by Discord.
        notified: bool,
    },
    Failed {
        reason: String,
    },
}

/// Receiving end of a job's result channel.
///
/// Dropping the handle detaches the job; it keeps running to completion.
#[derive(Debug)]
pub struct JobHandle {
    outcome: oneshot::Receiver<JobOutcome>,
}

impl JobHandle {
    pub fn new(outcome: oneshot::Receiver<JobOutcome>) -> Self {
        Self { outcome }
    }

    /// Waits for the job to finish. `None` if the job was dropped without
    /// reporting, e.g. because its task panicked.
    pub async fn outcome(self) -> Option<JobOutcome> {
        self.outcome.await.ok()
    }
}

/// Starts jobs without waiting for them.
pub trait Dispatch: Send + Sync {
    fn dispatch(&self, request: PlaylistRequest) -> JobHandle;
}

/// Runs every job as its own tokio task.
#[derive(Debug, Clone)]
pub struct JobRunner {
    settings: Arc<Settings>,
    http: Client,
}

impl JobRunner {
    pub fn new(settings: Arc<Settings>, http: Client) -> Self {
        Self { settings, http }
    }
}

impl Dispatch for JobRunner {
    fn dispatch(&self, request: PlaylistRequest) -> JobHandle {
        let (tx, rx) = oneshot::channel();
        let settings = Arc::clone(&self.settings);
        let http = self.http.clone();

        tokio::spawn(async move {
            let outcome = run(&settings, http, &request).await;
            // Nobody may be listening any more.
            let _ = tx.send(outcome);
        });

        JobHandle::new(rx)
    }
}

/// Runs a whole job: builds the playlist, then edits the deferred response.
pub async fn run(settings: &Settings, http: Client, request: &PlaylistRequest) -> JobOutcome {
    info!("Running playlist job for {}", request.date);

    let session = match create_chart_playlist(
        &settings.chart,
        &settings.spotify,
        http.clone(),
        &request.date,
    )
    .await
    {
        Ok(session) => session,
        Err(e) => {
            failure!("Playlist job for {} failed: {}", request.date, e);
            return JobOutcome::Failed {
                reason: e.to_string(),
            };
        }
    };
    info!("Playlist link: {}", session.playlist_url);

    let followup = Followup::new(http, &settings.discord);
    let content = utils::followup_content(&request.date, &session.playlist_url);
    let notified = match followup
        .edit_original(&request.interaction_token, &content)
        .await
    {
        Ok(()) => {
            success!("Follow-up sent for {}", request.date);
            true
        }
        Err(e) => {
            failure!("Failed to send follow-up for {}: {}", request.date, e);
            false
        }
    };

    JobOutcome::Completed {
        playlist_url: session.playlist_url,
        notified,
    }
}

/// Fetch, authenticate, resolve and build: everything but the follow-up.
pub async fn create_chart_playlist(
    chart: &ChartSettings,
    spotify_settings: &SpotifySettings,
    http: Client,
    date: &str,
) -> Res<PlaylistSession> {
    let date = ChartDate::parse(date)?;

    let entries = ChartClient::new(http.clone(), chart).fetch(&date).await?;

    let mut credentials = Credentials::from_cache(http.clone(), spotify_settings.clone()).await?;
    let access_token = credentials.access_token().await?;

    let client = SpotifyClient::new(http, &spotify_settings.api_url, access_token);
    let owner = client.current_user().await?;
    let tracks = spotify::resolve_tracks(&client, &entries).await?;

    spotify::build_playlist(&client, &owner, &date.playlist_name(), &tracks).await
}
