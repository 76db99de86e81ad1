mod common;

use std::{collections::HashMap, sync::Arc};

use hot100bot::job::{self, Dispatch, JobOutcome, JobRunner, PlaylistRequest};

use common::{
    FakeChart, FakeDiscord, FakeSpotify, PLAYLIST_URL, chart_html, chart_router, discord_router,
    settings, spawn, spotify_router, spotify_settings, temp_token_cache,
};

struct Services {
    chart: Arc<FakeChart>,
    spotify: Arc<FakeSpotify>,
    discord: Arc<FakeDiscord>,
    settings: hot100bot::config::Settings,
}

async fn start(spotify: FakeSpotify, cache_name: &str) -> Services {
    let chart = Arc::new(FakeChart {
        html: chart_html(&[
            (Some("A Bar Song (Tipsy)"), Some("Shaboozey")),
            (Some("Fortnight"), Some("Taylor Swift Featuring Post Malone")),
        ]),
        ..Default::default()
    });
    let spotify = Arc::new(spotify);
    let discord = Arc::new(FakeDiscord::default());

    let chart_base = spawn(chart_router(Arc::clone(&chart))).await;
    let spotify_base = spawn(spotify_router(Arc::clone(&spotify))).await;
    let discord_base = spawn(discord_router(Arc::clone(&discord))).await;

    let settings = settings(
        &chart_base,
        spotify_settings(&spotify_base, temp_token_cache(cache_name), Some("auth-code")),
        &discord_base,
    );

    Services {
        chart,
        spotify,
        discord,
        settings,
    }
}

fn both_tracks_found() -> FakeSpotify {
    FakeSpotify {
        hits: HashMap::from([
            (
                "track:A Bar Song (Tipsy) artist:Shaboozey".to_string(),
                "spotify:track:tipsy".to_string(),
            ),
            (
                "track:Fortnight artist:Taylor Swift".to_string(),
                "spotify:track:fortnight".to_string(),
            ),
        ]),
        ..Default::default()
    }
}

fn request() -> PlaylistRequest {
    PlaylistRequest {
        date: "14.06.2024".to_string(),
        interaction_token: "interaction-token".to_string(),
    }
}

#[tokio::test]
async fn test_job_sends_one_followup_with_playlist_link() {
    let services = start(both_tracks_found(), "job-success").await;

    let outcome = job::run(&services.settings, reqwest::Client::new(), &request()).await;

    assert_eq!(
        outcome,
        JobOutcome::Completed {
            playlist_url: PLAYLIST_URL.to_string(),
            notified: true,
        }
    );
    assert_eq!(
        *services.chart.requested.lock().unwrap(),
        vec!["2024-06-14".to_string()]
    );
    assert_eq!(
        *services.spotify.add_attempts.lock().unwrap(),
        vec!["spotify:track:tipsy", "spotify:track:fortnight"]
    );
    assert_eq!(services.spotify.created.lock().unwrap()[0].1.name, "14 06 2024");

    let patches = services.discord.patches.lock().unwrap();
    assert_eq!(patches.len(), 1);
    let (token, authorization, content) = &patches[0];
    assert_eq!(token, "interaction-token");
    assert_eq!(authorization, "Bot bot-token");
    assert!(content.contains(PLAYLIST_URL));
    assert!(content.contains("14.06.2024"));
}

#[tokio::test]
async fn test_job_auth_failure_sends_no_followup() {
    let spotify = FakeSpotify {
        token_fails: true,
        ..both_tracks_found()
    };
    let services = start(spotify, "job-auth-failure").await;

    let outcome = job::run(&services.settings, reqwest::Client::new(), &request()).await;

    assert!(matches!(outcome, JobOutcome::Failed { .. }));
    assert!(services.discord.patches.lock().unwrap().is_empty());
    assert!(services.spotify.created.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_job_bad_date_fails_before_any_request() {
    let services = start(both_tracks_found(), "job-bad-date").await;
    let request = PlaylistRequest {
        date: "2024-06-14".to_string(),
        ..request()
    };

    let outcome = job::run(&services.settings, reqwest::Client::new(), &request).await;

    match outcome {
        JobOutcome::Failed { reason } => assert!(reason.contains("2024-06-14")),
        other => panic!("unexpected outcome {:?}", other),
    }
    assert!(services.chart.requested.lock().unwrap().is_empty());
    assert!(services.spotify.token_requests.lock().unwrap().is_empty());
    assert!(services.discord.patches.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_runner_reports_outcome_through_handle() {
    let services = start(both_tracks_found(), "job-runner").await;
    let runner = JobRunner::new(Arc::new(services.settings.clone()), reqwest::Client::new());

    let handle = runner.dispatch(request());
    let outcome = handle.outcome().await;

    assert_eq!(
        outcome,
        Some(JobOutcome::Completed {
            playlist_url: PLAYLIST_URL.to_string(),
            notified: true,
        })
    );
    assert_eq!(services.discord.patches.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_chart_playlist_skips_unmatched_entries() {
    let spotify = FakeSpotify {
        hits: HashMap::from([(
            "track:A Bar Song (Tipsy) artist:Shaboozey".to_string(),
            "spotify:track:tipsy".to_string(),
        )]),
        ..Default::default()
    };
    let services = start(spotify, "job-unmatched").await;

    let session = job::create_chart_playlist(
        &services.settings.chart,
        &services.settings.spotify,
        reqwest::Client::new(),
        "14.06.2024",
    )
    .await
    .unwrap();

    assert_eq!(session.playlist_url, PLAYLIST_URL);
    assert_eq!(session.owner_user_id, "owner-1");
    assert_eq!(session.access_token, "fresh-access");
    assert_eq!(
        *services.spotify.add_attempts.lock().unwrap(),
        vec!["spotify:track:tipsy"]
    );
    assert!(services.discord.patches.lock().unwrap().is_empty());
}
